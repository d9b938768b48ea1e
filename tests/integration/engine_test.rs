//! Integration tests for the AlphaRSI engine

use alpharsi::config::{EngineConfig, SmoothingType};
use alpharsi::divergence::{DivergenceKind, PivotKind};
use alpharsi::indicator::Bias;
use alpharsi::signal::{ReversalState, SignalState};
use alpharsi::{replay, AlphaRsiEngine, Bar, EngineError, PriceSeries};

fn ranged_bar(index: u64, close: f64) -> Bar {
    Bar::new(index, close, close + 0.5, close - 0.5, close)
}

/// 60 strictly rising closes, then 60 strictly falling
fn rise_then_fall() -> Vec<Bar> {
    (0..120u64)
        .map(|i| {
            let close = if i < 60 {
                100.0 + i as f64
            } else {
                218.0 - i as f64
            };
            ranged_bar(i, close)
        })
        .collect()
}

/// Short warm-up windows: ready from the sixth or seventh bar
fn fast_config(oscillator_period: usize, tolerance: usize) -> EngineConfig {
    EngineConfig {
        oscillator_period,
        smoothing_period: 2,
        atr_period: 3,
        atr_average_length: 4,
        trend_sma_period: 3,
        pivot_lookaround: 2,
        pivot_alignment_tolerance: tolerance,
        ..Default::default()
    }
}

fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| ranged_bar(i as u64, c))
        .collect()
}

fn noisy_bars(n: u64) -> Vec<Bar> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            let close = 50.0 + 3.0 * (t * 0.3).sin() + 2.0 * (t * 0.11).cos();
            let range = 0.2 + 0.5 * (t * 0.05).sin().abs();
            Bar::new(i, close, close + range, close - range, close)
        })
        .collect()
}

#[test]
fn test_rise_then_fall_confirms_one_high() {
    let config = EngineConfig::default();
    let lookaround = config.pivot_lookaround as u64;
    let mut engine = AlphaRsiEngine::new(config).unwrap();

    for bar in rise_then_fall() {
        let index = bar.index;
        engine.advance(bar).unwrap();

        let detector = engine.divergence_detector();
        let price_highs = detector
            .price_pivots()
            .filter(|p| p.kind == PivotKind::High)
            .count();
        let osc_highs = detector
            .oscillator_pivots()
            .filter(|p| p.kind == PivotKind::High)
            .count();
        let expected = usize::from(index >= 59 + lookaround);
        assert_eq!(price_highs, expected, "price highs at bar {}", index);
        assert_eq!(osc_highs, expected, "oscillator highs at bar {}", index);
    }

    let detector = engine.divergence_detector();
    let price_high = detector
        .price_pivots()
        .find(|p| p.kind == PivotKind::High)
        .unwrap();
    let osc_high = detector
        .oscillator_pivots()
        .find(|p| p.kind == PivotKind::High)
        .unwrap();
    assert_eq!(price_high.index, 59);
    assert_eq!(price_high.value, 159.5);
    assert_eq!(osc_high.index, 59);
    assert_eq!(osc_high.value, 100.0);
}

#[test]
fn test_monotonic_series_pin_raw() {
    let mut engine = AlphaRsiEngine::with_defaults();
    let rising: Vec<Bar> = (0..80).map(|i| ranged_bar(i, 10.0 + i as f64)).collect();
    let outputs = replay(&mut engine, &rising).unwrap();
    assert_eq!(outputs.last().unwrap().oscillator.raw, Some(100.0));
    assert_eq!(outputs.last().unwrap().bias, Bias::Up);

    let mut engine = AlphaRsiEngine::with_defaults();
    let falling: Vec<Bar> = (0..80).map(|i| ranged_bar(i, 500.0 - i as f64)).collect();
    let outputs = replay(&mut engine, &falling).unwrap();
    assert_eq!(outputs.last().unwrap().oscillator.raw, Some(0.0));
    assert_eq!(outputs.last().unwrap().bias, Bias::Down);
}

#[test]
fn test_oscillator_stays_in_range() {
    for smoothing_type in [SmoothingType::Sma, SmoothingType::Ema] {
        let config = EngineConfig {
            smoothing_type,
            ..Default::default()
        };
        let mut engine = AlphaRsiEngine::new(config).unwrap();
        for out in replay(&mut engine, &noisy_bars(500)).unwrap() {
            for value in [out.oscillator.raw, out.oscillator.smoothed].into_iter().flatten() {
                assert!((0.0..=100.0).contains(&value));
            }
            assert!(out.levels.ob > out.levels.os);
        }
    }
}

#[test]
fn test_warmup_length() {
    let config = EngineConfig::default();
    let warmup = config.min_warmup_bars();
    let mut engine = AlphaRsiEngine::new(config).unwrap();
    let outputs = replay(&mut engine, &noisy_bars(200)).unwrap();

    assert!(outputs[..warmup].iter().all(|o| !o.ready));
    assert!(outputs[..warmup]
        .iter()
        .all(|o| o.signal == SignalState::None && o.divergence.is_none()));
    assert!(outputs.last().unwrap().ready);
}

#[test]
fn test_replay_is_deterministic() {
    let bars = noisy_bars(400);
    let first = replay(&mut AlphaRsiEngine::with_defaults(), &bars).unwrap();
    let second = replay(&mut AlphaRsiEngine::with_defaults(), &bars).unwrap();
    assert_eq!(first, second);

    let json_a = serde_json::to_string(&first).unwrap();
    let json_b = serde_json::to_string(&second).unwrap();
    assert_eq!(json_a, json_b);
}

#[test]
fn test_gap_stops_replay() {
    let mut bars = noisy_bars(10);
    bars[6].index = 7;
    let mut engine = AlphaRsiEngine::with_defaults();
    let err = replay(&mut engine, &bars).unwrap_err();
    assert_eq!(err, EngineError::Sequencing { expected: 6, got: 7 });
    assert_eq!(engine.last_index(), Some(5));
}

#[test]
fn test_price_series_feeds_engine() {
    let series = PriceSeries::from_bars(noisy_bars(100)).unwrap();
    let mut engine = AlphaRsiEngine::with_defaults();
    let outputs = replay(&mut engine, series.iter()).unwrap();
    assert_eq!(outputs.len(), series.len());
    assert_eq!(outputs[42].index, 42);
}

#[test]
fn test_strong_signals_follow_level_crosses() {
    let closes = [
        100.0, 101.0, 102.0, 103.0, 104.0, 103.0, 101.0, 99.0, 98.0, 99.0, 101.0, 103.0, 105.0,
        106.0, 105.0, 104.0, 102.0, 100.0, 98.0, 97.0, 98.0, 100.0,
    ];
    let mut engine = AlphaRsiEngine::new(fast_config(3, 3)).unwrap();
    let outputs = replay(&mut engine, &bars_from_closes(&closes)).unwrap();

    let signals: Vec<(u64, SignalState)> = outputs
        .iter()
        .filter(|o| !o.signal.is_none())
        .map(|o| (o.index, o.signal))
        .collect();
    assert_eq!(
        signals,
        vec![
            (6, SignalState::StrongBear),
            (10, SignalState::StrongBull),
            (15, SignalState::StrongBear),
            (21, SignalState::StrongBull),
        ]
    );

    // Falling out of the overbought zone in a downtrend
    let bear = &outputs[6];
    assert_eq!(bear.bias, Bias::Down);
    assert!(outputs[5].oscillator.smoothed.unwrap() >= outputs[5].levels.ob);
    assert!(bear.oscillator.smoothed.unwrap() < bear.levels.ob);

    // Rising out of the oversold zone in an uptrend
    let bull = &outputs[10];
    assert_eq!(bull.bias, Bias::Up);
    assert!(outputs[9].oscillator.smoothed.unwrap() <= outputs[9].levels.os);
    assert!(bull.oscillator.smoothed.unwrap() > bull.levels.os);

    // Hook inside the extreme oversold zone one bar before the last cross
    let reversals: Vec<(u64, ReversalState)> = outputs
        .iter()
        .filter(|o| o.reversal != ReversalState::None)
        .map(|o| (o.index, o.reversal))
        .collect();
    assert_eq!(reversals, vec![(20, ReversalState::Bullish)]);
}

#[test]
fn test_bullish_divergence_reaches_output() {
    // Sharp sell-off to 90, rally to a higher high, then a faster flush to 89
    let closes = [
        100.0, 101.0, 102.0, 103.0, 104.0, 105.0, 106.0, 100.0, 94.0, 90.0, 93.0, 97.0, 101.0,
        104.0, 106.0, 108.0, 103.0, 97.0, 89.0, 93.0, 97.0, 100.0,
    ];
    let mut engine = AlphaRsiEngine::new(fast_config(5, 1)).unwrap();
    let outputs = replay(&mut engine, &bars_from_closes(&closes)).unwrap();

    let events: Vec<_> = outputs
        .iter()
        .filter_map(|o| o.divergence.map(|d| (o.index, d)))
        .collect();
    assert_eq!(events.len(), 1);

    let (at, event) = events[0];
    assert_eq!(at, 20);
    assert_eq!(event.kind, DivergenceKind::Bullish);
    assert_eq!((event.price_from.index, event.price_to.index), (9, 18));
    assert_eq!((event.price_from.value, event.price_to.value), (89.5, 88.5));
    assert_eq!((event.osc_from.index, event.osc_to.index), (9, 18));
    assert!(event.osc_to.value > event.osc_from.value);
    assert_eq!(
        Some(event.osc_to.value),
        outputs[18].oscillator.smoothed,
        "oscillator pivot carries the smoothed value"
    );
    assert_eq!(engine.pending_divergences(), 0);
}

#[test]
fn test_same_bar_divergences_are_queued() {
    // (close, half range); bar 15 is an outside bar that is both a High and a Low pivot
    let path = [
        (98.0, 2.0),
        (96.0, 0.5),
        (93.0, 2.0),
        (91.0, 4.0),
        (89.0, 1.0),
        (91.0, 0.5),
        (94.0, 1.0),
        (91.0, 1.0),
        (88.0, 0.5),
        (91.0, 0.5),
        (94.0, 0.5),
        (95.0, 0.5),
        (93.0, 1.0),
        (94.0, 0.5),
        (96.0, 1.0),
        (93.0, 4.0),
        (95.0, 0.5),
        (94.0, 0.5),
        (97.0, 2.0),
    ];
    let bars: Vec<Bar> = path
        .iter()
        .enumerate()
        .map(|(i, &(c, r))| Bar::new(i as u64, c, c + r, c - r, c))
        .collect();

    let mut engine = AlphaRsiEngine::new(fast_config(3, 2)).unwrap();
    let mut outputs = Vec::new();
    let mut pending = Vec::new();
    for bar in &bars {
        outputs.push(engine.advance(*bar).unwrap());
        pending.push(engine.pending_divergences());
    }

    // Both pairs complete when the outside bar confirms on bar 17
    let first = outputs[17].divergence.unwrap();
    assert_eq!(first.kind, DivergenceKind::Bearish);
    assert_eq!((first.price_from.index, first.price_to.index), (11, 15));
    assert_eq!((first.osc_from.index, first.osc_to.index), (11, 14));
    assert_eq!(pending[17], 1);

    let second = outputs[18].divergence.unwrap();
    assert_eq!(second.kind, DivergenceKind::Bullish);
    assert_eq!((second.price_from.index, second.price_to.index), (12, 15));
    assert_eq!((second.osc_from.index, second.osc_to.index), (8, 13));
    assert_eq!(pending[18], 0);

    let emitted = outputs.iter().filter(|o| o.divergence.is_some()).count();
    assert_eq!(emitted, 2);
    assert!(pending[..17].iter().all(|&n| n == 0));
}
