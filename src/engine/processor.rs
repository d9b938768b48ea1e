//! Bar-by-bar AlphaRSI engine
//!
//! Owns every stateful component and advances them in a fixed order for
//! each bar: volatility, oscillator, levels, trend bias, classification,
//! divergence. A bar is validated before any component sees it, so a
//! rejected bar leaves the engine exactly as it was.

use std::collections::VecDeque;

use super::types::{check_sequence, EngineError, EngineOutput};
use crate::config::EngineConfig;
use crate::divergence::{DivergenceDetector, DivergenceEvent};
use crate::feed::Bar;
use crate::indicator::{
    AdaptiveLevelCalculator, Bias, OscillatorCore, TrendBiasFilter, VolatilityTracker,
};
use crate::signal::{LevelSample, SignalClassifier, SignalState};
use crate::telemetry;

/// Adaptive RSI engine with divergence detection
#[derive(Debug, Clone)]
pub struct AlphaRsiEngine {
    config: EngineConfig,
    volatility: VolatilityTracker,
    oscillator: OscillatorCore,
    levels: AdaptiveLevelCalculator,
    trend: TrendBiasFilter,
    classifier: SignalClassifier,
    divergence: DivergenceDetector,
    /// Divergences waiting for a bar to be reported on
    pending: VecDeque<DivergenceEvent>,
    last_index: Option<u64>,
    ready: bool,
}

impl AlphaRsiEngine {
    /// Create an engine, validating the configuration first
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Create an engine with the default configuration
    pub fn with_defaults() -> Self {
        Self::build(EngineConfig::default())
    }

    fn build(config: EngineConfig) -> Self {
        Self {
            volatility: VolatilityTracker::new(config.atr_period, config.atr_average_length),
            oscillator: OscillatorCore::new(
                config.oscillator_period,
                config.smoothing_period,
                config.smoothing_type,
            ),
            levels: AdaptiveLevelCalculator::new(&config),
            trend: TrendBiasFilter::new(config.trend_sma_period),
            classifier: SignalClassifier::new(config.extreme_os_level, config.extreme_ob_level),
            divergence: DivergenceDetector::new(&config),
            pending: VecDeque::new(),
            last_index: None,
            ready: false,
            config,
        }
    }

    /// Advance the engine by one bar
    ///
    /// Fails with `Sequencing` if the bar does not directly follow the
    /// previous one and with `InvalidBar` if it carries non-finite prices
    /// or `high < low`. Either way no state is touched.
    pub fn advance(&mut self, bar: Bar) -> Result<EngineOutput, EngineError> {
        if let Err(err) = self.check(&bar) {
            telemetry::record_rejected_bar(err.reason());
            tracing::warn!(index = bar.index, error = %err, "Bar rejected");
            return Err(err);
        }

        let volatility = self.volatility.update(&bar);
        let oscillator = self.oscillator.update(bar.close);
        let levels = self.levels.levels(volatility.vr);
        let bias = self.trend.update(bar.close);

        let ready = oscillator.smoothed.is_some() && self.volatility.is_ready() && bias.is_some();
        if ready && !self.ready {
            tracing::debug!(index = bar.index, "Engine warm-up complete");
        }
        self.ready = ready;
        let bias = bias.unwrap_or_default();

        let sample = oscillator.smoothed.map(|s| LevelSample::new(s, levels));
        let (signal, reversal) = self.classifier.update(sample, bias, ready);

        let found = self.divergence.update(&bar, oscillator.smoothed);
        if ready {
            self.pending.extend(found);
        } else if !found.is_empty() {
            tracing::debug!(
                index = bar.index,
                count = found.len(),
                "Discarding divergences found during warm-up"
            );
        }
        let divergence = if ready { self.pending.pop_front() } else { None };

        self.last_index = Some(bar.index);
        self.report(bar.index, signal, bias, divergence.as_ref());

        Ok(EngineOutput {
            index: bar.index,
            oscillator,
            volatility,
            levels,
            bias,
            signal,
            reversal,
            divergence,
            ready,
        })
    }

    fn check(&self, bar: &Bar) -> Result<(), EngineError> {
        check_sequence(self.last_index, bar.index)?;
        if let Some(reason) = bar.defect() {
            return Err(EngineError::InvalidBar {
                index: bar.index,
                reason,
            });
        }
        Ok(())
    }

    fn report(
        &self,
        index: u64,
        signal: SignalState,
        bias: Bias,
        divergence: Option<&DivergenceEvent>,
    ) {
        telemetry::record_bar();

        if !signal.is_none() {
            telemetry::record_signal(signal);
            tracing::info!(index, signal = signal.label(), bias = ?bias, "Strong signal");
        }

        if let Some(event) = divergence {
            telemetry::record_divergence(event.kind);
            tracing::info!(
                index,
                kind = event.kind.label(),
                price_from = event.price_from.index,
                price_to = event.price_to.index,
                osc_from = event.osc_from.index,
                osc_to = event.osc_to.index,
                "Divergence"
            );
        }
    }

    /// Return to the freshly constructed state, keeping the configuration
    pub fn reset(&mut self) {
        *self = Self::build(self.config.clone());
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// True once every warm-up window is satisfied
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Index of the last accepted bar
    pub fn last_index(&self) -> Option<u64> {
        self.last_index
    }

    /// Pivot history used for divergence detection
    pub fn divergence_detector(&self) -> &DivergenceDetector {
        &self.divergence
    }

    /// Divergences detected but not yet reported
    pub fn pending_divergences(&self) -> usize {
        self.pending.len()
    }
}

/// Feed every bar through the engine, stopping at the first error
pub fn replay<'a>(
    engine: &mut AlphaRsiEngine,
    bars: impl IntoIterator<Item = &'a Bar>,
) -> Result<Vec<EngineOutput>, EngineError> {
    bars.into_iter().map(|bar| engine.advance(*bar)).collect()
}
