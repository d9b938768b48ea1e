//! Crossover classification against adaptive levels

use super::types::{LevelSample, ReversalState, SignalState};
use crate::indicator::Bias;

/// Classify one bar given the previous one
///
/// A cross needs a strict change of side: touching a level exactly counts
/// as not crossed yet. Each bar is compared against its own levels.
pub fn classify(prev: &LevelSample, curr: &LevelSample, bias: Bias) -> SignalState {
    let crossed_up_os = prev.smoothed <= prev.levels.os && curr.smoothed > curr.levels.os;
    let crossed_down_ob = prev.smoothed >= prev.levels.ob && curr.smoothed < curr.levels.ob;

    match bias {
        Bias::Up if crossed_up_os => SignalState::StrongBull,
        Bias::Down if crossed_down_ob => SignalState::StrongBear,
        _ => SignalState::None,
    }
}

/// Detect a hook inside the extreme zones from three consecutive values
pub fn detect_reversal(
    before: f64,
    prev: f64,
    curr: f64,
    extreme_os: f64,
    extreme_ob: f64,
) -> ReversalState {
    if curr < extreme_os && curr > prev && prev < before {
        ReversalState::Bullish
    } else if curr > extreme_ob && curr < prev && prev > before {
        ReversalState::Bearish
    } else {
        ReversalState::None
    }
}

/// Keeps the two previous smoothed samples the classification needs
#[derive(Debug, Clone)]
pub struct SignalClassifier {
    extreme_os: f64,
    extreme_ob: f64,
    prev: Option<LevelSample>,
    before: Option<f64>,
}

impl SignalClassifier {
    pub fn new(extreme_os: f64, extreme_ob: f64) -> Self {
        Self {
            extreme_os,
            extreme_ob,
            prev: None,
            before: None,
        }
    }

    /// Record this bar's sample and classify it
    ///
    /// History is recorded even while `ready` is false so the first ready
    /// bar can already be compared against its predecessor.
    pub fn update(
        &mut self,
        sample: Option<LevelSample>,
        bias: Bias,
        ready: bool,
    ) -> (SignalState, ReversalState) {
        let Some(curr) = sample else {
            self.prev = None;
            self.before = None;
            return (SignalState::None, ReversalState::None);
        };

        let mut signal = SignalState::None;
        let mut reversal = ReversalState::None;
        if ready {
            if let Some(prev) = &self.prev {
                signal = classify(prev, &curr, bias);
                if let Some(before) = self.before {
                    reversal = detect_reversal(
                        before,
                        prev.smoothed,
                        curr.smoothed,
                        self.extreme_os,
                        self.extreme_ob,
                    );
                }
            }
        }

        self.before = self.prev.map(|p| p.smoothed);
        self.prev = Some(curr);
        (signal, reversal)
    }
}
