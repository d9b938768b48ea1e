//! Signal types

use serde::{Deserialize, Serialize};

use crate::indicator::AdaptiveLevels;

/// Trend-confirmed crossover of an adaptive level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SignalState {
    #[default]
    None,
    /// Smoothed RSI crossed up through the oversold level in an uptrend
    StrongBull,
    /// Smoothed RSI crossed down through the overbought level in a downtrend
    StrongBear,
}

impl SignalState {
    pub fn is_none(&self) -> bool {
        *self == SignalState::None
    }

    pub fn label(&self) -> &'static str {
        match self {
            SignalState::None => "none",
            SignalState::StrongBull => "strong_bull",
            SignalState::StrongBear => "strong_bear",
        }
    }
}

/// Hook turn of the smoothed RSI inside an extreme zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReversalState {
    #[default]
    None,
    /// Below the extreme oversold level and turning up
    Bullish,
    /// Above the extreme overbought level and turning down
    Bearish,
}

/// Smoothed oscillator value together with the levels active on that bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelSample {
    pub smoothed: f64,
    pub levels: AdaptiveLevels,
}

impl LevelSample {
    pub fn new(smoothed: f64, levels: AdaptiveLevels) -> Self {
        Self { smoothed, levels }
    }
}
