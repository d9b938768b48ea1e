//! Per-bar indicator state

use serde::{Deserialize, Serialize};

/// Volatility snapshot for one bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityState {
    /// Wilder ATR, once `atr_period` true ranges are seen
    pub atr: Option<f64>,
    /// Mean of the last L ATR values, once L are seen
    pub atr_avg: Option<f64>,
    /// ATR / average ATR; 1.0 while warming up or when the average is zero
    pub vr: f64,
}

impl Default for VolatilityState {
    fn default() -> Self {
        Self {
            atr: None,
            atr_avg: None,
            vr: 1.0,
        }
    }
}

/// Oscillator values for one bar
///
/// `None` means "not enough history yet", never a neutral reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OscillatorState {
    /// Unsmoothed RSI in [0, 100]
    pub raw: Option<f64>,
    /// Moving average of `raw` in [0, 100]
    pub smoothed: Option<f64>,
}

/// Volatility-adjusted overbought/oversold thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveLevels {
    pub ob: f64,
    pub os: f64,
}

/// Direction of the long moving average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Bias {
    Up,
    Down,
    /// Moving average unchanged from the previous bar
    #[default]
    Flat,
}

impl Bias {
    /// +1 / -1 / 0
    pub fn sign(&self) -> i8 {
        match self {
            Bias::Up => 1,
            Bias::Down => -1,
            Bias::Flat => 0,
        }
    }
}
