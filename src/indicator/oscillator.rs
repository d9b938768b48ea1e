//! Bounded momentum oscillator (RSI) with a smoothing stage
//!
//! ```text
//! RS  = avg_gain / avg_loss          (Wilder averages of close-to-close changes)
//! RSI = 100 - 100 / (1 + RS)
//! ```
//!
//! Flat prices (no gains, no losses) read 50. Only gains read 100.

use super::types::OscillatorState;
use super::window::{RollingWindow, WilderAverage};
use crate::config::SmoothingType;

/// Second-stage average applied to the raw oscillator
#[derive(Debug, Clone)]
enum Smoother {
    Sma(RollingWindow),
    Ema {
        period: usize,
        alpha: f64,
        seed_sum: f64,
        seed_count: usize,
        value: Option<f64>,
    },
}

impl Smoother {
    fn new(kind: SmoothingType, period: usize) -> Self {
        match kind {
            SmoothingType::Sma => Smoother::Sma(RollingWindow::new(period)),
            SmoothingType::Ema => Smoother::Ema {
                period,
                alpha: 2.0 / (period as f64 + 1.0),
                seed_sum: 0.0,
                seed_count: 0,
                value: None,
            },
        }
    }

    fn update(&mut self, sample: f64) -> Option<f64> {
        match self {
            Smoother::Sma(window) => {
                window.push(sample);
                window.mean()
            }
            Smoother::Ema {
                period,
                alpha,
                seed_sum,
                seed_count,
                value,
            } => {
                *value = match *value {
                    Some(prev) => Some(prev + *alpha * (sample - prev)),
                    None => {
                        *seed_sum += sample;
                        *seed_count += 1;
                        (*seed_count == *period).then(|| *seed_sum / *period as f64)
                    }
                };
                *value
            }
        }
    }
}

/// Raw and smoothed RSI, updated one close at a time
#[derive(Debug, Clone)]
pub struct OscillatorCore {
    prev_close: Option<f64>,
    avg_gain: WilderAverage,
    avg_loss: WilderAverage,
    smoother: Smoother,
}

impl OscillatorCore {
    pub fn new(period: usize, smoothing_period: usize, smoothing_type: SmoothingType) -> Self {
        Self {
            prev_close: None,
            avg_gain: WilderAverage::new(period),
            avg_loss: WilderAverage::new(period),
            smoother: Smoother::new(smoothing_type, smoothing_period),
        }
    }

    /// Fold in a new close
    ///
    /// `raw` appears once `period` changes have been seen (period + 1 closes);
    /// `smoothed` once the smoother has collected its own window of raw values.
    pub fn update(&mut self, close: f64) -> OscillatorState {
        let Some(prev) = self.prev_close.replace(close) else {
            return OscillatorState::default();
        };

        let change = close - prev;
        let gain = self.avg_gain.update(change.max(0.0));
        let loss = self.avg_loss.update((-change).max(0.0));

        let (Some(gain), Some(loss)) = (gain, loss) else {
            return OscillatorState::default();
        };

        let raw = rsi_value(gain, loss);
        let smoothed = self.smoother.update(raw).map(|v| v.clamp(0.0, 100.0));

        OscillatorState {
            raw: Some(raw),
            smoothed,
        }
    }
}

/// RSI from Wilder averages, with the zero-loss edge cases pinned down
pub fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            return 50.0;
        }
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    // Both averages overflowed to infinity
    if rs.is_nan() {
        return 50.0;
    }
    (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
}
