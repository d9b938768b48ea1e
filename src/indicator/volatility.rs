//! Volatility ratio from the average true range
//!
//! VR = ATR / mean(ATR over the last L bars). A ratio above 1.0 means the
//! market is moving more than usual, which widens the adaptive levels.

use super::types::VolatilityState;
use super::window::{RollingWindow, WilderAverage};
use crate::feed::Bar;

/// Tracks Wilder ATR and its rolling average
#[derive(Debug, Clone)]
pub struct VolatilityTracker {
    prev_close: Option<f64>,
    atr: WilderAverage,
    atr_history: RollingWindow,
}

impl VolatilityTracker {
    /// Create a tracker with the ATR period and the ATR averaging length L
    pub fn new(atr_period: usize, average_length: usize) -> Self {
        Self {
            prev_close: None,
            atr: WilderAverage::new(atr_period),
            atr_history: RollingWindow::new(average_length),
        }
    }

    /// Fold in a new bar
    ///
    /// VR stays at the neutral 1.0 until L ATR values exist; a partially
    /// filled average is never used. A zero average (no movement at all)
    /// or a ratio that overflows also yields 1.0.
    pub fn update(&mut self, bar: &Bar) -> VolatilityState {
        let tr = bar.true_range(self.prev_close);
        self.prev_close = Some(bar.close);

        let Some(atr) = self.atr.update(tr) else {
            return VolatilityState::default();
        };
        self.atr_history.push(atr);

        let atr_avg = self.atr_history.mean();
        let vr = match atr_avg {
            Some(avg) if avg > 0.0 && (atr / avg).is_finite() => atr / avg,
            _ => 1.0,
        };

        VolatilityState {
            atr: Some(atr),
            atr_avg,
            vr,
        }
    }

    /// True once the ATR average window is full
    pub fn is_ready(&self) -> bool {
        self.atr_history.is_full()
    }
}
