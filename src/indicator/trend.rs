//! Trend bias from the slope of a long simple moving average

use super::types::Bias;
use super::window::RollingWindow;

#[derive(Debug, Clone)]
pub struct TrendBiasFilter {
    closes: RollingWindow,
    prev_sma: Option<f64>,
}

impl TrendBiasFilter {
    pub fn new(period: usize) -> Self {
        Self {
            closes: RollingWindow::new(period),
            prev_sma: None,
        }
    }

    /// Fold in a close; `None` until two consecutive SMA values exist
    pub fn update(&mut self, close: f64) -> Option<Bias> {
        self.closes.push(close);
        let sma = self.closes.mean()?;
        let prev = self.prev_sma.replace(sma)?;

        Some(if sma > prev {
            Bias::Up
        } else if sma < prev {
            Bias::Down
        } else {
            Bias::Flat
        })
    }
}
