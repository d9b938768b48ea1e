//! Price feed types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single OHLC bar from the price series
///
/// Bars are produced by the external feed and never mutated by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Running bar index (must advance by exactly one per bar)
    pub index: u64,
    /// Bar open time, if the feed provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Bar {
    /// Create a bar without a timestamp
    pub fn new(index: u64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            index,
            timestamp: None,
            open,
            high,
            low,
            close,
        }
    }

    /// Attach an open time
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// True range against the previous close
    ///
    /// Without a previous close the range is just `high - low`.
    pub fn true_range(&self, prev_close: Option<f64>) -> f64 {
        let hl = self.high - self.low;
        match prev_close {
            Some(pc) => hl.max((self.high - pc).abs()).max((self.low - pc).abs()),
            None => hl,
        }
    }

    /// Describe why this bar cannot be fed to the engine, if anything
    pub fn defect(&self) -> Option<&'static str> {
        if ![self.open, self.high, self.low, self.close]
            .iter()
            .all(|v| v.is_finite())
        {
            return Some("non-finite price");
        }
        if self.high < self.low {
            return Some("high below low");
        }
        None
    }
}
