//! Adaptive overbought/oversold levels

use super::types::AdaptiveLevels;
use crate::config::EngineConfig;

/// Maps a volatility ratio onto bounded OB/OS thresholds
///
/// `adjustment = (vr - 1) * sensitivity`; the overbought level moves up by
/// the adjustment and the oversold level moves down, each clamped to its
/// configured range. Stateless.
#[derive(Debug, Clone)]
pub struct AdaptiveLevelCalculator {
    sensitivity: f64,
    base_ob: f64,
    base_os: f64,
    ob_min: f64,
    ob_max: f64,
    os_min: f64,
    os_max: f64,
}

impl AdaptiveLevelCalculator {
    /// Build from a validated configuration
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            sensitivity: config.sensitivity,
            base_ob: config.base_ob,
            base_os: config.base_os,
            ob_min: config.ob_min,
            ob_max: config.ob_max,
            os_min: config.os_min,
            os_max: config.os_max,
        }
    }

    pub fn levels(&self, vr: f64) -> AdaptiveLevels {
        let adjustment = (vr - 1.0) * self.sensitivity;
        AdaptiveLevels {
            ob: (self.base_ob + adjustment).clamp(self.ob_min, self.ob_max),
            os: (self.base_os - adjustment).clamp(self.os_min, self.os_max),
        }
    }
}
