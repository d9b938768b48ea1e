//! Configuration types for alpharsi

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("loading config from {}", path.display()))
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content).context("parsing config")?;
        config.engine.validate()?;
        Ok(config)
    }
}

/// How the raw oscillator is smoothed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmoothingType {
    #[default]
    Sma,
    Ema,
}

/// Engine parameters, fixed for the lifetime of an engine instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Gain/loss averaging period of the raw oscillator
    #[serde(default = "default_oscillator_period")]
    pub oscillator_period: usize,

    /// Smoothing window m applied to the raw oscillator
    #[serde(default = "default_smoothing_period")]
    pub smoothing_period: usize,

    #[serde(default)]
    pub smoothing_type: SmoothingType,

    /// True range averaging period
    #[serde(default = "default_atr_period")]
    pub atr_period: usize,

    /// Number of ATR values averaged for the volatility ratio (L)
    #[serde(default = "default_atr_average_length")]
    pub atr_average_length: usize,

    /// Level shift per unit of volatility ratio above 1.0
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f64,

    #[serde(default = "default_base_ob")]
    pub base_ob: f64,
    #[serde(default = "default_base_os")]
    pub base_os: f64,
    #[serde(default = "default_ob_min")]
    pub ob_min: f64,
    #[serde(default = "default_ob_max")]
    pub ob_max: f64,
    #[serde(default = "default_os_min")]
    pub os_min: f64,
    #[serde(default = "default_os_max")]
    pub os_max: f64,

    /// Long moving average period for the trend bias
    #[serde(default = "default_trend_sma_period")]
    pub trend_sma_period: usize,

    /// Bars required on each side of a pivot before it is confirmed
    #[serde(default = "default_pivot_lookaround")]
    pub pivot_lookaround: usize,

    /// Confirmed pivots retained per series
    #[serde(default = "default_max_pivots")]
    pub max_pivots: usize,

    /// Maximum bar distance between a price pivot and its oscillator pivot
    #[serde(default = "default_pivot_alignment_tolerance")]
    pub pivot_alignment_tolerance: usize,

    #[serde(default = "default_extreme_ob_level")]
    pub extreme_ob_level: f64,
    #[serde(default = "default_extreme_os_level")]
    pub extreme_os_level: f64,
}

fn default_oscillator_period() -> usize {
    14
}
fn default_smoothing_period() -> usize {
    5
}
fn default_atr_period() -> usize {
    14
}
fn default_atr_average_length() -> usize {
    50
}
fn default_sensitivity() -> f64 {
    20.0
}
fn default_base_ob() -> f64 {
    70.0
}
fn default_base_os() -> f64 {
    30.0
}
fn default_ob_min() -> f64 {
    65.0
}
fn default_ob_max() -> f64 {
    85.0
}
fn default_os_min() -> f64 {
    15.0
}
fn default_os_max() -> f64 {
    35.0
}
fn default_trend_sma_period() -> usize {
    50
}
fn default_pivot_lookaround() -> usize {
    5
}
fn default_max_pivots() -> usize {
    10
}
fn default_pivot_alignment_tolerance() -> usize {
    3
}
fn default_extreme_ob_level() -> f64 {
    80.0
}
fn default_extreme_os_level() -> f64 {
    20.0
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            oscillator_period: default_oscillator_period(),
            smoothing_period: default_smoothing_period(),
            smoothing_type: SmoothingType::Sma,
            atr_period: default_atr_period(),
            atr_average_length: default_atr_average_length(),
            sensitivity: default_sensitivity(),
            base_ob: default_base_ob(),
            base_os: default_base_os(),
            ob_min: default_ob_min(),
            ob_max: default_ob_max(),
            os_min: default_os_min(),
            os_max: default_os_max(),
            trend_sma_period: default_trend_sma_period(),
            pivot_lookaround: default_pivot_lookaround(),
            max_pivots: default_max_pivots(),
            pivot_alignment_tolerance: default_pivot_alignment_tolerance(),
            extreme_ob_level: default_extreme_ob_level(),
            extreme_os_level: default_extreme_os_level(),
        }
    }
}

/// Invalid engine configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be at least 1")]
    NonPositivePeriod { name: &'static str },

    #[error("{name} must be finite")]
    NonFinite { name: &'static str },

    #[error("{name} bounds inverted: min {min} > max {max}")]
    InvalidBounds {
        name: &'static str,
        min: f64,
        max: f64,
    },

    #[error("oversold ceiling {os_max} must be below overbought floor {ob_min}")]
    OverlappingBands { os_max: f64, ob_min: f64 },

    #[error("extreme levels must satisfy 0 <= {os} < {ob} <= 100")]
    InvalidExtremeLevels { os: f64, ob: f64 },

    #[error("pivot lookaround window is empty")]
    EmptyPivotWindow,

    #[error("at least 2 retained pivots are needed, got {0}")]
    TooFewPivots(usize),
}

impl EngineConfig {
    /// Check every invariant the engine relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            ("oscillator_period", self.oscillator_period),
            ("smoothing_period", self.smoothing_period),
            ("atr_period", self.atr_period),
            ("atr_average_length", self.atr_average_length),
            ("trend_sma_period", self.trend_sma_period),
        ];
        for (name, value) in periods {
            if value == 0 {
                return Err(ConfigError::NonPositivePeriod { name });
            }
        }

        let levels = [
            ("sensitivity", self.sensitivity),
            ("base_ob", self.base_ob),
            ("base_os", self.base_os),
            ("ob_min", self.ob_min),
            ("ob_max", self.ob_max),
            ("os_min", self.os_min),
            ("os_max", self.os_max),
            ("extreme_ob_level", self.extreme_ob_level),
            ("extreme_os_level", self.extreme_os_level),
        ];
        for (name, value) in levels {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name });
            }
        }

        if self.ob_min > self.ob_max {
            return Err(ConfigError::InvalidBounds {
                name: "overbought",
                min: self.ob_min,
                max: self.ob_max,
            });
        }
        if self.os_min > self.os_max {
            return Err(ConfigError::InvalidBounds {
                name: "oversold",
                min: self.os_min,
                max: self.os_max,
            });
        }
        // Clamping keeps ob >= ob_min and os <= os_max, so this is what guarantees ob > os
        if self.os_max >= self.ob_min {
            return Err(ConfigError::OverlappingBands {
                os_max: self.os_max,
                ob_min: self.ob_min,
            });
        }

        let (eos, eob) = (self.extreme_os_level, self.extreme_ob_level);
        if !(0.0..=100.0).contains(&eos) || !(0.0..=100.0).contains(&eob) || eos >= eob {
            return Err(ConfigError::InvalidExtremeLevels { os: eos, ob: eob });
        }

        if self.pivot_lookaround == 0 {
            return Err(ConfigError::EmptyPivotWindow);
        }
        if self.max_pivots < 2 {
            return Err(ConfigError::TooFewPivots(self.max_pivots));
        }

        Ok(())
    }

    /// Bars that must be seen before the engine can possibly report ready
    pub fn min_warmup_bars(&self) -> usize {
        self.oscillator_period
            .max(self.smoothing_period)
            .max(self.atr_average_length)
            .max(self.trend_sma_period)
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Prometheus exporter port; no exporter when unset
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
            metrics_port: None,
        }
    }
}
