//! Indicator module
//!
//! Streaming building blocks of the adaptive oscillator: volatility ratio,
//! RSI core, adaptive levels and trend bias. Each component owns its own
//! bounded history and is advanced once per bar.

mod levels;
mod oscillator;
mod trend;
mod types;
mod volatility;
mod window;

pub use levels::AdaptiveLevelCalculator;
pub use oscillator::{rsi_value, OscillatorCore};
pub use trend::TrendBiasFilter;
pub use types::{AdaptiveLevels, Bias, OscillatorState, VolatilityState};
pub use volatility::VolatilityTracker;
pub use window::{RollingWindow, WilderAverage};
