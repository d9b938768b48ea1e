//! Divergence detection module
//!
//! Confirms local highs and lows in price and in the smoothed oscillator,
//! then flags pairs of pivots that move in opposite directions.

mod detector;
mod pivot;
mod types;

pub use detector::DivergenceDetector;
pub use pivot::PivotTracker;
pub use types::{DivergenceEvent, DivergenceKind, PivotKind, PivotPoint};
