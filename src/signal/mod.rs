//! Signal generation module
//!
//! Turns smoothed oscillator crossovers of the adaptive levels into
//! trend-confirmed strong signals, plus extreme-zone reversal hooks.

mod classifier;
mod types;

pub use classifier::{classify, detect_reversal, SignalClassifier};
pub use types::{LevelSample, ReversalState, SignalState};
