//! Engine module
//!
//! Ties the indicator, signal and divergence components together behind a
//! single `advance(bar)` call.

mod processor;
mod types;

pub use processor::{replay, AlphaRsiEngine};
pub(crate) use types::check_sequence;
pub use types::{EngineError, EngineOutput};
