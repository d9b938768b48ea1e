//! Price feed module
//!
//! Bars consumed by the engine, plus an append-only series accessor

mod series;
mod types;

pub use series::PriceSeries;
pub use types::Bar;
