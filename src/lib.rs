//! alpharsi: adaptive RSI oscillator with divergence detection
//!
//! This library provides the core components for:
//! - Bar input and contiguous price series
//! - Volatility ratio from Wilder ATR
//! - Smoothed RSI with volatility-adaptive overbought/oversold levels
//! - Trend bias from a long SMA slope
//! - Strong signal and extreme reversal classification
//! - Pivot confirmation and price/oscillator divergence detection
//! - A single-threaded engine driving all of the above bar by bar
//! - Logging and Prometheus metrics

pub mod cli;
pub mod config;
pub mod divergence;
pub mod engine;
pub mod feed;
pub mod indicator;
pub mod signal;
pub mod telemetry;

pub use engine::{replay, AlphaRsiEngine, EngineError, EngineOutput};
pub use feed::{Bar, PriceSeries};
