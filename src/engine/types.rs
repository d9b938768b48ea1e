//! Engine output and error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;
use crate::divergence::DivergenceEvent;
use crate::indicator::{AdaptiveLevels, Bias, OscillatorState, VolatilityState};
use crate::signal::{ReversalState, SignalState};

/// Everything the engine knows after one bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineOutput {
    /// Index of the bar this output belongs to
    pub index: u64,
    pub oscillator: OscillatorState,
    pub volatility: VolatilityState,
    pub levels: AdaptiveLevels,
    pub bias: Bias,
    pub signal: SignalState,
    pub reversal: ReversalState,
    pub divergence: Option<DivergenceEvent>,
    /// False until every warm-up window is satisfied; signal, reversal and
    /// divergence are inert until then
    pub ready: bool,
}

impl EngineOutput {
    /// True if this bar carries a signal, a reversal or a divergence
    pub fn is_actionable(&self) -> bool {
        !self.signal.is_none() || self.reversal != ReversalState::None || self.divergence.is_some()
    }
}

/// Engine errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// `expected` saturates at `u64::MAX` once the index space is used up;
    /// no bar can follow index `u64::MAX`.
    #[error("bar sequencing violated: expected index {expected}, got {got}")]
    Sequencing { expected: u64, got: u64 },

    #[error("invalid bar at index {index}: {reason}")]
    InvalidBar { index: u64, reason: &'static str },
}

impl EngineError {
    /// Short label used for the rejected-bar counter
    pub fn reason(&self) -> &'static str {
        match self {
            EngineError::Config(_) => "config",
            EngineError::Sequencing { .. } => "sequencing",
            EngineError::InvalidBar { .. } => "invalid_bar",
        }
    }
}

/// Check that `got` directly follows `last`; any index may start a sequence
pub(crate) fn check_sequence(last: Option<u64>, got: u64) -> Result<(), EngineError> {
    let Some(last) = last else {
        return Ok(());
    };
    match last.checked_add(1) {
        Some(expected) if expected == got => Ok(()),
        Some(expected) => Err(EngineError::Sequencing { expected, got }),
        None => Err(EngineError::Sequencing {
            expected: u64::MAX,
            got,
        }),
    }
}
