//! Divergence detection types

use serde::{Deserialize, Serialize};

/// Which extreme a pivot marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PivotKind {
    High,
    Low,
}

impl PivotKind {
    /// Whether `value` is at least as extreme as `other` for this kind
    pub fn reaches(&self, value: f64, other: f64) -> bool {
        match self {
            PivotKind::High => value >= other,
            PivotKind::Low => value <= other,
        }
    }
}

/// A confirmed local extreme
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotPoint {
    /// Bar index of the extreme (not of its confirmation)
    pub index: u64,
    pub value: f64,
    pub kind: PivotKind,
}

/// Direction a divergence points to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DivergenceKind {
    /// Price lower low, oscillator higher low
    Bullish,
    /// Price higher high, oscillator lower high
    Bearish,
}

impl DivergenceKind {
    pub fn label(&self) -> &'static str {
        match self {
            DivergenceKind::Bullish => "bullish",
            DivergenceKind::Bearish => "bearish",
        }
    }
}

/// Price and oscillator pivots moving in opposite directions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DivergenceEvent {
    pub kind: DivergenceKind,
    pub price_from: PivotPoint,
    pub price_to: PivotPoint,
    pub osc_from: PivotPoint,
    pub osc_to: PivotPoint,
}
