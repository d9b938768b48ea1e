//! Append-only bar series loaded from disk or built in memory

use std::path::Path;

use anyhow::Context;

use super::Bar;
use crate::engine::{check_sequence, EngineError};

/// Read-only, append-only series of contiguous bars
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Create an empty series
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from bars, rejecting gaps or reordering
    pub fn from_bars(bars: impl IntoIterator<Item = Bar>) -> Result<Self, EngineError> {
        let mut series = Self::new();
        for bar in bars {
            series.push(bar)?;
        }
        Ok(series)
    }

    /// Load a JSON array of bars
    pub fn load_json(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading bars from {}", path.display()))?;
        let bars: Vec<Bar> = serde_json::from_str(&content)
            .with_context(|| format!("parsing bars from {}", path.display()))?;
        let series = Self::from_bars(bars)?;
        tracing::debug!(path = %path.display(), bars = series.len(), "Loaded price series");
        Ok(series)
    }

    /// Append a bar; its index must follow the last one
    pub fn push(&mut self, bar: Bar) -> Result<(), EngineError> {
        check_sequence(self.bars.last().map(|b| b.index), bar.index)?;
        self.bars.push(bar);
        Ok(())
    }

    /// Look up a bar by its running index
    pub fn get(&self, index: u64) -> Option<&Bar> {
        let first = self.bars.first()?.index;
        let offset = index.checked_sub(first)?;
        self.bars.get(usize::try_from(offset).ok()?)
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }
}
