//! Price/oscillator divergence detection
//!
//! Each series runs a High and a Low pivot tracker and keeps its most recent
//! confirmed pivots. Whenever a pivot is confirmed, it is paired with the
//! latest unused same-kind pivot of the other series within the alignment
//! tolerance, and both pairs are compared with their predecessors.

use std::collections::VecDeque;

use super::pivot::PivotTracker;
use super::types::{DivergenceEvent, DivergenceKind, PivotKind, PivotPoint};
use crate::config::EngineConfig;
use crate::feed::Bar;

/// Pivots of one series (price or oscillator)
#[derive(Debug, Clone)]
struct SeriesPivots {
    high: PivotTracker,
    low: PivotTracker,
    history: VecDeque<PivotPoint>,
    capacity: usize,
    /// Last pivot index consumed by an event, per kind
    used_high: Option<u64>,
    used_low: Option<u64>,
}

impl SeriesPivots {
    fn new(lookaround: usize, capacity: usize) -> Self {
        Self {
            high: PivotTracker::new(PivotKind::High, lookaround),
            low: PivotTracker::new(PivotKind::Low, lookaround),
            history: VecDeque::with_capacity(capacity),
            capacity,
            used_high: None,
            used_low: None,
        }
    }

    fn record(&mut self, pivot: PivotPoint) {
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(pivot);
    }

    fn used(&self, kind: PivotKind) -> Option<u64> {
        match kind {
            PivotKind::High => self.used_high,
            PivotKind::Low => self.used_low,
        }
    }

    fn mark_used(&mut self, pivot: &PivotPoint) {
        match pivot.kind {
            PivotKind::High => self.used_high = Some(pivot.index),
            PivotKind::Low => self.used_low = Some(pivot.index),
        }
    }

    fn is_unused(&self, pivot: &PivotPoint) -> bool {
        self.used(pivot.kind).map_or(true, |used| pivot.index > used)
    }

    /// Most recent same-kind pivot strictly before `pivot`
    fn predecessor(&self, pivot: &PivotPoint) -> Option<PivotPoint> {
        self.history
            .iter()
            .rev()
            .find(|p| p.kind == pivot.kind && p.index < pivot.index)
            .copied()
    }

    /// Most recent unused pivot of `kind` within `tolerance` bars of `index`
    fn aligned(&self, kind: PivotKind, index: u64, tolerance: u64) -> Option<PivotPoint> {
        self.history
            .iter()
            .rev()
            .find(|p| p.kind == kind && p.index.abs_diff(index) <= tolerance && self.is_unused(p))
            .copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Series {
    Price,
    Oscillator,
}

/// Detects divergences between price pivots and oscillator pivots
#[derive(Debug, Clone)]
pub struct DivergenceDetector {
    price: SeriesPivots,
    oscillator: SeriesPivots,
    tolerance: u64,
}

impl DivergenceDetector {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            price: SeriesPivots::new(config.pivot_lookaround, config.max_pivots),
            oscillator: SeriesPivots::new(config.pivot_lookaround, config.max_pivots),
            tolerance: config.pivot_alignment_tolerance as u64,
        }
    }

    /// Fold in one bar and, if available, its smoothed oscillator value
    ///
    /// Price highs come from `bar.high` and lows from `bar.low`. Returns the
    /// divergences completed on this bar; almost always zero or one.
    pub fn update(&mut self, bar: &Bar, oscillator: Option<f64>) -> Vec<DivergenceEvent> {
        let mut confirmed = Vec::new();

        if let Some(p) = self.price.high.update(bar.index, bar.high) {
            confirmed.push((Series::Price, p));
        }
        if let Some(p) = self.price.low.update(bar.index, bar.low) {
            confirmed.push((Series::Price, p));
        }
        if let Some(value) = oscillator {
            if let Some(p) = self.oscillator.high.update(bar.index, value) {
                confirmed.push((Series::Oscillator, p));
            }
            if let Some(p) = self.oscillator.low.update(bar.index, value) {
                confirmed.push((Series::Oscillator, p));
            }
        }

        let mut events = Vec::new();
        for (series, pivot) in confirmed {
            tracing::debug!(
                series = ?series,
                kind = ?pivot.kind,
                pivot_index = pivot.index,
                value = pivot.value,
                confirmed_at = bar.index,
                "Pivot confirmed"
            );
            match series {
                Series::Price => self.price.record(pivot),
                Series::Oscillator => self.oscillator.record(pivot),
            }
            if let Some(event) = self.pair(series, pivot) {
                events.push(event);
            }
        }
        events
    }

    /// Try to build an event around a freshly confirmed pivot
    fn pair(&mut self, series: Series, pivot: PivotPoint) -> Option<DivergenceEvent> {
        let (price_to, osc_to) = match series {
            Series::Price => {
                let osc = self
                    .oscillator
                    .aligned(pivot.kind, pivot.index, self.tolerance)?;
                (pivot, osc)
            }
            Series::Oscillator => {
                let price = self.price.aligned(pivot.kind, pivot.index, self.tolerance)?;
                (price, pivot)
            }
        };
        if !self.price.is_unused(&price_to) || !self.oscillator.is_unused(&osc_to) {
            return None;
        }

        let price_from = self.price.predecessor(&price_to)?;
        let osc_from = self.oscillator.predecessor(&osc_to)?;

        let kind = match pivot.kind {
            PivotKind::High
                if price_to.value > price_from.value && osc_to.value < osc_from.value =>
            {
                DivergenceKind::Bearish
            }
            PivotKind::Low
                if price_to.value < price_from.value && osc_to.value > osc_from.value =>
            {
                DivergenceKind::Bullish
            }
            _ => return None,
        };

        self.price.mark_used(&price_to);
        self.oscillator.mark_used(&osc_to);

        Some(DivergenceEvent {
            kind,
            price_from,
            price_to,
            osc_from,
            osc_to,
        })
    }

    /// Confirmed price pivots, oldest first
    pub fn price_pivots(&self) -> impl Iterator<Item = &PivotPoint> {
        self.price.history.iter()
    }

    /// Confirmed oscillator pivots, oldest first
    pub fn oscillator_pivots(&self) -> impl Iterator<Item = &PivotPoint> {
        self.oscillator.history.iter()
    }
}
