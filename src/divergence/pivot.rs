//! Two-phase pivot confirmation
//!
//! A value becomes a candidate when none of the preceding `lookaround`
//! values is more extreme. It is confirmed once the following `lookaround`
//! values are all strictly less extreme; any later value that reaches it
//! cancels the candidate. Confirmation therefore lags the extreme by exactly
//! `lookaround` bars, and a constant series never produces a pivot.

use std::collections::VecDeque;

use super::types::{PivotKind, PivotPoint};

#[derive(Debug, Clone, PartialEq)]
enum PivotState {
    Scanning,
    PendingConfirmation {
        candidate: PivotPoint,
        bars_after: usize,
    },
}

/// Confirms pivots of one kind in one series
#[derive(Debug, Clone)]
pub struct PivotTracker {
    kind: PivotKind,
    lookaround: usize,
    left: VecDeque<f64>,
    state: PivotState,
}

impl PivotTracker {
    pub fn new(kind: PivotKind, lookaround: usize) -> Self {
        Self {
            kind,
            lookaround,
            left: VecDeque::with_capacity(lookaround),
            state: PivotState::Scanning,
        }
    }

    /// Feed the next value; returns a pivot confirmed on this bar
    pub fn update(&mut self, index: u64, value: f64) -> Option<PivotPoint> {
        let mut confirmed = None;

        self.state = match std::mem::replace(&mut self.state, PivotState::Scanning) {
            PivotState::PendingConfirmation {
                candidate,
                bars_after,
            } => {
                if self.kind.reaches(value, candidate.value) {
                    PivotState::Scanning
                } else if bars_after + 1 == self.lookaround {
                    confirmed = Some(candidate);
                    PivotState::Scanning
                } else {
                    PivotState::PendingConfirmation {
                        candidate,
                        bars_after: bars_after + 1,
                    }
                }
            }
            PivotState::Scanning => PivotState::Scanning,
        };

        if self.state == PivotState::Scanning
            && self.left.len() == self.lookaround
            && self.left.iter().all(|&v| self.kind.reaches(value, v))
        {
            self.state = PivotState::PendingConfirmation {
                candidate: PivotPoint {
                    index,
                    value,
                    kind: self.kind,
                },
                bars_after: 0,
            };
        }

        if self.left.len() == self.lookaround {
            self.left.pop_front();
        }
        self.left.push_back(value);

        confirmed
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, PivotState::PendingConfirmation { .. })
    }
}
