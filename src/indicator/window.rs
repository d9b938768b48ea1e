//! Fixed-length rolling buffers shared by the indicators

use std::collections::VecDeque;

/// Bounded FIFO of the most recent `capacity` samples
///
/// The mean is recomputed from the buffer contents on every call, so two
/// windows holding the same samples always report bit-identical means.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    values: VecDeque<f64>,
    capacity: usize,
}

impl RollingWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            values: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a sample, evicting the oldest one once full
    pub fn push(&mut self, value: f64) -> Option<f64> {
        let evicted = if self.values.len() == self.capacity {
            self.values.pop_front()
        } else {
            None
        };
        self.values.push_back(value);
        evicted
    }

    pub fn is_full(&self) -> bool {
        self.values.len() == self.capacity
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Mean over a full window; `None` during warm-up
    pub fn mean(&self) -> Option<f64> {
        if !self.is_full() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.capacity as f64)
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.values.iter()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// Wilder's running average
///
/// Seeded with the simple mean of the first `period` samples, then
/// `avg = (prev * (period - 1) + x) / period`.
#[derive(Debug, Clone)]
pub struct WilderAverage {
    period: usize,
    seed_sum: f64,
    seed_count: usize,
    value: Option<f64>,
}

impl WilderAverage {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            seed_sum: 0.0,
            seed_count: 0,
            value: None,
        }
    }

    pub fn update(&mut self, sample: f64) -> Option<f64> {
        let n = self.period as f64;
        self.value = match self.value {
            Some(prev) => Some((prev * (n - 1.0) + sample) / n),
            None => {
                self.seed_sum += sample;
                self.seed_count += 1;
                (self.seed_count == self.period).then(|| self.seed_sum / n)
            }
        };
        self.value
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }
}
