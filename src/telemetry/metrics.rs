//! Prometheus metrics
//!
//! Recorded through the `metrics` facade; these are no-ops until an
//! exporter is installed.

use std::time::Duration;

use crate::divergence::DivergenceKind;
use crate::signal::SignalState;

/// Count a bar accepted by the engine
pub fn record_bar() {
    metrics::counter!("alpharsi_bars_total").increment(1);
}

/// Count a strong signal
pub fn record_signal(signal: SignalState) {
    if signal.is_none() {
        return;
    }
    metrics::counter!("alpharsi_signals_total", "kind" => signal.label()).increment(1);
}

/// Count an emitted divergence
pub fn record_divergence(kind: DivergenceKind) {
    metrics::counter!("alpharsi_divergences_total", "kind" => kind.label()).increment(1);
}

/// Count a bar the engine refused
pub fn record_rejected_bar(reason: &'static str) {
    metrics::counter!("alpharsi_rejected_bars_total", "reason" => reason).increment(1);
}

/// Record how long a single advance took
pub fn record_advance_latency(duration: Duration) {
    metrics::histogram!("alpharsi_replay_latency_us").record(duration.as_secs_f64() * 1e6);
}
