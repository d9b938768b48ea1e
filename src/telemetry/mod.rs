//! Telemetry module
//!
//! Logging and metrics

mod logging;
mod metrics;

pub use logging::init_logging;
pub use metrics::{
    record_advance_latency, record_bar, record_divergence, record_rejected_bar, record_signal,
};

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::config::TelemetryConfig;

/// Guard that cleans up telemetry on drop
pub struct TelemetryGuard {
    _priv: (),
}

/// Initialize all telemetry subsystems
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<TelemetryGuard> {
    init_logging(&config.log_level, config.log_format)?;

    if let Some(port) = config.metrics_port {
        PrometheusBuilder::new()
            .with_http_listener(([0, 0, 0, 0], port))
            .install()?;
        tracing::info!(port, "Prometheus exporter listening");
    }

    Ok(TelemetryGuard { _priv: () })
}
