//! Telemetry module
//!
//! Structured logging and metrics

mod logging;
mod metrics;

pub use self::logging::{init_logging, LogFormat};
pub use self::metrics::{
    increment_counter, record_latency, set_gauge, CounterMetric, GaugeMetric, LatencyMetric,
};

use crate::config::TelemetryConfig;

/// Guard that keeps telemetry alive for the life of the process
pub struct TelemetryGuard {
    _priv: (),
}

/// Initialize all telemetry subsystems
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<TelemetryGuard> {
    init_logging(&config.log_level, LogFormat::from_json_flag(config.json_logs))?;
    Ok(TelemetryGuard { _priv: () })
}
