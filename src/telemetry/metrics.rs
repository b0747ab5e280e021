//! Calculation and session metrics
//!
//! Recorded through the `metrics` facade. Without an installed recorder the
//! calls are no-ops.

use std::time::Duration;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Position sizing latency
    PositionCalculation,
}

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Successful position calculations
    CalculationsSucceeded,
    /// Rejected or failed position calculations
    CalculationsFailed,
    /// Trades recorded in the session
    TradesRecorded,
    /// Alerts raised
    AlertsRaised,
}

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Current equity
    Equity,
    /// Daily P&L
    DailyPnl,
    /// Current drawdown percentage
    DrawdownPct,
    /// Session win rate percentage
    WinRatePct,
}

impl LatencyMetric {
    fn name(self) -> &'static str {
        match self {
            LatencyMetric::PositionCalculation => "fxrisk_position_calculation_latency_us",
        }
    }
}

impl CounterMetric {
    fn name(self) -> &'static str {
        match self {
            CounterMetric::CalculationsSucceeded => "fxrisk_calculations_succeeded_total",
            CounterMetric::CalculationsFailed => "fxrisk_calculations_failed_total",
            CounterMetric::TradesRecorded => "fxrisk_trades_recorded_total",
            CounterMetric::AlertsRaised => "fxrisk_alerts_raised_total",
        }
    }
}

impl GaugeMetric {
    fn name(self) -> &'static str {
        match self {
            GaugeMetric::Equity => "fxrisk_equity_usd",
            GaugeMetric::DailyPnl => "fxrisk_daily_pnl_usd",
            GaugeMetric::DrawdownPct => "fxrisk_drawdown_pct",
            GaugeMetric::WinRatePct => "fxrisk_win_rate_pct",
        }
    }
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    ::metrics::histogram!(metric.name()).record(duration.as_secs_f64() * 1_000_000.0);
}

/// Increment a counter by one
pub fn increment_counter(metric: CounterMetric) {
    ::metrics::counter!(metric.name()).increment(1);
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: Decimal) {
    let value = value.to_f64().unwrap_or_default();
    ::metrics::gauge!(metric.name()).set(value);
}
