//! fx-risk: Forex position sizing and trading session risk tracking
//!
//! This library provides the core components for:
//! - Instrument registry with per-class pip and margin conventions
//! - Fixed-risk position sizing with 1:1 take-profit targets
//! - Session tracking of equity, drawdown and win rate
//! - Threshold alerts for drawdown, daily target, risk and margin rules
//! - Configuration, structured logging and metrics

pub mod alerts;
pub mod cli;
pub mod config;
pub mod instrument;
pub mod session;
pub mod sizing;
pub mod telemetry;

pub use alerts::{Alert, AlertBoard, AlertKind, AlertPolicy, Severity};
pub use config::Config;
pub use instrument::{Instrument, InstrumentClass, InstrumentRegistry, InstrumentSpec};
pub use session::{DerivedMetrics, SessionState, SessionTracker, SharedSessionTracker};
pub use sizing::{
    Direction, PositionResult, PositionSizer, PositionSizingEngine, SizingError, TradeRequest,
};
