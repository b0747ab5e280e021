//! Trading session state tracker
//!
//! Accumulates simulated trade outcomes into equity, drawdown and win-rate
//! metrics and notifies listeners on every change.

mod state;
mod tracker;

pub use state::{DerivedMetrics, SessionState, NO_PAIR, SIMULATED_PAIR, STARTING_CAPITAL};
pub use tracker::{
    SessionTracker, SharedSessionTracker, SubscriptionId, TrackerError, DEFAULT_FEED_CAPACITY,
};
