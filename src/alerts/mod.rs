//! Alerts module
//!
//! Threshold policy over session metrics and sized positions, and the
//! ordered alert list shown next to calculation results.

mod board;
mod policy;
mod types;

pub use board::AlertBoard;
pub use policy::AlertPolicy;
pub use types::{Alert, AlertKind, Severity};
