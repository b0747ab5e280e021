//! Position sizing module
//!
//! Turns a proposed trade into a lot size, margin requirement and
//! take-profit price.

mod engine;
mod request;
mod result;
mod types;

pub use engine::PositionSizingEngine;
pub use request::{parse_decimal, RawTradeInput, TradeRequest, DEFAULT_LEVERAGE};
pub use result::{PositionResult, CURRENCY_DP, LOT_DP, PERCENT_DP, PIP_DP, PRICE_DP};
pub use types::{Direction, InputViolation, SizingError};

/// Trait for position sizing implementations
pub trait PositionSizer: Send + Sync {
    /// Size a trade request
    fn calculate(&self, request: &TradeRequest) -> Result<PositionResult, SizingError>;

    /// Get the sizing mode name
    fn mode_name(&self) -> &'static str;
}
