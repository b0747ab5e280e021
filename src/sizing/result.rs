//! Position sizing output

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt;

use super::types::Direction;
use crate::instrument::InstrumentClass;

/// Decimal places for currency amounts
pub const CURRENCY_DP: u32 = 2;
/// Decimal places for prices
pub const PRICE_DP: u32 = 5;
/// Decimal places for lot sizes
pub const LOT_DP: u32 = 2;
/// Decimal places for pip counts
pub const PIP_DP: u32 = 1;
/// Decimal places for percentages
pub const PERCENT_DP: u32 = 2;

/// Sized position for one trade request
///
/// Values are exact. `rounded()` produces the display precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionResult {
    pub lot_size: Decimal,
    pub risk_amount: Decimal,
    pub margin_required: Decimal,
    pub margin_percent: Decimal,
    /// Equal to `risk_amount` (1:1 reward-to-risk)
    pub potential_profit: Decimal,
    /// Take-profit price
    pub profit_price: Decimal,
    pub pips_at_risk: Decimal,
    /// Monetary value of one pip per standard lot
    pub pip_value: Decimal,
    pub is_long: bool,
    pub direction: Direction,
    pub instrument_class: InstrumentClass,

    // Echoed request fields
    pub account_size: Decimal,
    pub risk_percent: Decimal,
    pub entry_price: Decimal,
    pub stop_loss: Decimal,
    pub currency_pair: String,
    pub leverage: Decimal,
}

impl PositionResult {
    /// Copy with every field rounded to its display precision
    pub fn rounded(&self) -> Self {
        Self {
            lot_size: round(self.lot_size, LOT_DP),
            risk_amount: round(self.risk_amount, CURRENCY_DP),
            margin_required: round(self.margin_required, CURRENCY_DP),
            margin_percent: round(self.margin_percent, PERCENT_DP),
            potential_profit: round(self.potential_profit, CURRENCY_DP),
            profit_price: round(self.profit_price, PRICE_DP),
            pips_at_risk: round(self.pips_at_risk, PIP_DP),
            pip_value: round(self.pip_value, CURRENCY_DP),
            entry_price: round(self.entry_price, PRICE_DP),
            stop_loss: round(self.stop_loss, PRICE_DP),
            currency_pair: self.currency_pair.clone(),
            ..*self
        }
    }

    /// Distance between entry and stop in price units
    pub fn price_difference(&self) -> Decimal {
        (self.entry_price - self.stop_loss).abs()
    }

    /// Three-line trade summary
    pub fn summary(&self) -> Vec<String> {
        let r = self.rounded();
        vec![
            format!(
                "{} {} lots of {} at {}",
                r.direction, r.lot_size, r.currency_pair, r.entry_price
            ),
            format!("Stop Loss: {} | Take Profit: {}", r.stop_loss, r.profit_price),
            format!(
                "Risk/Reward: ${} / ${} (1:1 ratio)",
                r.risk_amount, r.potential_profit
            ),
        ]
    }
}

impl fmt::Display for PositionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.rounded();
        writeln!(f, "Position Calculation Results")?;
        writeln!(f, "  Position Size:     {} lots", r.lot_size)?;
        writeln!(f, "  Risk Amount:       ${}", r.risk_amount)?;
        writeln!(f, "  Margin Required:   ${}", r.margin_required)?;
        writeln!(f, "  Margin %:          {}%", r.margin_percent)?;
        writeln!(f, "  Potential Profit:  ${}", r.potential_profit)?;
        writeln!(f, "  Take Profit Price: {}", r.profit_price)?;
        writeln!(f, "  Pips at Risk:      {}", r.pips_at_risk)?;
        writeln!(f, "  Pip Value:         ${}", r.pip_value)?;
        writeln!(f, "  Direction:         {}", r.direction)?;
        writeln!(f)?;
        writeln!(f, "Trade Summary")?;
        for line in self.summary() {
            writeln!(f, "  {line}")?;
        }
        Ok(())
    }
}

/// Round half away from zero and pad to exactly `dp` places
fn round(value: Decimal, dp: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded
}
