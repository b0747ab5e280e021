//! Trade requests and raw input parsing

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::types::InputViolation;
use crate::config::CalculatorConfig;
use crate::instrument::normalize_symbol;

/// Leverage applied when the caller does not set one
pub const DEFAULT_LEVERAGE: Decimal = dec!(100);

/// A proposed trade, consumed by one `calculate` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRequest {
    pub account_size: Decimal,
    /// Percent of the account put at risk (0.5 = 0.5%)
    pub risk_percent: Decimal,
    pub entry_price: Decimal,
    pub stop_loss: Decimal,
    pub currency_pair: String,
    pub leverage: Decimal,
}

impl TradeRequest {
    /// Create a request with the default leverage
    pub fn new(
        account_size: Decimal,
        risk_percent: Decimal,
        entry_price: Decimal,
        stop_loss: Decimal,
        currency_pair: impl Into<String>,
    ) -> Self {
        Self {
            account_size,
            risk_percent,
            entry_price,
            stop_loss,
            currency_pair: currency_pair.into(),
            leverage: DEFAULT_LEVERAGE,
        }
    }

    /// Set leverage
    pub fn with_leverage(mut self, leverage: Decimal) -> Self {
        self.leverage = leverage;
        self
    }

    /// Collect every violated constraint, empty when the request is valid
    pub fn violations(&self) -> Vec<InputViolation> {
        let mut violations = Vec::new();

        if self.account_size <= Decimal::ZERO {
            violations.push(InputViolation::AccountSize);
        }
        if self.risk_percent <= Decimal::ZERO || self.risk_percent > dec!(100) {
            violations.push(InputViolation::RiskPercent);
        }
        if self.entry_price <= Decimal::ZERO {
            violations.push(InputViolation::EntryPrice);
        }
        if self.stop_loss <= Decimal::ZERO {
            violations.push(InputViolation::StopLoss);
        }
        if self.entry_price == self.stop_loss {
            violations.push(InputViolation::StopEqualsEntry);
        }
        // Separator-only input normalises to an empty symbol
        if normalize_symbol(&self.currency_pair).is_empty() {
            violations.push(InputViolation::CurrencyPair);
        }
        if self.leverage <= Decimal::ZERO {
            violations.push(InputViolation::Leverage);
        }

        violations
    }

    pub fn is_valid(&self) -> bool {
        self.violations().is_empty()
    }
}

/// Unparsed calculator input as typed by the user
///
/// Blank, unparsable or zero fields fall back to the configured defaults.
/// Negative numbers are kept so that validation can reject them.
#[derive(Debug, Clone, Default)]
pub struct RawTradeInput {
    pub account_size: Option<String>,
    pub risk_percent: Option<String>,
    pub entry_price: Option<String>,
    pub stop_loss: Option<String>,
    pub currency_pair: Option<String>,
    pub leverage: Option<String>,
}

impl RawTradeInput {
    /// Build a request, substituting defaults for unusable fields
    pub fn parse(&self, defaults: &CalculatorConfig) -> TradeRequest {
        let currency_pair = self
            .currency_pair
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| defaults.currency_pair.clone());

        TradeRequest {
            account_size: parse_or(self.account_size.as_deref(), defaults.account_size),
            risk_percent: parse_or(self.risk_percent.as_deref(), defaults.risk_percent),
            entry_price: parse_or(self.entry_price.as_deref(), defaults.entry_price),
            stop_loss: parse_or(self.stop_loss.as_deref(), defaults.stop_loss),
            currency_pair,
            leverage: parse_or(self.leverage.as_deref(), defaults.leverage),
        }
    }
}

/// Parse a decimal, accepting plain and scientific notation
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim().replace(',', "");
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .ok()
}

fn parse_or(raw: Option<&str>, default: Decimal) -> Decimal {
    match raw.and_then(parse_decimal) {
        Some(value) if !value.is_zero() => value,
        _ => default,
    }
}
