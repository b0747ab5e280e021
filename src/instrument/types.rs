//! Instrument types

use rust_decimal::Decimal;
use serde::Serialize;

/// Contract conventions for a tradable symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InstrumentSpec {
    /// Units per one standard lot
    pub contract_size: Decimal,
    /// Price increment representing one pip
    pub pip_size: Decimal,
    /// Converts a price delta into a pip count (1 / pip_size)
    pub pip_multiplier: Decimal,
}

impl InstrumentSpec {
    pub const fn new(contract_size: Decimal, pip_size: Decimal, pip_multiplier: Decimal) -> Self {
        Self {
            contract_size,
            pip_size,
            pip_multiplier,
        }
    }

    /// Monetary value of one pip for one standard lot, before class adjustments
    pub fn base_pip_value(&self) -> Option<Decimal> {
        self.contract_size.checked_mul(self.pip_size)
    }
}

/// Instrument class, resolved once per lookup
///
/// Pip value and margin formulas hang off the class so that every symbol
/// goes through exactly one branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentClass {
    /// Forex pair quoted in JPY (USDJPY, EURJPY, ...)
    JpyQuoted,
    /// Forex pair with USD as base currency (USDCHF, USDCAD, ...)
    UsdBase,
    /// Forex pair with USD as quote currency (EURUSD, GBPUSD, ...)
    UsdQuoted,
    /// Forex pair with CHF as base currency
    ChfBase,
    /// Any other forex cross (EURGBP, EURCHF, ...)
    Cross,
    /// Spot gold
    Gold,
    /// Spot silver
    Silver,
    /// Cash index CFD
    Index,
    /// Crypto CFD
    Crypto,
}

impl InstrumentClass {
    /// Classify a six-letter forex symbol by its base and quote currency
    pub fn classify_pair(symbol: &str) -> Self {
        let (base, quote) = if symbol.len() == 6 && symbol.is_ascii() {
            symbol.split_at(3)
        } else {
            (symbol, "")
        };

        if quote == "JPY" {
            Self::JpyQuoted
        } else if base == "USD" {
            Self::UsdBase
        } else if quote == "USD" {
            Self::UsdQuoted
        } else if base == "CHF" {
            Self::ChfBase
        } else {
            Self::Cross
        }
    }

    /// True for metals, indices and crypto
    pub fn is_cfd(&self) -> bool {
        matches!(self, Self::Gold | Self::Silver | Self::Index | Self::Crypto)
    }

    /// Pip value per standard lot in account currency (USD)
    ///
    /// JPY-quoted pairs are treated as already USD-scaled. Cross pairs use
    /// the USD formula as an approximation: a true value needs a live
    /// quote/USD conversion rate which is not modelled here.
    pub fn pip_value(&self, spec: &InstrumentSpec, entry_price: Decimal) -> Option<Decimal> {
        let base = spec.base_pip_value()?;
        match self {
            Self::ChfBase => base.checked_mul(entry_price),
            Self::JpyQuoted
            | Self::UsdBase
            | Self::UsdQuoted
            | Self::Cross
            | Self::Gold
            | Self::Silver
            | Self::Index
            | Self::Crypto => Some(base),
        }
    }

    /// Margin required to hold `lots` at `leverage`
    ///
    /// USD-base pairs have a notional already denominated in USD. Every other
    /// class converts through the entry price (approximate for crosses).
    pub fn margin(
        &self,
        spec: &InstrumentSpec,
        lots: Decimal,
        entry_price: Decimal,
        leverage: Decimal,
    ) -> Option<Decimal> {
        let notional = lots.checked_mul(spec.contract_size)?;
        let exposure = match self {
            Self::UsdBase => notional,
            _ => notional.checked_mul(entry_price)?,
        };
        exposure.checked_div(leverage)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JpyQuoted => "jpy_quoted",
            Self::UsdBase => "usd_base",
            Self::UsdQuoted => "usd_quoted",
            Self::ChfBase => "chf_base",
            Self::Cross => "cross",
            Self::Gold => "gold",
            Self::Silver => "silver",
            Self::Index => "index",
            Self::Crypto => "crypto",
        }
    }
}

impl std::fmt::Display for InstrumentClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a registry lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instrument {
    /// Normalised symbol as requested
    pub symbol: String,
    pub class: InstrumentClass,
    pub spec: InstrumentSpec,
    /// False when the symbol was not in the table and the default spec was used
    pub listed: bool,
}
