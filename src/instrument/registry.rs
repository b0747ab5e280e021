//! Static instrument table
//!
//! Organised by instrument class. Every class shares its contract and pip
//! conventions:
//! - forex: 100,000 units per lot, pip = 0.0001 (0.01 for JPY quotes)
//! - gold: 100 oz per lot, pip = 0.1
//! - silver: 5,000 oz per lot, pip = 0.01
//! - indices and crypto: 1 unit per lot (0.1 for NAS100), pip = 1

use rust_decimal_macros::dec;
use std::collections::HashMap;

use super::types::{Instrument, InstrumentClass, InstrumentSpec};

/// Symbol used when a lookup misses the table
pub const DEFAULT_SYMBOL: &str = "EURUSD";

const FOREX: InstrumentSpec = InstrumentSpec::new(dec!(100000), dec!(0.0001), dec!(10000));
const FOREX_JPY: InstrumentSpec = InstrumentSpec::new(dec!(100000), dec!(0.01), dec!(100));
const GOLD: InstrumentSpec = InstrumentSpec::new(dec!(100), dec!(0.1), dec!(10));
const SILVER: InstrumentSpec = InstrumentSpec::new(dec!(5000), dec!(0.01), dec!(100));
const INDEX: InstrumentSpec = InstrumentSpec::new(dec!(1), dec!(1), dec!(1));
const INDEX_MINI: InstrumentSpec = InstrumentSpec::new(dec!(0.1), dec!(1), dec!(1));
const CRYPTO: InstrumentSpec = InstrumentSpec::new(dec!(1), dec!(1), dec!(1));

const TABLE: &[(&str, InstrumentClass, InstrumentSpec)] = &[
    // JPY-quoted pairs
    ("USDJPY", InstrumentClass::JpyQuoted, FOREX_JPY),
    ("EURJPY", InstrumentClass::JpyQuoted, FOREX_JPY),
    ("GBPJPY", InstrumentClass::JpyQuoted, FOREX_JPY),
    ("AUDJPY", InstrumentClass::JpyQuoted, FOREX_JPY),
    ("NZDJPY", InstrumentClass::JpyQuoted, FOREX_JPY),
    ("CHFJPY", InstrumentClass::JpyQuoted, FOREX_JPY),
    // Majors
    ("EURUSD", InstrumentClass::UsdQuoted, FOREX),
    ("GBPUSD", InstrumentClass::UsdQuoted, FOREX),
    ("USDCHF", InstrumentClass::UsdBase, FOREX),
    ("AUDUSD", InstrumentClass::UsdQuoted, FOREX),
    ("NZDUSD", InstrumentClass::UsdQuoted, FOREX),
    ("USDCAD", InstrumentClass::UsdBase, FOREX),
    // Minors
    ("EURGBP", InstrumentClass::Cross, FOREX),
    ("EURCHF", InstrumentClass::Cross, FOREX),
    ("GBPCHF", InstrumentClass::Cross, FOREX),
    ("AUDCHF", InstrumentClass::Cross, FOREX),
    ("NZDCHF", InstrumentClass::Cross, FOREX),
    // Metals
    ("XAUUSD", InstrumentClass::Gold, GOLD),
    ("XAGUSD", InstrumentClass::Silver, SILVER),
    // Indices
    ("US30", InstrumentClass::Index, INDEX),
    ("US500", InstrumentClass::Index, INDEX),
    ("NAS100", InstrumentClass::Index, INDEX_MINI),
    ("UK100", InstrumentClass::Index, INDEX),
    ("GER40", InstrumentClass::Index, INDEX),
    // Crypto
    ("BTCUSD", InstrumentClass::Crypto, CRYPTO),
    ("ETHUSD", InstrumentClass::Crypto, CRYPTO),
];

/// Immutable symbol lookup table
#[derive(Debug, Clone)]
pub struct InstrumentRegistry {
    entries: HashMap<&'static str, (InstrumentClass, InstrumentSpec)>,
    default_spec: InstrumentSpec,
}

impl InstrumentRegistry {
    /// Build the standard table
    pub fn new() -> Self {
        let entries = TABLE
            .iter()
            .map(|(symbol, class, spec)| (*symbol, (*class, *spec)))
            .collect();

        Self {
            entries,
            default_spec: FOREX,
        }
    }

    /// Resolve a symbol. Never fails.
    ///
    /// Unlisted symbols take the EURUSD contract figures and are classified
    /// from their base/quote currency.
    pub fn lookup(&self, symbol: &str) -> Instrument {
        let symbol = normalize_symbol(symbol);

        match self.entries.get(symbol.as_str()) {
            Some((class, spec)) => Instrument {
                symbol,
                class: *class,
                spec: *spec,
                listed: true,
            },
            None => {
                tracing::debug!(%symbol, "Unlisted symbol, using {} contract spec", DEFAULT_SYMBOL);
                Instrument {
                    class: InstrumentClass::classify_pair(&symbol),
                    symbol,
                    spec: self.default_spec,
                    listed: false,
                }
            }
        }
    }

    /// Whether the symbol has its own table entry
    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.contains_key(normalize_symbol(symbol).as_str())
    }

    /// Listed symbols in table order
    pub fn symbols(&self) -> impl Iterator<Item = &'static str> + '_ {
        TABLE.iter().map(|(symbol, _, _)| *symbol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn default_spec(&self) -> InstrumentSpec {
        self.default_spec
    }
}

impl Default for InstrumentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Trim, upper-case and drop separators ("eur/usd" -> "EURUSD")
pub fn normalize_symbol(symbol: &str) -> String {
    symbol
        .trim()
        .chars()
        .filter(|c| !matches!(c, '/' | '-' | '_' | ' '))
        .collect::<String>()
        .to_ascii_uppercase()
}
