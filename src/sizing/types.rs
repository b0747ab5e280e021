//! Position sizing types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single violated request constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputViolation {
    #[error("account size must be greater than 0")]
    AccountSize,
    #[error("risk percent must be greater than 0 and at most 100")]
    RiskPercent,
    #[error("entry price must be greater than 0")]
    EntryPrice,
    #[error("stop loss must be greater than 0")]
    StopLoss,
    #[error("stop loss must differ from entry price")]
    StopEqualsEntry,
    #[error("currency pair must not be empty")]
    CurrencyPair,
    #[error("leverage must be greater than 0")]
    Leverage,
}

/// Position sizing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizingError {
    /// One or more request fields violate their constraint
    #[error("Invalid input parameters: {}", join_violations(.0))]
    InvalidInput(Vec<InputViolation>),
    /// Derived pip value is zero or could not be represented
    #[error("Pip value for {0} is degenerate, cannot derive lot size")]
    DegeneratePipValue(String),
    /// Intermediate value exceeded decimal range
    #[error("Calculation overflow while computing {0}")]
    Overflow(&'static str),
    /// Intermediate value too small to represent, rounded to zero
    #[error("Calculation underflow while computing {0}, value rounds to zero")]
    Underflow(&'static str),
}

impl SizingError {
    /// True when the failure was caused by user input rather than computation
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

fn join_violations(violations: &[InputViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Trade direction implied by the stop placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    pub fn is_long(&self) -> bool {
        matches!(self, Self::Long)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Long => "LONG",
            Self::Short => "SHORT",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
