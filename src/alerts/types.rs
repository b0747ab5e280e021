//! Alert types

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Alert severity, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What raised the alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Drawdown reached the break threshold
    MandatoryBreak,
    /// Drawdown approaching the break threshold
    DrawdownWarning,
    /// Daily target reached
    TargetReached,
    /// Requested risk above the per-trade rule
    RiskRuleExceeded,
    /// Margin usage above the margin rule
    MarginRuleExceeded,
    /// Position sizing failed
    CalculationFailed,
    /// Demo trade booked
    TradeSimulated,
    /// Session reset
    AccountReset,
}

impl AlertKind {
    /// Kinds derived from session metrics, replaced on every metrics change
    pub fn is_metric(&self) -> bool {
        matches!(
            self,
            Self::MandatoryBreak | Self::DrawdownWarning | Self::TargetReached
        )
    }
}

/// A message for the results area
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub severity: Severity,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl Alert {
    pub fn new(kind: AlertKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            raised_at: Utc::now(),
        }
    }
}

impl std::fmt::Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity.as_str().to_uppercase(), self.message)
    }
}
