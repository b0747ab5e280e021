//! Threshold-based alert policy

use rust_decimal::Decimal;

use super::types::{Alert, AlertKind, Severity};
use crate::config::AlertConfig;
use crate::session::DerivedMetrics;
use crate::sizing::{PositionResult, SizingError};

/// Evaluates session metrics and sized positions against the trading rules
#[derive(Debug, Clone)]
pub struct AlertPolicy {
    pub break_drawdown_pct: Decimal,
    pub warning_drawdown_pct: Decimal,
    pub daily_target_pct: Decimal,
    pub max_risk_pct: Decimal,
    pub max_margin_pct: Decimal,
}

impl AlertPolicy {
    /// Create from AlertConfig
    pub fn from_config(config: &AlertConfig) -> Self {
        Self {
            break_drawdown_pct: config.break_drawdown_pct,
            warning_drawdown_pct: config.warning_drawdown_pct,
            daily_target_pct: config.daily_target_pct,
            max_risk_pct: config.max_risk_pct,
            max_margin_pct: config.max_margin_pct,
        }
    }

    /// Drawdown and daily-target alerts
    ///
    /// The break alert supersedes the drawdown warning. The target alert is
    /// independent and may fire alongside either.
    pub fn evaluate_metrics(&self, metrics: &DerivedMetrics) -> Vec<Alert> {
        let mut alerts = Vec::new();

        if metrics.drawdown_percent >= self.break_drawdown_pct {
            alerts.push(Alert::new(
                AlertKind::MandatoryBreak,
                Severity::Danger,
                format!(
                    "MANDATORY BREAK: {}% drawdown reached. Take minimum 1-week break!",
                    self.break_drawdown_pct.normalize()
                ),
            ));
        } else if metrics.drawdown_percent >= self.warning_drawdown_pct {
            alerts.push(Alert::new(
                AlertKind::DrawdownWarning,
                Severity::Warning,
                format!(
                    "WARNING: Approaching {}% drawdown limit",
                    self.break_drawdown_pct.normalize()
                ),
            ));
        }

        if metrics.daily_pnl_percent >= self.daily_target_pct {
            alerts.push(Alert::new(
                AlertKind::TargetReached,
                Severity::Info,
                format!(
                    "TARGET ACHIEVED: {}% daily target reached. Consider exiting market!",
                    self.daily_target_pct.normalize()
                ),
            ));
        }

        if !alerts.is_empty() {
            tracing::warn!(
                count = alerts.len(),
                drawdown = %metrics.drawdown_percent,
                daily_pnl_pct = %metrics.daily_pnl_percent,
                "Session alerts raised"
            );
        }

        alerts
    }

    /// Per-trade risk and margin rule checks on a sized position
    pub fn evaluate_position(&self, position: &PositionResult) -> Vec<Alert> {
        let mut alerts = Vec::new();

        if position.risk_percent > self.max_risk_pct {
            alerts.push(Alert::new(
                AlertKind::RiskRuleExceeded,
                Severity::Warning,
                format!(
                    "Risk exceeds maximum {}% per trade rule",
                    self.max_risk_pct.normalize()
                ),
            ));
        }

        if position.margin_percent > self.max_margin_pct {
            alerts.push(Alert::new(
                AlertKind::MarginRuleExceeded,
                Severity::Danger,
                format!(
                    "MARGIN VIOLATION: Exceeds {}% maximum margin rule!",
                    self.max_margin_pct.normalize()
                ),
            ));
        }

        alerts
    }

    /// Blocking alert for a failed calculation, carrying the error verbatim
    pub fn calculation_failed(&self, error: &SizingError) -> Alert {
        Alert::new(AlertKind::CalculationFailed, Severity::Danger, error.to_string())
    }
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self::from_config(&AlertConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionState;
    use crate::sizing::{InputViolation, PositionSizingEngine, TradeRequest};
    use rust_decimal_macros::dec;

    fn metrics_at(equity: Decimal) -> DerivedMetrics {
        SessionState {
            current_equity: equity,
            ..Default::default()
        }
        .metrics()
    }

    fn kinds(alerts: &[Alert]) -> Vec<AlertKind> {
        alerts.iter().map(|a| a.kind).collect()
    }

    #[test]
    fn test_no_alerts_at_start() {
        let policy = AlertPolicy::default();
        assert!(policy.evaluate_metrics(&metrics_at(dec!(10000))).is_empty());
    }

    #[test]
    fn test_drawdown_warning_at_three_percent() {
        let policy = AlertPolicy::default();
        let alerts = policy.evaluate_metrics(&metrics_at(dec!(9700)));
        assert_eq!(kinds(&alerts), vec![AlertKind::DrawdownWarning]);
        assert_eq!(alerts[0].severity, Severity::Warning);
        assert_eq!(alerts[0].message, "WARNING: Approaching 5% drawdown limit");
    }

    #[test]
    fn test_break_supersedes_warning() {
        let policy = AlertPolicy::default();
        let alerts = policy.evaluate_metrics(&metrics_at(dec!(9500)));
        assert_eq!(kinds(&alerts), vec![AlertKind::MandatoryBreak]);
        assert_eq!(alerts[0].severity, Severity::Danger);
        assert_eq!(
            alerts[0].message,
            "MANDATORY BREAK: 5% drawdown reached. Take minimum 1-week break!"
        );
    }

    #[test]
    fn test_target_reached() {
        let policy = AlertPolicy::default();
        let alerts = policy.evaluate_metrics(&metrics_at(dec!(10100)));
        assert_eq!(kinds(&alerts), vec![AlertKind::TargetReached]);
        assert_eq!(alerts[0].severity, Severity::Info);
    }

    #[test]
    fn test_drawdown_and_target_are_independent() {
        let policy = AlertPolicy::default();
        // Equity below starting capital but above the day's opening equity
        let state = SessionState {
            current_equity: dec!(9600),
            daily_start_equity: dec!(9400),
            ..Default::default()
        };
        let alerts = policy.evaluate_metrics(&state.metrics());
        assert_eq!(
            kinds(&alerts),
            vec![AlertKind::DrawdownWarning, AlertKind::TargetReached]
        );
    }

    #[test]
    fn test_position_rule_checks() {
        let policy = AlertPolicy::default();
        let engine = PositionSizingEngine::new();

        let within = engine
            .calculate(&TradeRequest::new(
                dec!(10000),
                dec!(0.5),
                dec!(1.1650),
                dec!(1.1600),
                "EURUSD",
            ))
            .unwrap();
        assert!(policy.evaluate_position(&within).is_empty());

        // 2% risk over a 5 pip stop: 4 lots, $4,660 margin at 1:100
        let risky = engine
            .calculate(&TradeRequest::new(
                dec!(10000),
                dec!(2),
                dec!(1.1650),
                dec!(1.1645),
                "EURUSD",
            ))
            .unwrap();
        let alerts = policy.evaluate_position(&risky);
        assert_eq!(
            kinds(&alerts),
            vec![AlertKind::RiskRuleExceeded, AlertKind::MarginRuleExceeded]
        );
        assert_eq!(alerts[0].message, "Risk exceeds maximum 0.5% per trade rule");
        assert_eq!(
            alerts[1].message,
            "MARGIN VIOLATION: Exceeds 20% maximum margin rule!"
        );
    }

    #[test]
    fn test_calculation_failed_carries_message() {
        let policy = AlertPolicy::default();
        let error = SizingError::InvalidInput(vec![InputViolation::StopEqualsEntry]);
        let alert = policy.calculation_failed(&error);
        assert_eq!(alert.severity, Severity::Danger);
        assert_eq!(alert.message, error.to_string());
    }
}
