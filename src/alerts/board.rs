//! Results-area alert list

use serde::Serialize;

use super::types::{Alert, AlertKind, Severity};
use crate::telemetry::{increment_counter, CounterMetric};

/// Ordered alerts currently shown to the user
#[derive(Debug, Clone, Default, Serialize)]
pub struct AlertBoard {
    alerts: Vec<Alert>,
}

impl AlertBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one alert
    pub fn push(&mut self, alert: Alert) {
        increment_counter(CounterMetric::AlertsRaised);
        tracing::debug!(kind = ?alert.kind, severity = %alert.severity, "{}", alert.message);
        self.alerts.push(alert);
    }

    pub fn extend(&mut self, alerts: impl IntoIterator<Item = Alert>) {
        for alert in alerts {
            self.push(alert);
        }
    }

    /// Drop previously raised metric alerts, then append the fresh ones
    pub fn replace_metric_alerts(&mut self, alerts: impl IntoIterator<Item = Alert>) {
        self.alerts.retain(|a| !a.kind.is_metric());
        self.extend(alerts);
    }

    /// Drop every alert of the given kinds
    pub fn remove_kinds(&mut self, kinds: &[AlertKind]) {
        self.alerts.retain(|a| !kinds.contains(&a.kind));
    }

    pub fn clear(&mut self) {
        self.alerts.clear();
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// Highest severity on the board
    pub fn max_severity(&self) -> Option<Severity> {
        self.alerts.iter().map(|a| a.severity).max()
    }

    pub fn contains(&self, kind: AlertKind) -> bool {
        self.alerts.iter().any(|a| a.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(kind: AlertKind, severity: Severity) -> Alert {
        Alert::new(kind, severity, format!("{kind:?}"))
    }

    #[test]
    fn test_replace_metric_alerts_keeps_others() {
        let mut board = AlertBoard::new();
        board.push(alert(AlertKind::TradeSimulated, Severity::Info));
        board.push(alert(AlertKind::DrawdownWarning, Severity::Warning));

        board.replace_metric_alerts(vec![alert(AlertKind::MandatoryBreak, Severity::Danger)]);

        let kinds: Vec<_> = board.alerts().iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![AlertKind::TradeSimulated, AlertKind::MandatoryBreak]);
        assert_eq!(board.max_severity(), Some(Severity::Danger));
    }

    #[test]
    fn test_replace_with_nothing_clears_metric_alerts() {
        let mut board = AlertBoard::new();
        board.push(alert(AlertKind::TargetReached, Severity::Info));
        board.replace_metric_alerts(Vec::new());
        assert!(board.is_empty());
    }

    #[test]
    fn test_remove_kinds_and_clear() {
        let mut board = AlertBoard::new();
        board.push(alert(AlertKind::RiskRuleExceeded, Severity::Warning));
        board.push(alert(AlertKind::AccountReset, Severity::Info));

        board.remove_kinds(&[AlertKind::RiskRuleExceeded]);
        assert_eq!(board.len(), 1);
        assert!(board.contains(AlertKind::AccountReset));

        board.clear();
        assert_eq!(board.max_severity(), None);
    }

    #[test]
    fn test_alert_display() {
        let a = Alert::new(AlertKind::DrawdownWarning, Severity::Warning, "careful");
        assert_eq!(a.to_string(), "[WARNING] careful");
    }
}
