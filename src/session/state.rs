//! Session state and derived metrics

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Capital every session starts from and resets to
pub const STARTING_CAPITAL: Decimal = dec!(10000);

/// Pair shown before any trade is recorded
pub const NO_PAIR: &str = "None";

/// Pair recorded for simulated trades
pub const SIMULATED_PAIR: &str = "EUR/USD";

/// Mutable state of one trading session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub starting_capital: Decimal,
    pub current_equity: Decimal,
    /// Equity at the start of the trading day
    pub daily_start_equity: Decimal,
    pub trades_count: u64,
    /// Never exceeds `trades_count`
    pub win_count: u64,
    pub current_pair: String,
    pub session_active: bool,
    pub days_since_break: u32,
}

impl SessionState {
    /// Derive P&L, drawdown and win-rate figures
    pub fn metrics(&self) -> DerivedMetrics {
        let daily_pnl = self.current_equity - self.daily_start_equity;
        let daily_pnl_percent = percent_of(daily_pnl, self.daily_start_equity);
        let drawdown_percent =
            percent_of(self.starting_capital - self.current_equity, self.starting_capital)
                .max(Decimal::ZERO);
        let win_rate = if self.trades_count > 0 {
            percent_of(Decimal::from(self.win_count), Decimal::from(self.trades_count))
        } else {
            Decimal::ZERO
        };
        let target_progress = daily_pnl_percent.clamp(Decimal::ZERO, dec!(100));

        DerivedMetrics {
            daily_pnl,
            daily_pnl_percent,
            drawdown_percent,
            win_rate,
            target_progress,
        }
    }

    pub fn loss_count(&self) -> u64 {
        self.trades_count - self.win_count
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            starting_capital: STARTING_CAPITAL,
            current_equity: STARTING_CAPITAL,
            daily_start_equity: STARTING_CAPITAL,
            trades_count: 0,
            win_count: 0,
            current_pair: NO_PAIR.to_string(),
            session_active: false,
            days_since_break: 0,
        }
    }
}

/// Read-only figures computed from a `SessionState`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedMetrics {
    pub daily_pnl: Decimal,
    pub daily_pnl_percent: Decimal,
    /// Decline from starting capital, floored at 0
    pub drawdown_percent: Decimal,
    pub win_rate: Decimal,
    /// Daily P&L percent clamped to [0, 100]
    pub target_progress: Decimal,
}

fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_metrics_are_zero() {
        let metrics = SessionState::default().metrics();
        assert_eq!(metrics.daily_pnl, Decimal::ZERO);
        assert_eq!(metrics.daily_pnl_percent, Decimal::ZERO);
        assert_eq!(metrics.drawdown_percent, Decimal::ZERO);
        assert_eq!(metrics.win_rate, Decimal::ZERO);
        assert_eq!(metrics.target_progress, Decimal::ZERO);
    }

    #[test]
    fn test_drawdown_floors_at_zero_when_in_profit() {
        let state = SessionState {
            current_equity: dec!(10250),
            ..Default::default()
        };
        let metrics = state.metrics();
        assert_eq!(metrics.drawdown_percent, Decimal::ZERO);
        assert_eq!(metrics.daily_pnl, dec!(250));
        assert_eq!(metrics.daily_pnl_percent, dec!(2.5));
        assert_eq!(metrics.target_progress, dec!(2.5));
    }

    #[test]
    fn test_drawdown_and_negative_progress() {
        let state = SessionState {
            current_equity: dec!(9600),
            ..Default::default()
        };
        let metrics = state.metrics();
        assert_eq!(metrics.drawdown_percent, dec!(4));
        assert_eq!(metrics.daily_pnl_percent, dec!(-4));
        assert_eq!(metrics.target_progress, Decimal::ZERO);
    }

    #[test]
    fn test_target_progress_caps_at_100() {
        let state = SessionState {
            current_equity: dec!(25000),
            ..Default::default()
        };
        assert_eq!(state.metrics().target_progress, dec!(100));
    }

    #[test]
    fn test_win_rate() {
        let state = SessionState {
            trades_count: 4,
            win_count: 3,
            ..Default::default()
        };
        assert_eq!(state.metrics().win_rate, dec!(75));
        assert_eq!(state.loss_count(), 1);
    }
}
