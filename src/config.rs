//! Configuration types for fx-risk

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub calculator: CalculatorConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub alerts: AlertConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Fallback values for blank or unparsable calculator input
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CalculatorConfig {
    #[serde(default = "default_account_size", serialize_with = "rust_decimal::serde::float::serialize")]
    pub account_size: Decimal,

    /// Risk per trade in percent (0.5 = 0.5%)
    #[serde(default = "default_risk_percent", serialize_with = "rust_decimal::serde::float::serialize")]
    pub risk_percent: Decimal,

    #[serde(default = "default_entry_price", serialize_with = "rust_decimal::serde::float::serialize")]
    pub entry_price: Decimal,

    #[serde(default = "default_stop_loss", serialize_with = "rust_decimal::serde::float::serialize")]
    pub stop_loss: Decimal,

    #[serde(default = "default_currency_pair")]
    pub currency_pair: String,

    #[serde(default = "default_leverage", serialize_with = "rust_decimal::serde::float::serialize")]
    pub leverage: Decimal,
}

fn default_account_size() -> Decimal {
    Decimal::new(10000, 0)
}
fn default_risk_percent() -> Decimal {
    Decimal::new(5, 1) // 0.5%
}
fn default_entry_price() -> Decimal {
    Decimal::new(11650, 4) // 1.1650
}
fn default_stop_loss() -> Decimal {
    Decimal::new(11600, 4) // 1.1600
}
fn default_currency_pair() -> String {
    "EURUSD".to_string()
}
fn default_leverage() -> Decimal {
    Decimal::new(100, 0)
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            account_size: default_account_size(),
            risk_percent: default_risk_percent(),
            entry_price: default_entry_price(),
            stop_loss: default_stop_loss(),
            currency_pair: default_currency_pair(),
            leverage: default_leverage(),
        }
    }
}

/// Demo session configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Equity moved by one simulated win or loss
    #[serde(default = "default_simulated_trade_amount", serialize_with = "rust_decimal::serde::float::serialize")]
    pub simulated_trade_amount: Decimal,

    /// Capacity of the snapshot broadcast feed
    #[serde(default = "default_feed_capacity")]
    pub feed_capacity: usize,
}

fn default_simulated_trade_amount() -> Decimal {
    Decimal::new(50, 0)
}
fn default_feed_capacity() -> usize {
    64
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            simulated_trade_amount: default_simulated_trade_amount(),
            feed_capacity: default_feed_capacity(),
        }
    }
}

/// Alert thresholds, all in percent
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlertConfig {
    /// Drawdown that forces a trading break
    #[serde(default = "default_break_drawdown_pct", serialize_with = "rust_decimal::serde::float::serialize")]
    pub break_drawdown_pct: Decimal,

    /// Drawdown that raises a warning
    #[serde(default = "default_warning_drawdown_pct", serialize_with = "rust_decimal::serde::float::serialize")]
    pub warning_drawdown_pct: Decimal,

    /// Daily gain that counts as target reached
    #[serde(default = "default_daily_target_pct", serialize_with = "rust_decimal::serde::float::serialize")]
    pub daily_target_pct: Decimal,

    /// Maximum risk per trade
    #[serde(default = "default_max_risk_pct", serialize_with = "rust_decimal::serde::float::serialize")]
    pub max_risk_pct: Decimal,

    /// Maximum margin usage per position
    #[serde(default = "default_max_margin_pct", serialize_with = "rust_decimal::serde::float::serialize")]
    pub max_margin_pct: Decimal,
}

fn default_break_drawdown_pct() -> Decimal {
    Decimal::new(5, 0)
}
fn default_warning_drawdown_pct() -> Decimal {
    Decimal::new(3, 0)
}
fn default_daily_target_pct() -> Decimal {
    Decimal::new(1, 0)
}
fn default_max_risk_pct() -> Decimal {
    Decimal::new(5, 1) // 0.5%
}
fn default_max_margin_pct() -> Decimal {
    Decimal::new(20, 0)
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            break_drawdown_pct: default_break_drawdown_pct(),
            warning_drawdown_pct: default_warning_drawdown_pct(),
            daily_target_pct: default_daily_target_pct(),
            max_risk_pct: default_max_risk_pct(),
            max_margin_pct: default_max_margin_pct(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON log lines instead of human-readable ones
    #[serde(default)]
    pub json_logs: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            [calculator]
            account_size = 25000
            risk_percent = 1.0
            entry_price = 150.25
            stop_loss = 149.75
            currency_pair = "USDJPY"
            leverage = 50

            [session]
            simulated_trade_amount = 125

            [alerts]
            break_drawdown_pct = 8
            warning_drawdown_pct = 4
            daily_target_pct = 2
            max_risk_pct = 1
            max_margin_pct = 30

            [telemetry]
            log_level = "debug"
            json_logs = true
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.calculator.account_size, dec!(25000));
        assert_eq!(config.calculator.currency_pair, "USDJPY");
        assert_eq!(config.calculator.leverage, dec!(50));
        assert_eq!(config.session.simulated_trade_amount, dec!(125));
        assert_eq!(config.session.feed_capacity, 64);
        assert_eq!(config.alerts.break_drawdown_pct, dec!(8));
        assert_eq!(config.telemetry.log_level, "debug");
        assert!(config.telemetry.json_logs);
    }

    #[test]
    fn test_serialized_config_uses_numbers() {
        let rendered = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(!rendered.contains("account_size = \""));
        assert!(rendered.contains("account_size = 10000"));
        assert!(rendered.contains("risk_percent = 0.5"));

        let reloaded: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(reloaded.calculator.account_size, dec!(10000));
        assert_eq!(reloaded.calculator.entry_price, dec!(1.1650));
        assert_eq!(reloaded.session.simulated_trade_amount, dec!(50));
        assert_eq!(reloaded.alerts.max_margin_pct, dec!(20));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.calculator.account_size, dec!(10000));
        assert_eq!(config.calculator.risk_percent, dec!(0.5));
        assert_eq!(config.calculator.entry_price, dec!(1.1650));
        assert_eq!(config.calculator.stop_loss, dec!(1.1600));
        assert_eq!(config.calculator.currency_pair, "EURUSD");
        assert_eq!(config.calculator.leverage, dec!(100));
        assert_eq!(config.session.simulated_trade_amount, dec!(50));
        assert_eq!(config.alerts.warning_drawdown_pct, dec!(3));
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn test_partial_section_fills_missing_fields() {
        let toml = r#"
            [alerts]
            max_margin_pct = 10
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.alerts.max_margin_pct, dec!(10));
        assert_eq!(config.alerts.break_drawdown_pct, dec!(5));
        assert_eq!(config.alerts.daily_target_pct, dec!(1));
    }

    #[test]
    fn test_config_load_nonexistent() {
        let result = Config::load("/nonexistent/path/config.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_default_config_roundtrips_through_toml() {
        let rendered = toml::to_string(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.calculator.entry_price, dec!(1.1650));
        assert_eq!(parsed.alerts.max_risk_pct, dec!(0.5));
    }
}
