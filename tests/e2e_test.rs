//! End-to-end tests across config, sizing, alerts and session

use fx_risk::cli::{CalculateArgs, SimulateArgs};
use fx_risk::config::Config;
use fx_risk::sizing::PositionSizingEngine;
use fx_risk::SessionTracker;
use rust_decimal_macros::dec;
use std::io::Write;

#[test]
fn test_config_example_parses() {
    let config: Config = toml::from_str(include_str!("../config.toml.example")).unwrap();
    assert_eq!(config.calculator.currency_pair, "EURUSD");
    assert_eq!(config.calculator.stop_loss, dec!(1.1600));
    assert_eq!(config.alerts.max_margin_pct, dec!(20));
}

#[test]
fn test_config_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
        [calculator]
        currency_pair = "XAUUSD"
        entry_price = 2350
        stop_loss = 2340
        "#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.calculator.currency_pair, "XAUUSD");
    assert_eq!(config.calculator.account_size, dec!(10000));

    let engine = PositionSizingEngine::new();
    let outcome = CalculateArgs::default().run(&engine, &config);
    let result = outcome.result.unwrap();
    // $50 risk over 100 pips at $10/pip
    assert_eq!(result.lot_size, dec!(0.05));
    assert_eq!(result.pip_value, dec!(10));
}

#[test]
fn test_calculate_then_simulate() {
    let config = Config::default();
    let engine = PositionSizingEngine::new();

    let outcome = CalculateArgs::default().run(&engine, &config);
    let risk = outcome.result.unwrap().risk_amount;

    let sim = SimulateArgs {
        trades: "WWL".to_string(),
        amount: Some(risk),
        reset: false,
        format: fx_risk::cli::OutputFormat::Table,
    };
    let mut tracker = SessionTracker::new();
    let report = sim.replay(&mut tracker, &config).unwrap();

    assert_eq!(report.final_state.current_equity, dec!(10050));
    assert_eq!(report.metrics.daily_pnl, dec!(50));
    assert_eq!(report.steps.last().map(|s| s.trade), Some(3));
}
