//! Simulate command implementation

use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::broadcast::error::RecvError;

use super::OutputFormat;
use crate::alerts::{Alert, AlertBoard, AlertKind, AlertPolicy, Severity};
use crate::config::Config;
use crate::session::{DerivedMetrics, SessionState, SessionTracker};

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Trade outcomes in order, W for a win and L for a loss (e.g. WWWL)
    #[arg(long, default_value = "")]
    pub trades: String,

    /// Equity moved per simulated trade (defaults to config)
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Reset the session after replaying the trades
    #[arg(long)]
    pub reset: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Session figures after one simulated trade
#[derive(Debug, Clone, Serialize)]
pub struct SimulationStep {
    pub trade: usize,
    pub won: bool,
    pub equity: Decimal,
    pub metrics: DerivedMetrics,
}

/// Result of replaying a trade sequence
#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub steps: Vec<SimulationStep>,
    pub final_state: SessionState,
    pub metrics: DerivedMetrics,
    pub alerts: Vec<Alert>,
}

/// Parse a W/L sequence. Whitespace and commas are ignored.
pub fn parse_outcomes(trades: &str) -> anyhow::Result<Vec<bool>> {
    trades
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| match c.to_ascii_uppercase() {
            'W' => Ok(true),
            'L' => Ok(false),
            other => Err(anyhow::anyhow!(
                "Invalid trade outcome '{}', expected W or L",
                other
            )),
        })
        .collect()
}

impl SimulateArgs {
    /// Replay the trade sequence through `tracker`
    ///
    /// Metric alerts are re-evaluated by a tracker listener on every
    /// notification, replacing the previous set.
    pub fn replay(
        &self,
        tracker: &mut SessionTracker,
        config: &Config,
    ) -> anyhow::Result<SimulationReport> {
        let outcomes = parse_outcomes(&self.trades)?;
        let amount = self
            .amount
            .unwrap_or(config.session.simulated_trade_amount)
            .abs();
        let policy = AlertPolicy::from_config(&config.alerts);

        let board = Arc::new(Mutex::new(AlertBoard::new()));
        let listener_board = board.clone();
        let listener_policy = policy.clone();
        let subscription = tracker.subscribe(move |state| {
            let alerts = listener_policy.evaluate_metrics(&state.metrics());
            listener_board
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .replace_metric_alerts(alerts);
        });

        let mut steps = Vec::with_capacity(outcomes.len());
        for (i, won) in outcomes.into_iter().enumerate() {
            tracker.simulate_trade(won, amount);
            push_alert(&board, trade_alert(won, amount));

            steps.push(SimulationStep {
                trade: i + 1,
                won,
                equity: tracker.state().current_equity,
                metrics: tracker.metrics(),
            });
        }

        if self.reset {
            tracker.reset();
            board.lock().unwrap_or_else(PoisonError::into_inner).clear();
            push_alert(
                &board,
                Alert::new(
                    AlertKind::AccountReset,
                    Severity::Info,
                    "Account reset to starting values",
                ),
            );
        }

        tracker.unsubscribe(subscription);

        let alerts = board
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .alerts()
            .to_vec();

        Ok(SimulationReport {
            steps,
            final_state: tracker.state().clone(),
            metrics: tracker.metrics(),
            alerts,
        })
    }

    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut tracker = SessionTracker::with_feed_capacity(config.session.feed_capacity);
        let mut feed = tracker.feed();

        let drain = tokio::spawn(async move {
            let mut received = 0usize;
            loop {
                match feed.recv().await {
                    Ok(state) => {
                        received += 1;
                        tracing::debug!(
                            trades = state.trades_count,
                            equity = %state.current_equity,
                            "Session snapshot"
                        );
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Session feed lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            received
        });

        let report = self.replay(&mut tracker, config)?;
        drop(tracker);
        let received = drain.await?;
        tracing::info!(snapshots = received, "Simulation complete");

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Table => print_report(&report),
        }

        Ok(())
    }
}

fn push_alert(board: &Mutex<AlertBoard>, alert: Alert) {
    board
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(alert);
}

fn trade_alert(won: bool, amount: Decimal) -> Alert {
    let amount = amount.round_dp(2);
    if won {
        Alert::new(
            AlertKind::TradeSimulated,
            Severity::Info,
            format!("Winning trade simulated: +${amount:.2}"),
        )
    } else {
        Alert::new(
            AlertKind::TradeSimulated,
            Severity::Danger,
            format!("Losing trade simulated: -${amount:.2}"),
        )
    }
}

fn print_report(report: &SimulationReport) {
    for step in &report.steps {
        println!(
            "Trade {:>3}: {:<4} equity ${:.2}  daily P&L {}${:.2}  drawdown {:.2}%  win rate {:.1}%",
            step.trade,
            if step.won { "WIN" } else { "LOSS" },
            step.equity,
            if step.metrics.daily_pnl >= Decimal::ZERO { "+" } else { "-" },
            step.metrics.daily_pnl.abs(),
            step.metrics.drawdown_percent,
            step.metrics.win_rate,
        );
    }

    let state = &report.final_state;
    println!();
    println!("Starting Capital:  ${:.2}", state.starting_capital);
    println!("Current Equity:    ${:.2}", state.current_equity);
    println!("Trades:            {}", state.trades_count);
    println!("Current Pair:      {}", state.current_pair);
    println!(
        "Session Active:    {}",
        if state.session_active { "Yes" } else { "No" }
    );
    println!("Days Since Break:  {}", state.days_since_break);
    println!("Win Rate:          {:.1}%", report.metrics.win_rate);
    println!("Daily Target:      {:.0}%", report.metrics.target_progress);

    if !report.alerts.is_empty() {
        println!();
        for alert in &report.alerts {
            println!("{alert}");
        }
    }
}
