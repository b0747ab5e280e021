//! Calculate command implementation

use clap::Args;
use serde::Serialize;

use super::OutputFormat;
use crate::alerts::{AlertBoard, AlertPolicy};
use crate::config::Config;
use crate::sizing::{PositionResult, PositionSizer, RawTradeInput, SizingError, TradeRequest};

#[derive(Args, Debug, Default)]
pub struct CalculateArgs {
    /// Account size in USD
    #[arg(long)]
    pub account_size: Option<String>,

    /// Risk per trade in percent
    #[arg(long)]
    pub risk_percent: Option<String>,

    /// Entry price
    #[arg(long)]
    pub entry: Option<String>,

    /// Stop-loss price
    #[arg(long, alias = "exit")]
    pub stop: Option<String>,

    /// Instrument symbol, e.g. EURUSD or XAU/USD
    #[arg(long)]
    pub pair: Option<String>,

    /// Account leverage, e.g. 100 for 1:100
    #[arg(long)]
    pub leverage: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Everything one calculation produces for display
#[derive(Debug, Serialize)]
pub struct CalculationOutcome {
    pub request: TradeRequest,
    /// Rounded to display precision
    pub result: Option<PositionResult>,
    pub error: Option<String>,
    pub alerts: AlertBoard,
    #[serde(skip)]
    pub failure: Option<SizingError>,
}

impl CalculateArgs {
    fn raw_input(&self) -> RawTradeInput {
        RawTradeInput {
            account_size: self.account_size.clone(),
            risk_percent: self.risk_percent.clone(),
            entry_price: self.entry.clone(),
            stop_loss: self.stop.clone(),
            currency_pair: self.pair.clone(),
            leverage: self.leverage.clone(),
        }
    }

    /// Parse input, size the position and evaluate the trading rules
    pub fn run(&self, sizer: &dyn PositionSizer, config: &Config) -> CalculationOutcome {
        let request = self.raw_input().parse(&config.calculator);
        let policy = AlertPolicy::from_config(&config.alerts);
        let mut alerts = AlertBoard::new();

        match sizer.calculate(&request) {
            Ok(position) => {
                alerts.extend(policy.evaluate_position(&position));
                CalculationOutcome {
                    request,
                    result: Some(position.rounded()),
                    error: None,
                    alerts,
                    failure: None,
                }
            }
            Err(e) => {
                alerts.push(policy.calculation_failed(&e));
                CalculationOutcome {
                    request,
                    result: None,
                    error: Some(e.to_string()),
                    alerts,
                    failure: Some(e),
                }
            }
        }
    }

    pub fn execute(&self, sizer: &dyn PositionSizer, config: &Config) -> anyhow::Result<()> {
        let outcome = self.run(sizer, config);

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
            OutputFormat::Table => {
                if let Some(ref position) = outcome.result {
                    print!("{position}");
                }
                for alert in outcome.alerts.alerts() {
                    println!("{alert}");
                }
            }
        }

        match outcome.failure {
            Some(e) if e.is_input_error() => anyhow::bail!("Invalid calculator input"),
            Some(_) => anyhow::bail!("Position calculation failed"),
            None => Ok(()),
        }
    }
}
