//! CLI interface for fx-risk
//!
//! Provides subcommands for:
//! - `calculate`: Size a position from raw input
//! - `simulate`: Replay demo wins/losses through a session tracker
//! - `instruments`: List the instrument table
//! - `config`: Show the effective configuration

mod calculate;
mod instruments;
mod simulate;

pub use calculate::{CalculateArgs, CalculationOutcome};
pub use instruments::InstrumentsArgs;
pub use simulate::{parse_outcomes, SimulateArgs, SimulationReport, SimulationStep};

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "fx-risk")]
#[command(about = "Forex position sizing and trading session risk tracker")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Size a position from account, risk and price input
    Calculate(CalculateArgs),
    /// Replay simulated wins and losses through a session
    Simulate(SimulateArgs),
    /// List known instruments
    Instruments(InstrumentsArgs),
    /// Show effective configuration
    Config,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}
