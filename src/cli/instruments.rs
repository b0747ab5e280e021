//! Instruments command implementation

use clap::Args;

use super::OutputFormat;
use crate::instrument::{Instrument, InstrumentRegistry};

#[derive(Args, Debug, Default)]
pub struct InstrumentsArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl InstrumentsArgs {
    pub fn listing(&self, registry: &InstrumentRegistry) -> Vec<Instrument> {
        registry.symbols().map(|s| registry.lookup(s)).collect()
    }

    pub fn execute(&self, registry: &InstrumentRegistry) -> anyhow::Result<()> {
        let listing = self.listing(registry);

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listing)?),
            OutputFormat::Table => {
                println!(
                    "{:<8} {:<11} {:>13} {:>9} {:>14}",
                    "SYMBOL", "CLASS", "CONTRACT SIZE", "PIP SIZE", "PIP MULTIPLIER"
                );
                for instrument in &listing {
                    println!(
                        "{:<8} {:<11} {:>13} {:>9} {:>14}",
                        instrument.symbol,
                        instrument.class.as_str(),
                        instrument.spec.contract_size,
                        instrument.spec.pip_size,
                        instrument.spec.pip_multiplier
                    );
                }
            }
        }

        Ok(())
    }
}
