use clap::Parser;
use fx_risk::cli::{Cli, Commands};
use fx_risk::config::Config;
use fx_risk::sizing::PositionSizingEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    let _telemetry = fx_risk::telemetry::init_telemetry(&config.telemetry)?;

    let engine = PositionSizingEngine::new();

    match cli.command {
        Commands::Calculate(args) => {
            tracing::debug!("Running position calculation");
            args.execute(&engine, &config)?;
        }
        Commands::Simulate(args) => {
            tracing::info!("Starting session simulation");
            args.execute(&config).await?;
        }
        Commands::Instruments(args) => {
            args.execute(engine.registry())?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
