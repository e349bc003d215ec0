//! Vasari CLI binary.
//!
//! - `vasari run` executes a single run and prints the report
//! - `vasari serve` exposes the HTTP run trigger and the optional schedule
//! - `vasari check-config` prints the effective configuration

use clap::Parser;
use vasari::{ObservabilityConfig, VasariConfig, init_observability_with_config};

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use cli::{Cli, Commands, check_config, run_once, serve_trigger};

    // Secrets may live in a local .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = VasariConfig::load(cli.config.as_deref())?;

    init_observability_with_config(ObservabilityConfig::from_logging(
        config.logging(),
        cli.verbose,
    ))
    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    match cli.command {
        Commands::Run { quota, dry_run } => {
            let config = if dry_run { config.into_dry_run() } else { config };
            config.validate()?;
            run_once(config, quota).await?;
        }

        Commands::Serve {
            bind,
            no_schedule,
            dry_run,
        } => {
            let config = if dry_run { config.into_dry_run() } else { config };
            let config = match bind {
                Some(bind) => config.with_bind(bind),
                None => config,
            };
            config.validate()?;
            serve_trigger(config, no_schedule).await?;
        }

        Commands::CheckConfig => {
            config.validate()?;
            check_config(&config)?;
        }
    }

    Ok(())
}
