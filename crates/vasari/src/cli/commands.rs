//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Vasari - budgeted posting and replying for a social page
#[derive(Parser, Debug)]
#[command(name = "vasari")]
#[command(about = "Budgeted posting and replying for a social page", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file to use instead of ./vasari.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a single run and print its report as JSON
    Run {
        /// Write actions to spend, overriding run.quota
        #[arg(long)]
        quota: Option<u32>,

        /// Log writes instead of sending them
        #[arg(long)]
        dry_run: bool,
    },

    /// Serve the HTTP run trigger, plus the configured schedule
    Serve {
        /// Socket address to listen on, overriding server.bind
        #[arg(long)]
        bind: Option<String>,

        /// Ignore the [schedule] section
        #[arg(long)]
        no_schedule: bool,

        /// Log writes instead of sending them
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate configuration and print it with secrets removed
    CheckConfig,
}
