//! Kite Connect command-line client.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use kite_config::load_config;
use kite_monitor::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {:?}", cli.config))?;

    // CLI flags win over the configuration file
    let log_level = cli
        .log_level
        .map(|level| level.as_str().to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    setup_logging(&log_level, cli.json_logs || config.logging.json);

    match cli.command {
        Commands::User(command) => cli::commands::user::run(command, &config.kite).await,
        Commands::Portfolio(command) => cli::commands::portfolio::run(command, &config.kite).await,
        Commands::Session(command) => cli::commands::session::run(command, &config.kite).await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config, &config).await,
    }
}
