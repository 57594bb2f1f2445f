//! Stock feature builder CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use feature_config::load_config;
use feature_monitor::setup_logging;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load configuration from {:?}", path),
        None => "Failed to load configuration from environment".to_string(),
    })?;

    // Setup logging
    let log_level = cli
        .log_level
        .map(|level| level.as_str().to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    let json_logs = cli.json_logs || config.logging.format == "json";
    let _guard = setup_logging(&log_level, json_logs, config.logging.file.as_deref().map(Path::new));

    // Execute command
    match cli.command {
        Commands::Snapshot(args) => cli::commands::snapshot::run(args, &config).await,
        Commands::Training(args) => cli::commands::training::run(args, &config).await,
        Commands::Tickers => cli::commands::tickers::run(&config).await,
        Commands::ValidateConfig => cli::commands::validate::run(cli.config.as_deref(), &config).await,
        Commands::InitConfig(args) => cli::commands::init_config::run(args).await,
    }
}
