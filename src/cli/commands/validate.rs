//! Validate configuration command.

use anyhow::Result;
use chrono::Local;
use feature_config::AppConfig;
use feature_core::types::Variant;
use std::path::Path;

pub async fn run(config_path: Option<&Path>, config: &AppConfig) -> Result<()> {
    match config_path {
        Some(path) => println!("Validating configuration: {:?}", path),
        None => println!("Validating built-in defaults and environment"),
    }

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    let today = Local::now().date_naive();
    let pipeline = &config.pipeline;
    let (snap_start, snap_end) = pipeline.date_range(Variant::Snapshot, today);
    let (train_start, train_end) = pipeline.date_range(Variant::Training, today);

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Tickers: {}", pipeline.tickers.len());
    println!("Snapshot range: {} .. {}", snap_start, snap_end);
    println!("Training range: {} .. {}", train_start, train_end);
    println!("Snapshot output: {}", pipeline.output_for(Variant::Snapshot).display());
    println!("Training output: {}", pipeline.output_for(Variant::Training).display());
    match &pipeline.data_dir {
        Some(dir) => println!("Data source: CSV files in {}", dir.display()),
        None => println!("Data source: Yahoo Finance ({})", config.yahoo.base_url),
    }
    println!("Fail fast: {}", pipeline.fail_fast);

    Ok(())
}
