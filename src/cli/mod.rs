//! CLI definitions.

pub mod commands;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stock-features")]
#[command(author, version, about = "Download daily prices and build technical-indicator feature tables")]
pub struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, env = "STOCK_FEATURES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level, overrides the configured one
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the recent-history table used for scoring
    Snapshot(SnapshotArgs),
    /// Build the long-history table with the next-day return label
    Training(RunArgs),
    /// List configured tickers
    Tickers,
    /// Validate configuration
    ValidateConfig,
    /// Write the default configuration as TOML
    InitConfig(InitConfigArgs),
}

/// Options shared by both feature runs.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Tickers to process (comma-separated), defaults to the configured list
    #[arg(short = 'T', long, value_delimiter = ',')]
    pub tickers: Vec<String>,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// End date, exclusive (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Output CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read <TICKER>.csv files from this directory instead of Yahoo Finance
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Abort on the first data source error
    #[arg(long)]
    pub fail_fast: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args)]
pub struct SnapshotArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Also write the latest row per ticker to this file
    #[arg(long)]
    pub snapshot_output: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct InitConfigArgs {
    /// Destination file, prints to stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}
