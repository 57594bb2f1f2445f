//! Configuration structures.

use chrono::{Duration, NaiveDate};
use feature_core::error::{FeatureError, FeatureResult};
use feature_core::types::Variant;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub yahoo: YahooSettings,
}

impl AppConfig {
    /// Reject settings no run could succeed with.
    pub fn validate(&self) -> FeatureResult<()> {
        self.pipeline.validate()?;
        if self.yahoo.timeout_secs == 0 {
            return Err(FeatureError::Config("yahoo.timeout_secs must be positive".into()));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(FeatureError::Config(format!(
                "logging.format must be \"pretty\" or \"json\", got {:?}",
                self.logging.format
            )));
        }
        Ok(())
    }
}

/// General app settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "stock-features".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

const DEFAULT_TICKERS: [&str; 24] = [
    "AAPL", "MSFT", "GOOGL", "AMZN", "META", "NVDA", "TSLA", "ADBE", "NFLX", "CSCO", "INTC",
    "ORCL", "IBM", "CRM", "PYPL", "QCOM", "TXN", "AVGO", "AMD", "INTU", "SHOP", "SNAP", "SQ",
    "UBER",
];

/// Batch settings shared by both variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub tickers: Vec<String>,
    /// Calendar days of history for the snapshot variant
    pub lookback_days: u32,
    /// First date for the training variant
    pub training_start: NaiveDate,
    /// Explicit start date, overriding the variant's default
    pub start: Option<NaiveDate>,
    /// Explicit end date (exclusive), defaults to today
    pub end: Option<NaiveDate>,
    pub output: Option<PathBuf>,
    pub snapshot_output: Option<PathBuf>,
    /// Read `<TICKER>.csv` files from here instead of calling Yahoo
    pub data_dir: Option<PathBuf>,
    pub fail_fast: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tickers: DEFAULT_TICKERS.iter().map(|t| t.to_string()).collect(),
            lookback_days: 365,
            training_start: NaiveDate::from_ymd_opt(1999, 1, 1).unwrap_or_default(),
            start: None,
            end: None,
            output: None,
            snapshot_output: None,
            data_dir: None,
            fail_fast: false,
        }
    }
}

impl PipelineConfig {
    /// Resolve the `[start, end)` range for a variant relative to `today`.
    pub fn date_range(&self, variant: Variant, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let end = self.end.unwrap_or(today);
        let start = self.start.unwrap_or(match variant {
            Variant::Snapshot => end - Duration::days(i64::from(self.lookback_days)),
            Variant::Training => self.training_start,
        });
        (start, end)
    }

    /// Output path for a variant.
    pub fn output_for(&self, variant: Variant) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(variant.default_output()))
    }

    pub fn validate(&self) -> FeatureResult<()> {
        if self.tickers.is_empty() {
            return Err(FeatureError::Config("pipeline.tickers is empty".into()));
        }
        if self.lookback_days == 0 {
            return Err(FeatureError::Config("pipeline.lookback_days must be positive".into()));
        }
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start >= end {
                return Err(FeatureError::Config(format!(
                    "pipeline.start {} must be before pipeline.end {}",
                    start, end
                )));
            }
        }
        Ok(())
    }
}

/// Yahoo Finance chart API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YahooSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for YahooSettings {
    fn default() -> Self {
        Self {
            base_url: "https://query2.finance.yahoo.com".to_string(),
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
        }
    }
}
