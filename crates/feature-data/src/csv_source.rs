//! CSV data source.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use feature_core::error::DataError;
use feature_core::traits::DataSource;
use feature_core::types::Bar;
use tracing::debug;

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Open")]
    open: f64,
    #[serde(alias = "High")]
    high: f64,
    #[serde(alias = "Low")]
    low: f64,
    #[serde(alias = "Close")]
    close: f64,
    #[serde(alias = "Adj Close", alias = "Adj_Close", default)]
    adj_close: Option<f64>,
    #[serde(alias = "Volume", default)]
    volume: f64,
}

/// Directory of per-ticker CSV files (`AAPL.csv`, `aapl.csv`, `AAPL_daily.csv`).
pub struct CsvDataSource {
    dir: PathBuf,
}

impl CsvDataSource {
    /// Create a new CSV data source over `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, DataError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(DataError::SourceUnavailable(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Locate the file for a symbol, if any.
    fn find_file(&self, symbol: &str) -> Option<PathBuf> {
        let lower = symbol.to_lowercase();
        [
            format!("{}.csv", symbol),
            format!("{}.csv", lower),
            format!("{}_daily.csv", symbol),
            format!("{}_daily.csv", lower),
        ]
        .into_iter()
        .map(|name| self.dir.join(name))
        .find(|path| path.is_file())
    }

    /// Load all bars from a CSV file, sorted by date.
    fn load_from_path(path: &Path) -> Result<Vec<Bar>, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|e| DataError::ParseError(e.to_string()))?;

        let mut bars = Vec::new();

        for result in reader.deserialize() {
            let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;

            let date = parse_date(&record.date)?;
            let bar = Bar::new(
                date,
                record.open,
                record.high,
                record.low,
                record.close,
                record.volume.max(0.0).round() as u64,
            );

            bars.push(match record.adj_close {
                Some(adj) => bar.with_adj_close(adj),
                None => bar,
            });
        }

        bars.sort_by_key(|b| b.date);

        Ok(bars)
    }
}

/// Parse the date formats commonly found in exported price files.
fn parse_date(date_str: &str) -> Result<NaiveDate, DataError> {
    let date_str = date_str.trim();

    for format in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Ok(d);
        }
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.date());
        }
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}

#[async_trait]
impl DataSource for CsvDataSource {
    async fn get_daily_bars(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Bar>, DataError> {
        let Some(path) = self.find_file(symbol) else {
            debug!(symbol, dir = %self.dir.display(), "No CSV file for symbol");
            return Ok(vec![]);
        };

        let mut bars = Self::load_from_path(&path)?;
        bars.retain(|b| b.date >= start && b.date < end);
        Ok(bars)
    }

    fn name(&self) -> &str {
        "csv"
    }
}
