//! End-to-end pipeline runs against in-memory sources.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use feature_core::error::{DataError, FeatureError};
use feature_core::traits::DataSource;
use feature_core::types::{Bar, TickerStatus, Variant};
use feature_pipeline::{Pipeline, PipelineSettings};
use std::collections::HashMap;
use std::fs;

struct StaticSource {
    bars: HashMap<String, Vec<Bar>>,
}

impl StaticSource {
    fn new() -> Self {
        Self {
            bars: HashMap::new(),
        }
    }

    fn with(mut self, ticker: &str, bars: Vec<Bar>) -> Self {
        self.bars.insert(ticker.to_string(), bars);
        self
    }
}

#[async_trait]
impl DataSource for StaticSource {
    async fn get_daily_bars(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Bar>, DataError> {
        Ok(self
            .bars
            .get(symbol)
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start && b.date < end)
                    .copied()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Fails for one ticker, delegates the rest.
struct FlakySource {
    inner: StaticSource,
    broken: &'static str,
}

#[async_trait]
impl DataSource for FlakySource {
    async fn get_daily_bars(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Bar>, DataError> {
        if symbol == self.broken {
            return Err(DataError::ConnectionError("connection reset".into()));
        }
        self.inner.get_daily_bars(symbol, start, end).await
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 1, 3).unwrap()
}

fn end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()
}

fn trending(n: usize) -> Vec<Bar> {
    (0..n)
        .map(|i| {
            let c = 50.0 + i as f64 * 0.2 + (i as f64 * 0.7).cos();
            Bar::new(start() + Duration::days(i as i64), c - 0.3, c + 1.0, c - 1.2, c, 5_000 + i as u64)
        })
        .collect()
}

fn flat(n: usize, price: f64) -> Vec<Bar> {
    (0..n)
        .map(|i| Bar::new(start() + Duration::days(i as i64), price, price, price, price, 1_000))
        .collect()
}

fn tickers(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

#[tokio::test]
async fn test_row_count_is_sum_of_ticker_rows() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("training.csv");

    let source = StaticSource::new()
        .with("AAPL", trending(240))
        .with("MSFT", trending(210))
        .with("SNAP", trending(150));
    let settings = PipelineSettings::new(Variant::Training, tickers(&["AAPL", "MSFT", "SNAP"]), start(), end())
        .with_output(&output);

    let report = Pipeline::new(source, settings).unwrap().run().await.unwrap();

    assert_eq!(report.table.len(), 240 + 210 + 150);
    assert_eq!(report.table.tickers(), vec!["AAPL", "MSFT", "SNAP"]);
    assert_eq!(report.enriched_count(), 2);
    assert_eq!(report.outcomes[2].status, TickerStatus::InsufficientHistory);
    assert_eq!(report.outcomes[2].rows, 150);

    let written = fs::read_to_string(&output).unwrap();
    let mut lines = written.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("Ticker,Date,Open"));
    assert!(header.ends_with("Month,Day_of_Week,Next_Day_Return"));
    assert_eq!(lines.count(), 600);
}

#[tokio::test]
async fn test_ticker_without_data_is_excluded() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("snapshot.csv");

    let source = StaticSource::new().with("AAPL", trending(205));
    let settings = PipelineSettings::new(Variant::Snapshot, tickers(&["AAPL", "ZZZZ"]), start(), end())
        .with_output(&output);

    let report = Pipeline::new(source, settings).unwrap().run().await.unwrap();

    assert_eq!(report.table.len(), 205);
    assert_eq!(report.table.tickers(), vec!["AAPL"]);
    assert_eq!(report.outcomes[1].status, TickerStatus::NoData);
    assert_eq!(report.skipped_count(), 1);

    let written = fs::read_to_string(&output).unwrap();
    assert!(!written.contains("ZZZZ"));
    assert!(!written.contains("Next_Day_Return"));
}

#[tokio::test]
async fn test_no_data_anywhere_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("empty.csv");

    let settings = PipelineSettings::new(Variant::Training, tickers(&["NOPE"]), start(), end())
        .with_output(&output);
    let report = Pipeline::new(StaticSource::new(), settings)
        .unwrap()
        .run()
        .await
        .unwrap();

    assert!(report.table.is_empty());
    assert!(report.snapshot.is_empty());
    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written.trim_end(), "Ticker,Date,Open,High,Low,Close,Adj_Close,Volume");
}

#[tokio::test]
async fn test_constant_series_features() {
    let dir = tempfile::tempdir().unwrap();
    let source = StaticSource::new().with("FLAT", flat(250, 42.0));
    let settings = PipelineSettings::new(Variant::Snapshot, tickers(&["FLAT"]), start(), end())
        .with_output(dir.path().join("flat.csv"))
        .with_snapshot_output(dir.path().join("latest.csv"));

    let report = Pipeline::new(source, settings).unwrap().run().await.unwrap();

    assert_eq!(report.snapshot.len(), 1);
    let f = report.snapshot[0].features.unwrap();
    assert!((f.sma_50.unwrap() - 42.0).abs() < 1e-9);
    assert!((f.sma_200.unwrap() - 42.0).abs() < 1e-9);
    assert!((f.ema_50.unwrap() - 42.0).abs() < 1e-9);
    assert!((f.ema_200.unwrap() - 42.0).abs() < 1e-9);
    assert!((f.rsi.unwrap() - 50.0).abs() < 1e-9);
    assert_eq!(f.stochastic_oscillator, Some(50.0));
    assert!((f.bollinger_high.unwrap() - 42.0).abs() < 1e-9);
    assert!((f.bollinger_low.unwrap() - 42.0).abs() < 1e-9);
    assert!(f.atr.unwrap().abs() < 1e-12);
    assert!(f.macd.unwrap().abs() < 1e-9);
    assert_eq!(f.cci, Some(0.0));
    assert_eq!(f.volatility, Some(0.0));

    let latest = fs::read_to_string(dir.path().join("latest.csv")).unwrap();
    assert_eq!(latest.lines().count(), 2);
    assert!(latest.lines().nth(1).unwrap().starts_with("FLAT,42,42,"));
}

#[tokio::test]
async fn test_training_run_never_writes_snapshot_file() {
    let dir = tempfile::tempdir().unwrap();
    let latest = dir.path().join("latest.csv");
    let source = StaticSource::new().with("AAPL", trending(220));
    let settings = PipelineSettings::new(Variant::Training, tickers(&["AAPL"]), start(), end())
        .with_output(dir.path().join("training.csv"))
        .with_snapshot_output(&latest);

    let report = Pipeline::new(source, settings).unwrap().run().await.unwrap();

    assert_eq!(report.table.len(), 220);
    assert!(dir.path().join("training.csv").exists());
    assert!(!latest.exists());
}

#[tokio::test]
async fn test_snapshot_keeps_short_history_tickers() {
    let dir = tempfile::tempdir().unwrap();
    let latest = dir.path().join("latest.csv");
    let source = StaticSource::new()
        .with("LONG", trending(220))
        .with("SHORT", trending(150));
    let settings = PipelineSettings::new(Variant::Snapshot, tickers(&["SHORT", "LONG"]), start(), end())
        .with_output(dir.path().join("snapshot.csv"))
        .with_snapshot_output(&latest);

    let report = Pipeline::new(source, settings).unwrap().run().await.unwrap();

    let names: Vec<&str> = report.snapshot.iter().map(|r| r.ticker.as_str()).collect();
    assert_eq!(names, vec!["LONG", "SHORT"]);
    assert!(report.snapshot[0].features.is_some());
    assert!(report.snapshot[1].features.is_none());
    assert_eq!(report.snapshot[1].date, start() + Duration::days(149));

    let written = fs::read_to_string(&latest).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2], format!("SHORT{}", ",".repeat(16)));
}

#[tokio::test]
async fn test_source_error_is_skipped_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let source = FlakySource {
        inner: StaticSource::new().with("AAPL", trending(220)).with("MSFT", trending(220)),
        broken: "MSFT",
    };
    let settings = PipelineSettings::new(Variant::Training, tickers(&["MSFT", "AAPL"]), start(), end())
        .with_output(dir.path().join("out.csv"));

    let report = Pipeline::new(source, settings).unwrap().run().await.unwrap();

    assert_eq!(report.table.tickers(), vec!["AAPL"]);
    assert_eq!(report.outcomes[0].status, TickerStatus::NoData);
    assert_eq!(report.outcomes[1].status, TickerStatus::Enriched);
}

#[tokio::test]
async fn test_source_error_aborts_with_fail_fast() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.csv");
    let source = FlakySource {
        inner: StaticSource::new().with("AAPL", trending(220)),
        broken: "MSFT",
    };
    let settings = PipelineSettings::new(Variant::Training, tickers(&["AAPL", "MSFT"]), start(), end())
        .with_output(&output)
        .with_fail_fast(true);

    let result = Pipeline::new(source, settings).unwrap().run().await;

    assert!(matches!(
        result,
        Err(FeatureError::Data(DataError::ConnectionError(_)))
    ));
    assert!(!output.exists());
}

#[test]
fn test_invalid_settings_rejected() {
    let settings = PipelineSettings::new(Variant::Snapshot, vec![], start(), end());
    assert!(Pipeline::new(StaticSource::new(), settings).is_err());
}
