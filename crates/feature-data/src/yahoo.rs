//! Yahoo Finance data source.
//!
//! Fetches daily OHLCV bars from the v8 chart endpoint. An unknown symbol or
//! an empty range comes back as an empty vector; transport and HTTP failures
//! are returned as errors.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use feature_core::error::DataError;
use feature_core::traits::DataSource;
use feature_core::types::Bar;
use tracing::{debug, info};

/// Yahoo chart API configuration.
#[derive(Debug, Clone)]
pub struct YahooConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query2.finance.yahoo.com".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
        }
    }
}

/// Chart API response types
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjCloseData>>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseData {
    adjclose: Vec<Option<f64>>,
}

/// Yahoo Finance daily bar source.
pub struct YahooDataSource {
    config: YahooConfig,
    client: Client,
}

impl YahooDataSource {
    /// Create a new Yahoo data source.
    pub fn new(config: YahooConfig) -> Result<Self, DataError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn chart_url(&self, symbol: &str) -> String {
        format!(
            "{}/v8/finance/chart/{}",
            self.config.base_url.trim_end_matches('/'),
            symbol
        )
    }

    /// Unix seconds at midnight UTC.
    fn epoch(date: NaiveDate) -> i64 {
        date.and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or_default()
    }
}

/// Convert a chart response into bars.
fn parse_chart(symbol: &str, resp: ChartResponse) -> Result<Vec<Bar>, DataError> {
    let Some(results) = resp.chart.result else {
        return match resp.chart.error {
            Some(err) if err.code == "Not Found" => {
                debug!(symbol, "Chart lookup returned Not Found");
                Ok(vec![])
            }
            Some(err) => Err(DataError::ApiError(format!(
                "{}: {}",
                err.code, err.description
            ))),
            None => Ok(vec![]),
        };
    };

    let Some(data) = results.into_iter().next() else {
        return Ok(vec![]);
    };

    // No timestamps means no trading days in the range
    let Some(timestamps) = data.timestamp else {
        return Ok(vec![]);
    };

    let offset = data.meta.and_then(|m| m.gmtoffset).unwrap_or(0);

    let quote = data
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| DataError::ParseError("chart response has no quote data".into()))?;

    let adj_closes = data
        .indicators
        .adjclose
        .and_then(|v| v.into_iter().next())
        .map(|a| a.adjclose);

    let mut bars = Vec::with_capacity(timestamps.len());

    for (i, &ts) in timestamps.iter().enumerate() {
        let date = DateTime::from_timestamp(ts + offset, 0)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| DataError::ParseError(format!("invalid timestamp: {}", ts)))?;

        let field = |values: &[Option<f64>]| values.get(i).copied().flatten();
        let (Some(open), Some(high), Some(low), Some(close)) = (
            field(&quote.open),
            field(&quote.high),
            field(&quote.low),
            field(&quote.close),
        ) else {
            debug!(symbol, %date, "Skipping bar with missing prices");
            continue;
        };

        let volume = quote.volume.get(i).copied().flatten().unwrap_or(0);
        let adj_close = adj_closes
            .as_deref()
            .and_then(|v| v.get(i).copied().flatten())
            .unwrap_or(close);

        bars.push(Bar::new(date, open, high, low, close, volume).with_adj_close(adj_close));
    }

    Ok(bars)
}

#[async_trait]
impl DataSource for YahooDataSource {
    async fn get_daily_bars(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Bar>, DataError> {
        let url = self.chart_url(symbol);
        let params = [
            ("period1", Self::epoch(start).to_string()),
            ("period2", Self::epoch(end).to_string()),
            ("interval", "1d".to_string()),
            ("includeAdjustedClose", "true".to_string()),
            ("events", "div,splits".to_string()),
        ];

        let resp = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            debug!(symbol, "Chart endpoint returned 404");
            return Ok(vec![]);
        }
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(DataError::ApiError(format!("{}: {}", status, text)));
        }

        let chart: ChartResponse = resp
            .json()
            .await
            .map_err(|e| DataError::ParseError(format!("chart response for {}: {}", symbol, e)))?;

        let mut bars = parse_chart(symbol, chart)?;
        bars.retain(|b| b.date >= start && b.date < end);

        info!(symbol, bars = bars.len(), "Downloaded daily bars");
        Ok(bars)
    }

    fn name(&self) -> &str {
        "yahoo_finance"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Vec<Bar>, DataError> {
        let resp: ChartResponse = serde_json::from_str(json).unwrap();
        parse_chart("AAPL", resp)
    }

    #[test]
    fn test_parse_chart_bars() {
        // 2024-01-02 and 2024-01-03 14:30 UTC, gmtoffset -5h
        let json = r#"{"chart":{"result":[{
            "meta":{"gmtoffset":-18000},
            "timestamp":[1704205800,1704292200,1704378600],
            "indicators":{
                "quote":[{"open":[187.15,184.22,null],"high":[188.44,185.88,null],
                          "low":[183.89,183.43,null],"close":[185.64,184.25,null],
                          "volume":[82488700,58414500,null]}],
                "adjclose":[{"adjclose":[184.94,183.55,null]}]}}],"error":null}}"#;

        let bars = parse(json).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bars[1].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(bars[0].close, 185.64);
        assert_eq!(bars[0].adj_close, 184.94);
        assert_eq!(bars[1].volume, 58414500);
    }

    #[test]
    fn test_parse_chart_not_found_is_empty() {
        let json = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        assert!(parse(json).unwrap().is_empty());
    }

    #[test]
    fn test_parse_chart_other_error() {
        let json = r#"{"chart":{"result":null,"error":{"code":"Bad Request","description":"Invalid input"}}}"#;
        assert!(matches!(parse(json), Err(DataError::ApiError(_))));
    }

    #[test]
    fn test_parse_chart_without_timestamps() {
        let json = r#"{"chart":{"result":[{"meta":{},"indicators":{"quote":[{}]}}],"error":null}}"#;
        assert!(parse(json).unwrap().is_empty());
    }

    #[test]
    fn test_adj_close_falls_back_to_close() {
        let json = r#"{"chart":{"result":[{
            "timestamp":[1704205800],
            "indicators":{"quote":[{"open":[1.0],"high":[2.0],"low":[0.5],"close":[1.5],"volume":[null]}]}}],
            "error":null}}"#;

        let bars = parse(json).unwrap();
        assert_eq!(bars[0].adj_close, 1.5);
        assert_eq!(bars[0].volume, 0);
    }

    #[test]
    fn test_chart_url() {
        let source = YahooDataSource::new(YahooConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..YahooConfig::default()
        })
        .unwrap();
        assert_eq!(
            source.chart_url("MSFT"),
            "http://localhost:8080/v8/finance/chart/MSFT"
        );
        assert_eq!(
            YahooDataSource::epoch(NaiveDate::from_ymd_opt(1999, 1, 1).unwrap()),
            915148800
        );
    }
}
