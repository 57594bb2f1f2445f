//! OHLCV (Open, High, Low, Close, Volume) data types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of observations required before any indicator is computed.
///
/// Matches the longest indicator window (SMA/EMA 200).
pub const MIN_HISTORY: usize = 200;

/// One trading day for one ticker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Trading date
    pub date: NaiveDate,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Split/dividend adjusted closing price
    pub adj_close: f64,
    /// Trading volume
    pub volume: u64,
}

impl Bar {
    /// Create a new bar. The adjusted close defaults to the close.
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            adj_close: close,
            volume,
        }
    }

    /// Set the adjusted close.
    pub fn with_adj_close(mut self, adj_close: f64) -> Self {
        self.adj_close = adj_close;
        self
    }
}

/// Ordered daily bars for a single ticker, ascending by date.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerSeries {
    /// Ticker symbol
    pub ticker: String,
    bars: Vec<Bar>,
}

impl TickerSeries {
    /// Build a series, sorting by date and dropping repeated dates (first one wins).
    pub fn new(ticker: impl Into<String>, mut bars: Vec<Bar>) -> Self {
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        Self {
            ticker: ticker.into(),
            bars,
        }
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Whether the series is long enough for the long-window indicators.
    pub fn has_min_history(&self) -> bool {
        self.bars.len() >= MIN_HISTORY
    }

    /// Get all bars as a slice.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Extract high prices as a vector.
    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    /// Extract low prices as a vector.
    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    /// Extract volumes as a vector.
    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume as f64).collect()
    }

    /// Get an iterator over the bars.
    pub fn iter(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_adj_close_defaults_to_close() {
        let bar = Bar::new(day(2), 1.0, 2.0, 0.5, 1.5, 10);
        assert_eq!(bar.adj_close, 1.5);
        assert_eq!(bar.with_adj_close(1.2).adj_close, 1.2);
    }

    #[test]
    fn test_series_sorted_and_deduplicated() {
        let series = TickerSeries::new(
            "AAPL",
            vec![
                Bar::new(day(4), 3.0, 3.0, 3.0, 3.0, 30),
                Bar::new(day(2), 1.0, 1.0, 1.0, 1.0, 10),
                Bar::new(day(3), 2.0, 2.0, 2.0, 2.0, 20),
                Bar::new(day(3), 9.0, 9.0, 9.0, 9.0, 90),
            ],
        );

        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![1.0, 2.0, 3.0]);
        assert_eq!(series.volumes(), vec![10.0, 20.0, 30.0]);
        assert_eq!(series.bars()[2].date, day(4));
        assert!(!series.has_min_history());
    }
}
