//! Enriched rows and derived feature sets.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::Bar;

/// Derived indicator and calendar fields for one bar.
///
/// Indicator values are `None` while their window is warming up or when the
/// value is undefined for the bar.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureSet {
    pub sma_50: Option<f64>,
    pub sma_200: Option<f64>,
    pub ema_50: Option<f64>,
    pub ema_200: Option<f64>,
    pub rsi: Option<f64>,
    pub stochastic_oscillator: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub cci: Option<f64>,
    pub bollinger_high: Option<f64>,
    pub bollinger_low: Option<f64>,
    pub atr: Option<f64>,
    pub volume_sma_20: Option<f64>,
    pub daily_return: Option<f64>,
    pub volatility: Option<f64>,
    /// Month number, 1-12
    pub month: u32,
    /// Day of week, Monday = 0
    pub day_of_week: u32,
    /// Following row's daily return (training variant only)
    pub next_day_return: Option<f64>,
}

impl FeatureSet {
    /// Indicator and calendar columns written for every enriched row.
    pub const COLUMNS: [&'static str; 17] = [
        "SMA_50",
        "SMA_200",
        "EMA_50",
        "EMA_200",
        "RSI",
        "Stochastic_Oscillator",
        "MACD",
        "MACD_Signal",
        "CCI",
        "Bollinger_High",
        "Bollinger_Low",
        "ATR",
        "Volume_SMA_20",
        "Daily_Return",
        "Volatility",
        "Month",
        "Day_of_Week",
    ];

    /// Columns kept in the latest-row scoring snapshot.
    pub const SNAPSHOT_COLUMNS: [&'static str; 16] = [
        "SMA_50",
        "SMA_200",
        "EMA_50",
        "EMA_200",
        "RSI",
        "Stochastic_Oscillator",
        "MACD",
        "MACD_Signal",
        "CCI",
        "Bollinger_High",
        "Bollinger_Low",
        "ATR",
        "Volume_SMA_20",
        "Volatility",
        "Month",
        "Day_of_Week",
    ];

    /// Training label column.
    pub const LABEL_COLUMN: &'static str = "Next_Day_Return";

    /// Create a feature set with calendar fields taken from `date` and no indicator values.
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day_of_week: date.weekday().num_days_from_monday(),
            ..Self::default()
        }
    }

    /// Values in [`FeatureSet::COLUMNS`] order.
    pub fn values(&self) -> [Option<f64>; 17] {
        [
            self.sma_50,
            self.sma_200,
            self.ema_50,
            self.ema_200,
            self.rsi,
            self.stochastic_oscillator,
            self.macd,
            self.macd_signal,
            self.cci,
            self.bollinger_high,
            self.bollinger_low,
            self.atr,
            self.volume_sma_20,
            self.daily_return,
            self.volatility,
            Some(self.month as f64),
            Some(self.day_of_week as f64),
        ]
    }

    /// Values in [`FeatureSet::SNAPSHOT_COLUMNS`] order.
    pub fn snapshot_values(&self) -> [Option<f64>; 16] {
        [
            self.sma_50,
            self.sma_200,
            self.ema_50,
            self.ema_200,
            self.rsi,
            self.stochastic_oscillator,
            self.macd,
            self.macd_signal,
            self.cci,
            self.bollinger_high,
            self.bollinger_low,
            self.atr,
            self.volume_sma_20,
            self.volatility,
            Some(self.month as f64),
            Some(self.day_of_week as f64),
        ]
    }
}

/// A bar tagged with its ticker plus any derived features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRow {
    pub ticker: String,
    pub bar: Bar,
    /// `None` when the series was too short for indicators.
    pub features: Option<FeatureSet>,
}

impl EnrichedRow {
    /// Row carrying only the raw bar fields.
    pub fn raw(ticker: impl Into<String>, bar: Bar) -> Self {
        Self {
            ticker: ticker.into(),
            bar,
            features: None,
        }
    }

    /// Row carrying raw fields and derived features.
    pub fn enriched(ticker: impl Into<String>, bar: Bar, features: FeatureSet) -> Self {
        Self {
            ticker: ticker.into(),
            bar,
            features: Some(features),
        }
    }

    pub fn is_enriched(&self) -> bool {
        self.features.is_some()
    }
}

/// Latest row for one ticker, used as a model-scoring input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRow {
    pub ticker: String,
    pub date: NaiveDate,
    /// `None` when the ticker's series was too short for indicators.
    pub features: Option<FeatureSet>,
}

impl SnapshotRow {
    /// Values in [`FeatureSet::SNAPSHOT_COLUMNS`] order, all missing without features.
    pub fn values(&self) -> [Option<f64>; 16] {
        self.features
            .map(|f| f.snapshot_values())
            .unwrap_or([None; 16])
    }
}
