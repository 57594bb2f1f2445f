//! Per-ticker run outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened to a ticker during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickerStatus {
    /// Indicators were computed.
    Enriched,
    /// Raw rows were kept, indicators skipped.
    InsufficientHistory,
    /// Nothing was returned; ticker excluded from the output.
    NoData,
}

impl fmt::Display for TickerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TickerStatus::Enriched => "enriched",
            TickerStatus::InsufficientHistory => "insufficient history",
            TickerStatus::NoData => "no data",
        };
        write!(f, "{}", s)
    }
}

/// Result record for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerOutcome {
    pub ticker: String,
    pub status: TickerStatus,
    /// Rows contributed to the combined table
    pub rows: usize,
}

impl TickerOutcome {
    pub fn new(ticker: impl Into<String>, status: TickerStatus, rows: usize) -> Self {
        Self {
            ticker: ticker.into(),
            status,
            rows,
        }
    }

    pub fn no_data(ticker: impl Into<String>) -> Self {
        Self::new(ticker, TickerStatus::NoData, 0)
    }
}
