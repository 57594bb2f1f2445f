//! Combined table of enriched rows across tickers.

use std::collections::BTreeMap;
use feature_core::types::{EnrichedRow, SnapshotRow, Variant};

/// All enriched rows of a run, in ticker-list order then date order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CombinedTable {
    variant: Variant,
    rows: Vec<EnrichedRow>,
}

impl CombinedTable {
    /// Create an empty table.
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            rows: Vec::new(),
        }
    }

    /// Fold per-ticker results into one table. Empty results add nothing.
    pub fn from_results<I>(variant: Variant, results: I) -> Self
    where
        I: IntoIterator<Item = Vec<EnrichedRow>>,
    {
        results
            .into_iter()
            .fold(Self::new(variant), |mut table, rows| {
                table.append(rows);
                table
            })
    }

    /// Append one ticker's rows.
    pub fn append(&mut self, rows: Vec<EnrichedRow>) {
        self.rows.extend(rows);
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn rows(&self) -> &[EnrichedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether any row carries derived features.
    pub fn has_features(&self) -> bool {
        self.rows.iter().any(EnrichedRow::is_enriched)
    }

    /// Distinct tickers in first-seen order.
    pub fn tickers(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !seen.contains(&row.ticker.as_str()) {
                seen.push(&row.ticker);
            }
        }
        seen
    }

    /// Reduce to the chronologically last row per ticker, sorted by ticker.
    ///
    /// Every ticker in the table gets a row; features are `None` for tickers
    /// whose series was too short to enrich.
    pub fn latest_snapshot(&self) -> Vec<SnapshotRow> {
        let mut latest: BTreeMap<&str, &EnrichedRow> = BTreeMap::new();

        for row in &self.rows {
            latest
                .entry(row.ticker.as_str())
                .and_modify(|current| {
                    if row.bar.date >= current.bar.date {
                        *current = row;
                    }
                })
                .or_insert(row);
        }

        latest
            .into_values()
            .map(|row| SnapshotRow {
                ticker: row.ticker.clone(),
                date: row.bar.date,
                features: row.features,
            })
            .collect()
    }
}
