//! End-of-run summary.

use feature_core::types::{TickerOutcome, TickerStatus, Variant};
use serde::Serialize;
use std::fmt;

/// Counts and per-ticker outcomes of one run, for printing after the run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub variant: Variant,
    pub requested: usize,
    pub enriched: usize,
    pub insufficient_history: usize,
    pub no_data: usize,
    pub total_rows: usize,
    pub snapshot_rows: usize,
    pub elapsed_ms: u64,
    pub outcomes: Vec<TickerOutcome>,
}

impl RunSummary {
    pub fn from_outcomes(variant: Variant, outcomes: &[TickerOutcome]) -> Self {
        let count = |status| outcomes.iter().filter(|o| o.status == status).count();
        Self {
            variant,
            requested: outcomes.len(),
            enriched: count(TickerStatus::Enriched),
            insufficient_history: count(TickerStatus::InsufficientHistory),
            no_data: count(TickerStatus::NoData),
            total_rows: outcomes.iter().map(|o| o.rows).sum(),
            snapshot_rows: 0,
            elapsed_ms: 0,
            outcomes: outcomes.to_vec(),
        }
    }

    pub fn with_snapshot_rows(mut self, rows: usize) -> Self {
        self.snapshot_rows = rows;
        self
    }

    pub fn with_elapsed_ms(mut self, ms: u64) -> Self {
        self.elapsed_ms = ms;
        self
    }

    /// Tickers that contributed nothing.
    pub fn missing(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.status == TickerStatus::NoData)
            .map(|o| o.ticker.as_str())
            .collect()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run summary ({})", self.variant)?;
        writeln!(f, "  Tickers requested:     {}", self.requested)?;
        writeln!(f, "  Enriched:              {}", self.enriched)?;
        writeln!(f, "  Insufficient history:  {}", self.insufficient_history)?;
        writeln!(f, "  No data:               {}", self.no_data)?;
        writeln!(f, "  Rows written:          {}", self.total_rows)?;
        writeln!(f, "  Snapshot rows:         {}", self.snapshot_rows)?;
        writeln!(f, "  Elapsed:               {} ms", self.elapsed_ms)?;

        let missing = self.missing();
        if !missing.is_empty() {
            writeln!(f, "  Missing:               {}", missing.join(", "))?;
        }

        for outcome in &self.outcomes {
            writeln!(
                f,
                "    {:<8} {:>6} rows  {}",
                outcome.ticker, outcome.rows, outcome.status
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcomes() -> Vec<TickerOutcome> {
        vec![
            TickerOutcome::new("AAPL", TickerStatus::Enriched, 251),
            TickerOutcome::new("SNAP", TickerStatus::InsufficientHistory, 120),
            TickerOutcome::no_data("SQ"),
            TickerOutcome::new("MSFT", TickerStatus::Enriched, 251),
        ]
    }

    #[test]
    fn test_counts() {
        let summary = RunSummary::from_outcomes(Variant::Snapshot, &outcomes()).with_snapshot_rows(2);

        assert_eq!(summary.requested, 4);
        assert_eq!(summary.enriched, 2);
        assert_eq!(summary.insufficient_history, 1);
        assert_eq!(summary.no_data, 1);
        assert_eq!(summary.total_rows, 622);
        assert_eq!(summary.snapshot_rows, 2);
        assert_eq!(summary.missing(), vec!["SQ"]);
    }

    #[test]
    fn test_display_lists_every_ticker() {
        let text = RunSummary::from_outcomes(Variant::Training, &outcomes()).to_string();

        assert!(text.starts_with("Run summary (training)"));
        assert!(text.contains("Rows written:          622"));
        assert!(text.contains("SNAP"));
        assert!(text.contains("insufficient history"));
        assert!(text.contains("no data"));
        assert!(text.contains("Missing:               SQ\n"));
    }

    #[test]
    fn test_display_omits_missing_line_when_complete() {
        let all_found = vec![TickerOutcome::new("AAPL", TickerStatus::Enriched, 251)];
        let text = RunSummary::from_outcomes(Variant::Snapshot, &all_found).to_string();
        assert!(!text.contains("Missing"));
    }

    #[test]
    fn test_serializes_to_json() {
        let summary = RunSummary::from_outcomes(Variant::Training, &outcomes());
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["variant"], "training");
        assert_eq!(json["outcomes"][2]["status"], "no_data");
    }
}
