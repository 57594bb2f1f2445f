//! Resolved run settings.

use chrono::NaiveDate;
use std::path::PathBuf;
use feature_core::error::{FeatureError, FeatureResult};
use feature_core::types::Variant;

/// Everything one pipeline run needs, with dates already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    pub variant: Variant,
    /// Tickers in processing order
    pub tickers: Vec<String>,
    /// First date requested (inclusive)
    pub start: NaiveDate,
    /// Last date requested (exclusive)
    pub end: NaiveDate,
    /// Combined table destination
    pub output: PathBuf,
    /// Latest-row snapshot destination, written by snapshot runs only
    pub snapshot_output: Option<PathBuf>,
    /// Abort the run on a data source error instead of skipping the ticker
    pub fail_fast: bool,
}

impl PipelineSettings {
    /// Settings with the variant's default output file and no snapshot file.
    pub fn new(variant: Variant, tickers: Vec<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            variant,
            tickers,
            start,
            end,
            output: PathBuf::from(variant.default_output()),
            snapshot_output: None,
            fail_fast: false,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_snapshot_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.snapshot_output = Some(output.into());
        self
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Check the settings describe a runnable batch.
    pub fn validate(&self) -> FeatureResult<()> {
        if self.tickers.is_empty() {
            return Err(FeatureError::Validation("ticker list is empty".into()));
        }
        if let Some(blank) = self.tickers.iter().find(|t| t.trim().is_empty()) {
            return Err(FeatureError::Validation(format!(
                "ticker list contains a blank entry: {:?}",
                blank
            )));
        }
        if self.start >= self.end {
            return Err(FeatureError::Validation(format!(
                "start date {} must be before end date {}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}
