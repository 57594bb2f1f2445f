//! Pipeline variants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which flavour of output the pipeline produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Recent history for scoring; latest row per ticker can be extracted.
    #[default]
    Snapshot,
    /// Long history with a next-day return label.
    Training,
}

impl Variant {
    /// Whether rows carry the `Next_Day_Return` label.
    pub fn has_label(&self) -> bool {
        matches!(self, Variant::Training)
    }

    /// Output file used when none is configured.
    pub fn default_output(&self) -> &'static str {
        match self {
            Variant::Snapshot => "sp500_test_data.csv",
            Variant::Training => "sp500_data_with_indicators.csv",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Variant::Snapshot => "snapshot",
            Variant::Training => "training",
        };
        write!(f, "{}", s)
    }
}
