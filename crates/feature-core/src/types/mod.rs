//! Core data types for the feature pipeline.

mod features;
mod ohlcv;
mod outcome;
mod variant;

pub use features::{EnrichedRow, FeatureSet, SnapshotRow};
pub use ohlcv::{Bar, TickerSeries, MIN_HISTORY};
pub use outcome::{TickerOutcome, TickerStatus};
pub use variant::Variant;
