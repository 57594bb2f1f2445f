//! Core types and traits for the feature pipeline.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, TickerSeries)
//! - Enriched rows, feature sets and snapshot rows
//! - Per-ticker run outcomes
//! - Core traits for indicators and data sources

pub mod types;
pub mod traits;
pub mod error;

pub use error::{FeatureError, FeatureResult};
pub use types::*;
pub use traits::*;
