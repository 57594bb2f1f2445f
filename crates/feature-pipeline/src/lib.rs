//! Feature pipeline.
//!
//! Fetches daily bars per ticker from a [`DataSource`](feature_core::DataSource),
//! enriches each series with indicator features, folds the results into one
//! table and writes it as CSV.

pub mod aggregate;
pub mod engineer;
pub mod runner;
pub mod settings;
pub mod sink;

pub use aggregate::CombinedTable;
pub use engineer::FeatureEngineer;
pub use runner::{Pipeline, RunReport};
pub use settings::PipelineSettings;
