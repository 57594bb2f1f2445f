//! Daily bar sources for the feature pipeline.

mod csv_source;
mod yahoo;

pub use csv_source::CsvDataSource;
pub use yahoo::{YahooConfig, YahooDataSource};
