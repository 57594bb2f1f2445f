//! Core traits for the feature pipeline.

mod data_source;
mod indicator;

pub use data_source::DataSource;
pub use indicator::{HlcIndicator, Indicator, MultiOutputIndicator};
