//! CLI command implementations.

pub mod features;
pub mod init_config;
pub mod snapshot;
pub mod tickers;
pub mod training;
pub mod validate;
