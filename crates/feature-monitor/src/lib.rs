//! Logging and run reporting.

mod logging;
mod summary;

pub use logging::setup_logging;
pub use summary::RunSummary;
