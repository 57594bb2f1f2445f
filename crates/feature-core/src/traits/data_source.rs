//! Data source trait definitions.

use crate::error::DataError;
use crate::types::Bar;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Trait for historical daily bar sources.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch daily bars.
    ///
    /// # Arguments
    /// * `symbol` - The symbol to fetch
    /// * `start` - First date of the range (inclusive)
    /// * `end` - End of the range (exclusive)
    ///
    /// # Returns
    /// Bars ordered from oldest to newest. An unknown symbol or an empty
    /// range yields an empty vector rather than an error.
    async fn get_daily_bars(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Bar>, DataError>;

    /// Get the data source name.
    fn name(&self) -> &str;
}
