//! Indicator trait definitions.

use crate::error::IndicatorError;

/// Trait for technical indicators over a single input series.
///
/// Implementations return one output per input point so results stay
/// aligned with the bars they were computed from. Points inside the
/// warm-up window are reported as `None` by the output type.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    ///
    /// # Arguments
    /// * `data` - Input data (typically prices)
    ///
    /// # Returns
    /// A vector of indicator values, same length as `data`
    fn calculate(&self, data: &[f64]) -> Vec<Self::Output>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Validate that there's enough data.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        if data.len() < self.period() {
            return Err(IndicatorError::InsufficientData {
                required: self.period(),
                available: data.len(),
            });
        }
        Ok(())
    }
}

/// Multi-output indicator (e.g., Bollinger Bands, MACD).
///
/// Some indicators produce multiple related values.
pub trait MultiOutputIndicator: Send + Sync {
    /// The output type containing multiple values.
    type Outputs;

    /// Calculate indicator values for the given data.
    fn calculate(&self, data: &[f64]) -> Vec<Self::Outputs>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}

/// Indicator that uses high, low and close series (Stochastic, ATR, CCI).
pub trait HlcIndicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values from HLC data.
    ///
    /// # Arguments
    /// * `high` - High prices
    /// * `low` - Low prices
    /// * `close` - Close prices
    ///
    /// The output length is the shortest of the three inputs.
    fn calculate_hlc(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<Self::Output>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}
