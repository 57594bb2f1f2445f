//! Trend indicators.

use feature_core::traits::HlcIndicator;

/// Commodity Channel Index (CCI).
///
/// Distance of the typical price from its moving average, scaled by the
/// mean absolute deviation.
#[derive(Debug, Clone)]
pub struct Cci {
    period: usize,
    constant: f64,
}

impl Cci {
    /// Create a CCI with the default parameters (20, 0.015).
    pub fn new() -> Self {
        Self::with_params(20, 0.015)
    }

    /// Create a CCI with custom parameters.
    pub fn with_params(period: usize, constant: f64) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        assert!(constant > 0.0, "Constant must be positive");
        Self { period, constant }
    }
}

impl Default for Cci {
    fn default() -> Self {
        Self::new()
    }
}

impl HlcIndicator for Cci {
    type Output = Option<f64>;

    fn calculate_hlc(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<Option<f64>> {
        let len = high.len().min(low.len()).min(close.len());
        let mut result = vec![None; len];
        if len < self.period {
            return result;
        }

        let typical: Vec<f64> = (0..len)
            .map(|i| (high[i] + low[i] + close[i]) / 3.0)
            .collect();
        let period_f64 = self.period as f64;

        for (i, window) in typical.windows(self.period).enumerate() {
            let mean: f64 = window.iter().sum::<f64>() / period_f64;
            let mean_dev: f64 = window.iter().map(|x| (x - mean).abs()).sum::<f64>() / period_f64;
            let current = window[self.period - 1];

            let cci = if mean_dev == 0.0 {
                0.0
            } else {
                (current - mean) / (self.constant * mean_dev)
            };
            result[self.period - 1 + i] = Some(cci);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "CCI"
    }
}
