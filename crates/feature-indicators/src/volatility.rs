//! Volatility indicators.

use feature_core::traits::{HlcIndicator, Indicator, MultiOutputIndicator};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Rolling population standard deviation (divides by N).
#[derive(Debug, Clone)]
pub struct StdDev {
    period: usize,
}

impl StdDev {
    pub fn new(period: usize) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        Self { period }
    }

    /// Standard deviation of one window.
    pub(crate) fn of_window(&self, window: &[f64]) -> f64 {
        window.iter().population_std_dev()
    }
}

impl Indicator for StdDev {
    type Output = Option<f64>;

    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        let mut result = vec![None; data.len()];
        if data.len() < self.period {
            return result;
        }

        for (i, window) in data.windows(self.period).enumerate() {
            result[self.period - 1 + i] = Some(self.of_window(window));
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "StdDev"
    }
}

/// Average True Range (ATR).
///
/// Measures market volatility by decomposing the entire range
/// of an asset price for that period.
#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
}

impl Atr {
    /// Create a new ATR indicator.
    ///
    /// Common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Default for Atr {
    fn default() -> Self {
        Self::new(14)
    }
}

impl HlcIndicator for Atr {
    type Output = Option<f64>;

    fn calculate_hlc(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<Option<f64>> {
        let len = high.len().min(low.len()).min(close.len());
        let mut result = vec![None; len];
        if len < self.period {
            return result;
        }

        // True range; the first bar has no previous close
        let mut tr = Vec::with_capacity(len);
        tr.push(high[0] - low[0]);
        for i in 1..len {
            let high_low = high[i] - low[i];
            let high_close = (high[i] - close[i - 1]).abs();
            let low_close = (low[i] - close[i - 1]).abs();
            tr.push(high_low.max(high_close).max(low_close));
        }

        let period_f64 = self.period as f64;

        // Initial ATR is SMA of first 'period' true ranges
        let mut atr: f64 = tr[..self.period].iter().sum::<f64>() / period_f64;
        result[self.period - 1] = Some(atr);

        // Wilder's smoothing
        for i in self.period..len {
            atr = (atr * (period_f64 - 1.0) + tr[i]) / period_f64;
            result[i] = Some(atr);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "ATR"
    }
}

/// Bollinger Bands output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerOutput {
    /// Upper band
    pub upper: f64,
    /// Lower band
    pub lower: f64,
}

/// Bollinger Bands.
///
/// Consists of a middle band (SMA) with upper and lower bands
/// at a specified number of population standard deviations.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    std_dev: StdDev,
    std_dev_multiplier: f64,
}

impl BollingerBands {
    /// Create new Bollinger Bands with default parameters (20, 2.0).
    pub fn new() -> Self {
        Self::with_params(20, 2.0)
    }

    /// Create Bollinger Bands with custom parameters.
    pub fn with_params(period: usize, std_dev_multiplier: f64) -> Self {
        assert!(
            std_dev_multiplier > 0.0,
            "Std dev multiplier must be positive"
        );
        Self {
            std_dev: StdDev::new(period),
            std_dev_multiplier,
        }
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for BollingerBands {
    type Outputs = Option<BollingerOutput>;

    fn calculate(&self, data: &[f64]) -> Vec<Option<BollingerOutput>> {
        let period = self.std_dev.period;
        let mut result = vec![None; data.len()];
        if data.len() < period {
            return result;
        }

        let period_f64 = period as f64;

        for (i, window) in data.windows(period).enumerate() {
            let mean: f64 = window.iter().sum::<f64>() / period_f64;
            let std_dev = self.std_dev.of_window(window);

            result[period - 1 + i] = Some(BollingerOutput {
                upper: mean + self.std_dev_multiplier * std_dev,
                lower: mean - self.std_dev_multiplier * std_dev,
            });
        }

        result
    }

    fn period(&self) -> usize {
        self.std_dev.period
    }

    fn name(&self) -> &str {
        "Bollinger Bands"
    }
}
