//! Momentum indicators.

use feature_core::traits::{HlcIndicator, Indicator, MultiOutputIndicator};
use serde::{Deserialize, Serialize};

use crate::moving_average::{ewm, mask_warmup};

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes
/// to evaluate overbought or oversold conditions.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Rsi {
    type Output = Option<f64>;

    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        // The first change is taken as zero so smoothing starts on row 0
        let mut gains = Vec::with_capacity(data.len());
        let mut losses = Vec::with_capacity(data.len());

        for i in 0..data.len() {
            let change = if i == 0 { 0.0 } else { data[i] - data[i - 1] };
            if change > 0.0 {
                gains.push(change);
                losses.push(0.0);
            } else {
                gains.push(0.0);
                losses.push(-change);
            }
        }

        // Wilder's smoothing: alpha = 1 / period
        let alpha = 1.0 / self.period as f64;
        let avg_gains = ewm(&gains, alpha);
        let avg_losses = ewm(&losses, alpha);

        let rsi: Vec<f64> = avg_gains
            .iter()
            .zip(avg_losses.iter())
            .map(|(&gain, &loss)| {
                if loss == 0.0 {
                    // Flat prices carry no momentum either way
                    if gain == 0.0 {
                        50.0
                    } else {
                        100.0
                    }
                } else {
                    100.0 - (100.0 / (1.0 + gain / loss))
                }
            })
            .collect();

        mask_warmup(rsi, self.period - 1)
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// MACD (Moving Average Convergence Divergence) output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    /// MACD line (fast EMA - slow EMA)
    pub macd: Option<f64>,
    /// Signal line (EMA of MACD)
    pub signal: Option<f64>,
}

/// MACD indicator.
///
/// Uses two EMAs to identify trend direction and momentum.
#[derive(Debug, Clone)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    /// Create a MACD with custom periods.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast > 0 && slow > 0 && signal > 0);
        assert!(fast < slow, "Fast period must be less than slow period");
        Self {
            fast_period: fast,
            slow_period: slow,
            signal_period: signal,
        }
    }

    fn alpha(period: usize) -> f64 {
        2.0 / (period as f64 + 1.0)
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for Macd {
    type Outputs = MacdOutput;

    fn calculate(&self, data: &[f64]) -> Vec<MacdOutput> {
        let mut result = vec![MacdOutput::default(); data.len()];

        // The MACD line exists once the slow EMA has warmed up
        let first_macd = self.slow_period - 1;
        if data.len() <= first_macd {
            return result;
        }

        let fast_ema = ewm(data, Self::alpha(self.fast_period));
        let slow_ema = ewm(data, Self::alpha(self.slow_period));

        let macd_line: Vec<f64> = fast_ema[first_macd..]
            .iter()
            .zip(slow_ema[first_macd..].iter())
            .map(|(f, s)| f - s)
            .collect();

        // Signal line is seeded on the first MACD value
        let signal_line = ewm(&macd_line, Self::alpha(self.signal_period));

        for (offset, (&macd, &signal)) in macd_line.iter().zip(signal_line.iter()).enumerate() {
            let out = &mut result[first_macd + offset];
            out.macd = Some(macd);
            if offset + 1 >= self.signal_period {
                out.signal = Some(signal);
            }
        }

        result
    }

    fn period(&self) -> usize {
        self.slow_period + self.signal_period - 1
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

/// Stochastic oscillator %K.
///
/// Compares closing price to the price range over a period.
#[derive(Debug, Clone)]
pub struct Stochastic {
    period: usize,
}

impl Stochastic {
    /// Create a new stochastic oscillator with the default window (14).
    pub fn new() -> Self {
        Self::with_period(14)
    }

    /// Create with a custom window.
    pub fn with_period(period: usize) -> Self {
        assert!(period > 0, "Period must be positive");
        Self { period }
    }
}

impl Default for Stochastic {
    fn default() -> Self {
        Self::new()
    }
}

impl HlcIndicator for Stochastic {
    type Output = Option<f64>;

    fn calculate_hlc(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<Option<f64>> {
        let len = high.len().min(low.len()).min(close.len());
        let mut result = vec![None; len];

        for i in (self.period - 1)..len {
            let start = i + 1 - self.period;
            let highest = high[start..=i]
                .iter()
                .cloned()
                .fold(f64::NEG_INFINITY, f64::max);
            let lowest = low[start..=i]
                .iter()
                .cloned()
                .fold(f64::INFINITY, f64::min);

            let range = highest - lowest;
            let k = if range == 0.0 {
                50.0 // Undefined, use midpoint
            } else {
                ((close[i] - lowest) / range) * 100.0
            };
            result[i] = Some(k);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "Stochastic"
    }
}
