//! Feature engineering stage.
//!
//! Turns a ticker's raw bars into enriched rows. Series shorter than
//! [`MIN_HISTORY`] are passed through with raw fields only; the gate covers
//! every derived column, not just the long-window ones.

use feature_core::error::FeatureResult;
use feature_core::traits::{HlcIndicator, Indicator, MultiOutputIndicator};
use feature_core::types::{EnrichedRow, FeatureSet, TickerSeries, Variant, MIN_HISTORY};
use feature_indicators::{returns, Atr, BollingerBands, Cci, Ema, Macd, Rsi, Sma, Stochastic};
use tracing::{debug, warn};

const SHORT_WINDOW: usize = 50;
const LONG_WINDOW: usize = MIN_HISTORY;
const RSI_WINDOW: usize = 14;
const VOLUME_WINDOW: usize = 20;
const VOLATILITY_WINDOW: usize = 21;

/// Derives indicator and calendar features for one ticker at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureEngineer {
    variant: Variant,
}

impl FeatureEngineer {
    pub fn new(variant: Variant) -> Self {
        Self { variant }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Enrich a series, returning one row per bar in date order.
    pub fn enrich(&self, series: &TickerSeries) -> Vec<EnrichedRow> {
        let features = match self.compute_features(series) {
            Ok(features) => features,
            Err(e) => {
                warn!(
                    ticker = %series.ticker,
                    error = %e,
                    "Not enough data points for {}",
                    series.ticker
                );
                return series
                    .iter()
                    .map(|bar| EnrichedRow::raw(series.ticker.clone(), *bar))
                    .collect();
            }
        };
        debug!(ticker = %series.ticker, rows = features.len(), "Computed features");

        series
            .iter()
            .zip(features)
            .map(|(bar, set)| EnrichedRow::enriched(series.ticker.clone(), *bar, set))
            .collect()
    }

    /// Compute the feature set for every bar.
    ///
    /// Fails with insufficient data when the series is shorter than the
    /// longest indicator window.
    pub fn compute_features(&self, series: &TickerSeries) -> FeatureResult<Vec<FeatureSet>> {
        let closes = series.closes();
        let sma_200 = Sma::new(LONG_WINDOW);
        sma_200.validate_data(&closes)?;

        let highs = series.highs();
        let lows = series.lows();
        let volumes = series.volumes();

        // Moving averages
        let sma_50 = Sma::new(SHORT_WINDOW).calculate(&closes);
        let sma_200 = sma_200.calculate(&closes);
        let ema_50 = Ema::new(SHORT_WINDOW).calculate(&closes);
        let ema_200 = Ema::new(LONG_WINDOW).calculate(&closes);

        // Momentum
        let rsi = Rsi::new(RSI_WINDOW).calculate(&closes);
        let stochastic = Stochastic::default().calculate_hlc(&highs, &lows, &closes);
        let macd = Macd::default().calculate(&closes);
        let cci = Cci::default().calculate_hlc(&highs, &lows, &closes);

        // Volatility
        let bands = BollingerBands::default().calculate(&closes);
        let atr = Atr::default().calculate_hlc(&highs, &lows, &closes);

        // Volume
        let volume_sma = Sma::new(VOLUME_WINDOW).calculate(&volumes);

        // Returns
        let daily_return = returns::pct_change(&closes);
        let volatility = returns::rolling_std(&daily_return, VOLATILITY_WINDOW);
        let next_day_return = if self.variant.has_label() {
            returns::lead(&daily_return, 1)
        } else {
            vec![None; closes.len()]
        };

        let features = series
            .iter()
            .enumerate()
            .map(|(i, bar)| FeatureSet {
                sma_50: sma_50[i],
                sma_200: sma_200[i],
                ema_50: ema_50[i],
                ema_200: ema_200[i],
                rsi: rsi[i],
                stochastic_oscillator: stochastic[i],
                macd: macd[i].macd,
                macd_signal: macd[i].signal,
                cci: cci[i],
                bollinger_high: bands[i].map(|b| b.upper),
                bollinger_low: bands[i].map(|b| b.lower),
                atr: atr[i],
                volume_sma_20: volume_sma[i],
                daily_return: daily_return[i],
                volatility: volatility[i],
                next_day_return: next_day_return[i],
                ..FeatureSet::for_date(bar.date)
            })
            .collect();

        Ok(features)
    }
}
