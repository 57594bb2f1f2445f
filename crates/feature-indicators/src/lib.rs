//! Technical indicators.
//!
//! This crate provides implementations of the indicators used for feature
//! engineering:
//! - Moving averages (SMA, EMA)
//! - Momentum indicators (RSI, MACD, Stochastic)
//! - Trend indicators (CCI)
//! - Volatility indicators (ATR, Bollinger Bands, Standard Deviation)
//! - Return helpers (percent change, rolling sample deviation, lead)
//!
//! Every indicator returns one value per input point, so outputs line up
//! index-for-index with the bars they came from.

pub mod momentum;
pub mod moving_average;
pub mod returns;
pub mod trend;
pub mod volatility;

pub use momentum::{Macd, MacdOutput, Rsi, Stochastic};
pub use moving_average::{Ema, Sma};
pub use trend::Cci;
pub use volatility::{Atr, BollingerBands, BollingerOutput, StdDev};
