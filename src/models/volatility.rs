//! Historical volatility
//!
//! Annualized standard deviation of the trailing window of simple daily
//! returns, in percent. No smoothing or outlier handling.

use statrs::statistics::Statistics;

use crate::config::ModelConfig;
use crate::core::PriceSeries;

/// Trailing-window close-to-close volatility estimator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilityEstimator {
    /// Number of most recent returns in the window
    pub window: usize,
    /// Annualization factor (trading days per year)
    pub trading_days: f64,
}

impl Default for VolatilityEstimator {
    fn default() -> Self {
        Self {
            window: 20,
            trading_days: 252.0,
        }
    }
}

impl VolatilityEstimator {
    pub fn new(window: usize, trading_days: f64) -> Self {
        Self { window, trading_days }
    }

    pub fn from_config(config: &ModelConfig) -> Self {
        Self::new(config.volatility_window, config.trading_days)
    }

    /// Annualized volatility in percent, or `None` when fewer than `window`
    /// returns are available.
    pub fn estimate(&self, prices: &PriceSeries) -> Option<f64> {
        self.estimate_from_returns(&prices.daily_returns())
    }

    /// Same as [`estimate`](Self::estimate) on a precomputed return series
    pub fn estimate_from_returns(&self, returns: &[f64]) -> Option<f64> {
        if self.window < 2 || returns.len() < self.window {
            return None;
        }

        let tail = &returns[returns.len() - self.window..];
        // Sample standard deviation (n - 1)
        let std_dev = tail.std_dev();
        if !std_dev.is_finite() {
            return None;
        }

        Some(std_dev * self.trading_days.sqrt() * 100.0)
    }
}
