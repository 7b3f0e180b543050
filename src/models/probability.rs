//! Probability of finishing in the money
//!
//! Two tiers: a Black-Scholes style `N(d1)` estimate when the inputs allow it,
//! and a fixed 30/70 heuristic when they don't. An expired option (zero or
//! negative days) is always 0.

use statrs::distribution::{ContinuousCDF, Normal};
use tracing::debug;

use crate::config::ModelConfig;
use crate::core::{OptionType, ScanError, ScanResult};

/// Heuristic probability for an out-of-the-money strike, percent
pub const OTM_FALLBACK_PROBABILITY: f64 = 30.0;
/// Heuristic probability for an in-the-money (or at-the-money) strike, percent
pub const ITM_FALLBACK_PROBABILITY: f64 = 70.0;

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> ScanResult<f64> {
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| ScanError::numerical(format!("standard normal: {:?}", e)))?;
    Ok(normal.cdf(x))
}

/// d1 with the risk-free drift and zero dividend yield
///
/// `vol` and `time` are in decimal and years. Fails on any input that makes
/// the expression undefined instead of returning NaN or infinity.
pub fn d1(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> ScanResult<f64> {
    if !(time > 0.0) {
        return Err(ScanError::numerical("Non-positive time to expiry"));
    }
    if !(vol > 0.0) || !vol.is_finite() {
        return Err(ScanError::numerical("Non-positive volatility"));
    }
    if !(spot > 0.0) || !(strike > 0.0) {
        return Err(ScanError::numerical("Non-positive spot or strike"));
    }

    let value = ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / (vol * time.sqrt());
    if !value.is_finite() {
        return Err(ScanError::numerical("d1 is not finite"));
    }
    Ok(value)
}

/// Fixed-value estimate: 30% out of the money, 70% otherwise
pub fn heuristic_probability(spot: f64, strike: f64, option_type: OptionType) -> f64 {
    if option_type.is_otm(spot, strike) {
        OTM_FALLBACK_PROBABILITY
    } else {
        ITM_FALLBACK_PROBABILITY
    }
}

/// ITM probability model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItmProbabilityModel {
    /// Risk-free rate in d1
    pub risk_free_rate: f64,
    /// Calendar days per year
    pub days_per_year: f64,
}

impl Default for ItmProbabilityModel {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.05,
            days_per_year: 365.0,
        }
    }
}

impl ItmProbabilityModel {
    pub fn from_config(config: &ModelConfig) -> Self {
        Self {
            risk_free_rate: config.risk_free_rate,
            days_per_year: config.days_per_year,
        }
    }

    /// Probability (0-100) that the option finishes in the money
    ///
    /// `volatility_pct` is annualized volatility in percent.
    pub fn probability(
        &self,
        spot: f64,
        strike: f64,
        volatility_pct: f64,
        days_to_expiry: i64,
        option_type: OptionType,
    ) -> f64 {
        if days_to_expiry <= 0 {
            return 0.0;
        }

        match self.exact(spot, strike, volatility_pct, days_to_expiry, option_type) {
            Ok(p) => p,
            Err(e) => {
                debug!(spot, strike, volatility_pct, days_to_expiry, "ITM probability fallback: {}", e);
                heuristic_probability(spot, strike, option_type)
            }
        }
    }

    /// Like [`probability`](Self::probability), taking the heuristic path
    /// when no volatility estimate exists
    pub fn probability_with(
        &self,
        spot: f64,
        strike: f64,
        volatility_pct: Option<f64>,
        days_to_expiry: i64,
        option_type: OptionType,
    ) -> f64 {
        self.probability(
            spot,
            strike,
            volatility_pct.unwrap_or(f64::NAN),
            days_to_expiry,
            option_type,
        )
    }

    /// The `N(d1)` tier alone, surfacing why it cannot be evaluated
    pub fn exact(
        &self,
        spot: f64,
        strike: f64,
        volatility_pct: f64,
        days_to_expiry: i64,
        option_type: OptionType,
    ) -> ScanResult<f64> {
        let time = days_to_expiry as f64 / self.days_per_year;
        let vol = volatility_pct / 100.0;
        let d1 = d1(spot, strike, self.risk_free_rate, vol, time)?;
        let cdf = norm_cdf(d1)?;

        let probability = match option_type {
            OptionType::Call => cdf,
            OptionType::Put => 1.0 - cdf,
        };
        Ok(probability * 100.0)
    }
}
