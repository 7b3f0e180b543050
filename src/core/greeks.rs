//! Approximate option greeks
//!
//! Screening-grade proxies, not model-derived sensitivities. Delta is a
//! straight line through 0.5 at the money that saturates at ±1; theta spreads
//! the premium evenly over the remaining days.

use serde::{Deserialize, Serialize};

use super::option::OptionType;

/// Delta and theta proxies for one option
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ApproxGreeks {
    /// Linear delta proxy, clamped to [-1, 1]
    pub delta: f64,
    /// Linear time decay per day (zero when expired)
    pub theta: f64,
}

impl ApproxGreeks {
    /// Compute both proxies for a quote
    ///
    /// `scale` is the fraction of spot over which delta moves by 0.5 (0.1 by default).
    pub fn approximate(
        spot: f64,
        strike: f64,
        last_price: f64,
        days_to_expiry: i64,
        option_type: OptionType,
        scale: f64,
    ) -> Self {
        Self {
            delta: approx_delta(spot, strike, option_type, scale),
            theta: approx_theta(last_price, days_to_expiry),
        }
    }
}

/// Linear delta proxy
///
/// Calls: `0.5 + 0.5 * (S - K) / (S * scale)`; puts: `-0.5 + 0.5 * (K - S) / (S * scale)`.
/// Clamped to [-1, 1].
pub fn approx_delta(spot: f64, strike: f64, option_type: OptionType, scale: f64) -> f64 {
    let width = spot * scale;
    let raw = match option_type {
        OptionType::Call => 0.5 + 0.5 * (spot - strike) / width,
        OptionType::Put => -0.5 + 0.5 * (strike - spot) / width,
    };
    raw.clamp(-1.0, 1.0)
}

/// Linear theta proxy: `-premium / (days + 1)`, or 0 once expired
pub fn approx_theta(last_price: f64, days_to_expiry: i64) -> f64 {
    if days_to_expiry > 0 {
        -last_price / (days_to_expiry as f64 + 1.0)
    } else {
        0.0
    }
}
