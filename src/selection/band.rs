//! Strategy strike bands
//!
//! Covered calls look at strikes from just above spot up to +15%; cash-secured
//! puts at strikes from -5% up to just below spot. Spot itself is never in a band.

use serde::{Deserialize, Serialize};

use crate::config::SelectionConfig;
use crate::core::OptionType;

/// Half-open strike interval around the reference price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StrikeBand {
    /// `(spot, upper]`
    AboveSpot { spot: f64, upper: f64 },
    /// `[lower, spot)`
    BelowSpot { lower: f64, spot: f64 },
}

impl StrikeBand {
    /// Band for the side of the chain a strategy sells
    pub fn for_side(option_type: OptionType, spot: f64, config: &SelectionConfig) -> Self {
        match option_type {
            OptionType::Call => StrikeBand::AboveSpot {
                spot,
                upper: spot * config.call_band_upper,
            },
            OptionType::Put => StrikeBand::BelowSpot {
                lower: spot * config.put_band_lower,
                spot,
            },
        }
    }

    pub fn contains(&self, strike: f64) -> bool {
        match *self {
            StrikeBand::AboveSpot { spot, upper } => strike > spot && strike <= upper,
            StrikeBand::BelowSpot { lower, spot } => strike >= lower && strike < spot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_band_edges() {
        let band = StrikeBand::for_side(OptionType::Call, 100.0, &SelectionConfig::default());

        assert!(!band.contains(100.0));
        assert!(band.contains(100.01));
        assert!(band.contains(100.0 * 1.15));
        assert!(!band.contains(115.5));
        assert!(!band.contains(95.0));
    }

    #[test]
    fn test_put_band_edges() {
        let band = StrikeBand::for_side(OptionType::Put, 100.0, &SelectionConfig::default());

        assert!(!band.contains(100.0));
        assert!(band.contains(99.5));
        assert!(band.contains(95.0));
        assert!(!band.contains(94.99));
        assert!(!band.contains(105.0));
    }
}
