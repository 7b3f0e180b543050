//! Option quote data
//!
//! Raw chain rows as delivered by the data source, and the annotated rows
//! produced by the selector.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::option::OptionType;

/// A single option-chain row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    /// Contract symbol (exchange-specific), if the source provides one
    #[serde(default)]
    pub contract_symbol: Option<String>,
    /// Strike price
    pub strike: f64,
    /// Last traded price (premium)
    #[serde(default)]
    pub last_price: f64,
    /// Trading volume
    #[serde(default)]
    pub volume: Option<u64>,
    /// Open interest
    #[serde(default)]
    pub open_interest: Option<u64>,
    /// Call or put
    pub option_type: OptionType,
}

impl OptionQuote {
    pub fn new(strike: f64, last_price: f64, option_type: OptionType) -> Self {
        Self {
            contract_symbol: None,
            strike,
            last_price,
            volume: None,
            open_interest: None,
            option_type,
        }
    }

    pub fn with_activity(mut self, volume: u64, open_interest: u64) -> Self {
        self.volume = Some(volume);
        self.open_interest = Some(open_interest);
        self
    }

    /// Volume, treating a missing value as zero
    pub fn volume_or_zero(&self) -> u64 {
        self.volume.unwrap_or(0)
    }

    /// Open interest, treating a missing value as zero
    pub fn open_interest_or_zero(&self) -> u64 {
        self.open_interest.unwrap_or(0)
    }
}

/// A selected quote with its approximate greeks and ITM probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedOption {
    #[serde(flatten)]
    pub quote: OptionQuote,
    /// Linear delta proxy, within [-1, 1]
    pub delta: f64,
    /// Linear time decay, zero or negative
    pub theta: f64,
    /// Probability of finishing in the money, in percent
    pub itm_probability: f64,
}

/// Calls and puts for a single expiration, in source order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionChain {
    /// Underlying symbol
    pub underlying: String,
    /// Expiration date
    pub expiry: NaiveDate,
    /// Underlying price reported alongside the chain, if any
    #[serde(default)]
    pub spot: Option<f64>,
    /// Call rows
    #[serde(default)]
    pub calls: Vec<OptionQuote>,
    /// Put rows
    #[serde(default)]
    pub puts: Vec<OptionQuote>,
}

impl OptionChain {
    pub fn new(underlying: impl Into<String>, expiry: NaiveDate) -> Self {
        Self {
            underlying: underlying.into(),
            expiry,
            spot: None,
            calls: Vec::new(),
            puts: Vec::new(),
        }
    }

    /// Append a row to the matching side. Order of insertion is kept.
    pub fn push(&mut self, quote: OptionQuote) {
        match quote.option_type {
            OptionType::Call => self.calls.push(quote),
            OptionType::Put => self.puts.push(quote),
        }
    }

    /// Rows for one side of the chain
    pub fn side(&self, option_type: OptionType) -> &[OptionQuote] {
        match option_type {
            OptionType::Call => &self.calls,
            OptionType::Put => &self.puts,
        }
    }

    /// Strike of the first call row, used as a last-resort price reference
    pub fn first_call_strike(&self) -> Option<f64> {
        self.calls.first().map(|q| q.strike)
    }
}

/// Selected options for one expiration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpirationBatch {
    /// Expiration date
    pub expiration: NaiveDate,
    /// Whole calendar days until expiration (may be zero or negative)
    pub days_to_expiry: i64,
    /// Underlying price the strike band was built around
    pub reference_price: f64,
    /// At most `max_options` rows, in chain order
    pub options: Vec<AnnotatedOption>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_keeps_source_order() {
        let expiry = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        let mut chain = OptionChain::new("AAPL", expiry);

        chain.push(OptionQuote::new(110.0, 1.0, OptionType::Call));
        chain.push(OptionQuote::new(105.0, 2.0, OptionType::Call));
        chain.push(OptionQuote::new(95.0, 1.5, OptionType::Put));

        let strikes: Vec<f64> = chain.calls.iter().map(|q| q.strike).collect();
        assert_eq!(strikes, vec![110.0, 105.0]);
        assert_eq!(chain.side(OptionType::Put).len(), 1);
        assert_eq!(chain.first_call_strike(), Some(110.0));
    }

    #[test]
    fn test_missing_activity_defaults_to_zero() {
        let quote = OptionQuote::new(100.0, 2.5, OptionType::Put);
        assert_eq!(quote.volume_or_zero(), 0);
        assert_eq!(quote.open_interest_or_zero(), 0);

        let quote = quote.with_activity(12, 340);
        assert_eq!(quote.volume_or_zero(), 12);
        assert_eq!(quote.open_interest_or_zero(), 340);
    }

    #[test]
    fn test_quote_deserialize_defaults() {
        let quote: OptionQuote =
            serde_json::from_str(r#"{"strike": 105.0, "option_type": "Call"}"#).unwrap();
        assert_eq!(quote.last_price, 0.0);
        assert!(quote.volume.is_none());
    }
}
