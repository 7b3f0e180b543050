//! Market data source abstraction
//!
//! The analysis pipeline only talks to this trait, so the live Yahoo client
//! and the in-memory snapshot source are interchangeable.

use chrono::NaiveDate;

use crate::core::{OptionChain, PriceSeries, ScanResult};

/// Provider of price history and option chains for a symbol
///
/// Every call is a single blocking attempt. Implementations report a missing
/// symbol or empty history as [`ScanError::DataUnavailable`](crate::core::ScanError).
pub trait MarketDataSource {
    /// Daily closes for roughly the last year, oldest first
    fn price_history(&self, symbol: &str) -> ScanResult<PriceSeries>;

    /// Listed expiration dates, nearest first (may be empty)
    fn expirations(&self, symbol: &str) -> ScanResult<Vec<NaiveDate>>;

    /// Calls and puts for one expiration
    fn option_chain(&self, symbol: &str, expiry: NaiveDate) -> ScanResult<OptionChain>;

    /// Current underlying price, `None` when the provider does not know it
    fn current_price(&self, symbol: &str) -> ScanResult<Option<f64>>;
}

impl<T: MarketDataSource + ?Sized> MarketDataSource for &T {
    fn price_history(&self, symbol: &str) -> ScanResult<PriceSeries> {
        (**self).price_history(symbol)
    }

    fn expirations(&self, symbol: &str) -> ScanResult<Vec<NaiveDate>> {
        (**self).expirations(symbol)
    }

    fn option_chain(&self, symbol: &str, expiry: NaiveDate) -> ScanResult<OptionChain> {
        (**self).option_chain(symbol, expiry)
    }

    fn current_price(&self, symbol: &str) -> ScanResult<Option<f64>> {
        (**self).current_price(symbol)
    }
}

impl<T: MarketDataSource + ?Sized> MarketDataSource for Box<T> {
    fn price_history(&self, symbol: &str) -> ScanResult<PriceSeries> {
        (**self).price_history(symbol)
    }

    fn expirations(&self, symbol: &str) -> ScanResult<Vec<NaiveDate>> {
        (**self).expirations(symbol)
    }

    fn option_chain(&self, symbol: &str, expiry: NaiveDate) -> ScanResult<OptionChain> {
        (**self).option_chain(symbol, expiry)
    }

    fn current_price(&self, symbol: &str) -> ScanResult<Option<f64>> {
        (**self).current_price(symbol)
    }
}
