//! Daily close-price history

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
}

/// Chronological close prices for a symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Underlying symbol
    pub symbol: String,
    /// Observations, oldest first
    pub bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bars: Vec::new(),
        }
    }

    /// Build from (date, close) pairs, sorting them chronologically
    pub fn from_closes(symbol: impl Into<String>, closes: impl IntoIterator<Item = (NaiveDate, f64)>) -> Self {
        let mut bars: Vec<PriceBar> = closes
            .into_iter()
            .map(|(date, close)| PriceBar { date, close })
            .collect();
        bars.sort_by_key(|b| b.date);

        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Most recent close
    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }

    /// Simple daily returns `close[t] / close[t-1] - 1`
    ///
    /// One shorter than the series. Pairs with a non-positive or non-finite
    /// previous close are skipped.
    pub fn daily_returns(&self) -> Vec<f64> {
        self.bars
            .windows(2)
            .filter_map(|w| {
                let prev = w[0].close;
                let curr = w[1].close;
                if prev > 0.0 && prev.is_finite() && curr.is_finite() {
                    Some(curr / prev - 1.0)
                } else {
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_returns() {
        let series = PriceSeries::from_closes("XYZ", vec![(day(1), 100.0), (day(2), 110.0), (day(3), 99.0)]);
        let r = series.daily_returns();

        assert_eq!(r.len(), 2);
        assert!((r[0] - 0.10).abs() < 1e-12);
        assert!((r[1] + 0.10).abs() < 1e-12);
        assert_eq!(series.last_close(), Some(99.0));
    }

    #[test]
    fn test_sorted_on_build() {
        let series = PriceSeries::from_closes("XYZ", vec![(day(3), 3.0), (day(1), 1.0), (day(2), 2.0)]);
        let closes: Vec<f64> = series.bars.iter().map(|b| b.close).collect();
        assert_eq!(closes, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_skips_zero_previous_close() {
        let series = PriceSeries::from_closes("XYZ", vec![(day(1), 0.0), (day(2), 10.0), (day(3), 11.0)]);
        assert_eq!(series.daily_returns().len(), 1);
    }

    #[test]
    fn test_empty() {
        let series = PriceSeries::new("XYZ");
        assert!(series.is_empty());
        assert!(series.daily_returns().is_empty());
        assert!(series.last_close().is_none());
    }
}
