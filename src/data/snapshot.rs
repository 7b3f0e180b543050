//! In-memory market data
//!
//! Serves a saved snapshot of one or more symbols. Used for offline runs
//! (`wheel-scan offline`) and for driving the pipeline in tests.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{OptionChain, PriceSeries, ScanError, ScanResult};

use super::source::MarketDataSource;

/// Everything the pipeline needs for one symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolSnapshot {
    pub history: PriceSeries,
    #[serde(default)]
    pub current_price: Option<f64>,
    /// Chains in expiration order
    #[serde(default)]
    pub chains: Vec<OptionChain>,
    /// Expirations whose chain fetch should fail
    #[serde(default)]
    pub broken_expirations: Vec<NaiveDate>,
}

impl SymbolSnapshot {
    pub fn new(history: PriceSeries) -> Self {
        Self {
            history,
            current_price: None,
            chains: Vec::new(),
            broken_expirations: Vec::new(),
        }
    }

    pub fn with_current_price(mut self, price: f64) -> Self {
        self.current_price = Some(price);
        self
    }

    pub fn with_chain(mut self, chain: OptionChain) -> Self {
        self.chains.push(chain);
        self.chains.sort_by_key(|c| c.expiry);
        self
    }

    /// List an expiration whose chain cannot be retrieved
    pub fn with_broken_expiration(mut self, expiry: NaiveDate) -> Self {
        self.broken_expirations.push(expiry);
        self
    }
}

/// Market data source backed by owned snapshots
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticSource {
    symbols: HashMap<String, SymbolSnapshot>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: impl Into<String>, snapshot: SymbolSnapshot) {
        self.symbols.insert(symbol.into().to_ascii_uppercase(), snapshot);
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>, snapshot: SymbolSnapshot) -> Self {
        self.insert(symbol, snapshot);
        self
    }

    /// Load a JSON snapshot file
    pub fn load(path: impl AsRef<Path>) -> ScanResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let source: StaticSource =
            serde_json::from_str(&json).map_err(|e| ScanError::Serialization(e.to_string()))?;

        info!("Loaded snapshot with {} symbols from {}", source.symbols.len(), path.display());
        Ok(source)
    }

    /// Write the snapshot as JSON
    pub fn save(&self, path: impl AsRef<Path>) -> ScanResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ScanError::Serialization(e.to_string()))?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Symbols held, sorted
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.symbols.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    fn get(&self, symbol: &str) -> ScanResult<&SymbolSnapshot> {
        self.symbols
            .get(&symbol.to_ascii_uppercase())
            .ok_or_else(|| ScanError::data_unavailable("No data found for this symbol"))
    }
}

impl MarketDataSource for StaticSource {
    fn price_history(&self, symbol: &str) -> ScanResult<PriceSeries> {
        let snapshot = self.get(symbol)?;
        if snapshot.history.is_empty() {
            return Err(ScanError::data_unavailable("No data found for this symbol"));
        }
        Ok(snapshot.history.clone())
    }

    fn expirations(&self, symbol: &str) -> ScanResult<Vec<NaiveDate>> {
        let snapshot = self.get(symbol)?;
        let mut expiries: Vec<NaiveDate> = snapshot
            .chains
            .iter()
            .map(|c| c.expiry)
            .chain(snapshot.broken_expirations.iter().copied())
            .collect();
        expiries.sort();
        expiries.dedup();
        Ok(expiries)
    }

    fn option_chain(&self, symbol: &str, expiry: NaiveDate) -> ScanResult<OptionChain> {
        let snapshot = self.get(symbol)?;
        if snapshot.broken_expirations.contains(&expiry) {
            return Err(ScanError::data(format!("chain for {} could not be retrieved", expiry)));
        }
        snapshot
            .chains
            .iter()
            .find(|c| c.expiry == expiry)
            .cloned()
            .ok_or_else(|| ScanError::data(format!("no chain for {}", expiry)))
    }

    fn current_price(&self, symbol: &str) -> ScanResult<Option<f64>> {
        Ok(self.get(symbol)?.current_price)
    }
}
