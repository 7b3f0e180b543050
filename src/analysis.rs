//! Per-symbol analysis pipeline
//!
//! fetch history → volatility → expirations → per-expiration chain → selection.
//! A missing symbol aborts the analysis; a missing option listing still
//! yields the stock section; a failing expiration is recorded and skipped.

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::ScannerConfig;
use crate::core::{days_to_expiry, ExpirationBatch, OptionChain, ScanError, ScanResult, Strategy};
use crate::data::MarketDataSource;
use crate::models::VolatilityEstimator;
use crate::selection::OptionSelector;

/// An expiration that could not be processed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedExpiration {
    pub expiration: NaiveDate,
    pub reason: String,
}

/// Option section of a report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OptionsStatus {
    /// Batches for the processed expirations, nearest first
    Available {
        batches: Vec<ExpirationBatch>,
        skipped: Vec<SkippedExpiration>,
    },
    /// No usable option listing for the symbol
    Unavailable { reason: String },
}

/// Everything the formatter needs for one symbol and strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub strategy: Strategy,
    /// Most recent close
    pub current_price: f64,
    /// Annualized 20-day volatility in percent, if enough history exists
    pub volatility: Option<f64>,
    pub options: OptionsStatus,
}

impl AnalysisReport {
    /// Batches, or an empty slice when options are unavailable
    pub fn batches(&self) -> &[ExpirationBatch] {
        match &self.options {
            OptionsStatus::Available { batches, .. } => batches.as_slice(),
            OptionsStatus::Unavailable { .. } => &[],
        }
    }
}

/// Runs the pipeline against a market data source
pub struct Analyzer<S> {
    source: S,
    config: ScannerConfig,
    estimator: VolatilityEstimator,
    selector: OptionSelector,
}

impl<S: MarketDataSource> Analyzer<S> {
    pub fn new(source: S, config: ScannerConfig) -> Self {
        let estimator = VolatilityEstimator::from_config(&config.model);
        let selector = OptionSelector::from_config(&config.selection, &config.model);

        Self {
            source,
            config,
            estimator,
            selector,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Analyze a symbol as of the local wall-clock time
    pub fn analyze(&self, symbol: &str, strategy: Strategy) -> ScanResult<AnalysisReport> {
        self.analyze_at(symbol, strategy, Local::now().naive_local())
    }

    /// Analyze a symbol as of `now`
    pub fn analyze_at(
        &self,
        symbol: &str,
        strategy: Strategy,
        now: NaiveDateTime,
    ) -> ScanResult<AnalysisReport> {
        let symbol = normalize_symbol(symbol)?;
        info!("Analyzing {} for {}", symbol, strategy);

        let history = self.source.price_history(&symbol).map_err(|e| match e {
            err @ ScanError::DataUnavailable(_) => err,
            other => ScanError::data_unavailable(other.to_string()),
        })?;
        let current_price = history
            .last_close()
            .ok_or_else(|| ScanError::data_unavailable("No data found for this symbol"))?;
        let volatility = self.estimator.estimate(&history);
        if volatility.is_none() {
            warn!("{}: not enough history for a volatility estimate", symbol);
        }

        let options = match self.collect_batches(&symbol, strategy, volatility, now) {
            Ok((batches, skipped)) => OptionsStatus::Available { batches, skipped },
            Err(e) => {
                warn!("{}: {}", symbol, e);
                OptionsStatus::Unavailable {
                    reason: options_reason(e),
                }
            }
        };

        Ok(AnalysisReport {
            symbol,
            strategy,
            current_price,
            volatility,
            options,
        })
    }

    fn collect_batches(
        &self,
        symbol: &str,
        strategy: Strategy,
        volatility: Option<f64>,
        now: NaiveDateTime,
    ) -> ScanResult<(Vec<ExpirationBatch>, Vec<SkippedExpiration>)> {
        let expirations = self.source.expirations(symbol)?;
        if expirations.is_empty() {
            return Err(ScanError::options_unavailable("No options data available"));
        }

        // Fetched once; per-expiration fallbacks apply when unknown
        let quoted_price = match self.source.current_price(symbol) {
            Ok(price) => price.filter(|p| *p > 0.0 && p.is_finite()),
            Err(e) => {
                warn!("{}: current price unavailable: {}", symbol, e);
                None
            }
        };

        let mut batches = Vec::new();
        let mut skipped = Vec::new();

        for &expiration in expirations.iter().take(self.config.data.expirations) {
            match self.build_batch(symbol, expiration, strategy, volatility, quoted_price, now) {
                Ok(batch) => batches.push(batch),
                Err(e) => {
                    warn!("Error getting options for {}: {}", expiration, e);
                    skipped.push(SkippedExpiration {
                        expiration,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok((batches, skipped))
    }

    fn build_batch(
        &self,
        symbol: &str,
        expiration: NaiveDate,
        strategy: Strategy,
        volatility: Option<f64>,
        quoted_price: Option<f64>,
        now: NaiveDateTime,
    ) -> ScanResult<ExpirationBatch> {
        let chain = self.source.option_chain(symbol, expiration)?;
        let reference_price = self.reference_price(quoted_price, &chain);
        let days = days_to_expiry(expiration, now);

        let options = self.selector.select(
            chain.side(strategy.option_type()),
            reference_price,
            strategy,
            volatility,
            days,
        );

        Ok(ExpirationBatch {
            expiration,
            days_to_expiry: days,
            reference_price,
            options,
        })
    }

    /// Quoted price, else the first call strike, else the configured default
    fn reference_price(&self, quoted_price: Option<f64>, chain: &OptionChain) -> f64 {
        quoted_price
            .or_else(|| chain.first_call_strike())
            .unwrap_or(self.config.data.default_price)
    }
}

fn normalize_symbol(symbol: &str) -> ScanResult<String> {
    let symbol = symbol.trim().to_ascii_uppercase();
    if symbol.is_empty() {
        return Err(ScanError::invalid_input("Please enter a valid stock symbol"));
    }
    Ok(symbol)
}

fn options_reason(err: ScanError) -> String {
    match err {
        ScanError::OptionsUnavailable(msg) => msg,
        other => format!("Error getting options: {}", other),
    }
}
