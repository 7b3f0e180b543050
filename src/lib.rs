//! # Wheel Scanner - covered call and cash-secured put screener
//!
//! Fetches a year of daily closes and the nearest option chains for a symbol,
//! estimates 20-day historical volatility, and annotates strategy-appropriate
//! strikes with approximate greeks and a probability of finishing in the money.
//!
//! ## Key Components
//!
//! - **Data Fetching**: Yahoo Finance history, quotes and option chains
//! - **Volatility**: annualized trailing 20-day close-to-close volatility
//! - **ITM Probability**: `N(d1)` with a fixed 30/70 fallback
//! - **Selection**: strike band per strategy, capped at 10 rows per expiration
//! - **Reporting**: console tables or JSON
//!
//! ## Usage
//!
//! ```rust,no_run
//! use wheel_scanner::prelude::*;
//!
//! let client = YahooClient::new().unwrap();
//! let analyzer = Analyzer::new(client, ScannerConfig::default());
//!
//! let report = analyzer.analyze("AAPL", Strategy::CoveredCalls).unwrap();
//! println!("{}", ReportFormatter::new().render(&report));
//! ```
//!
//! ## What This Does NOT Do
//!
//! - Price options or compute model greeks
//! - Stream real-time data
//! - Retry failed requests

pub mod analysis;
pub mod config;
pub mod core;
pub mod data;
pub mod models;
pub mod report;
pub mod selection;
pub mod session;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        days_to_expiry, AnnotatedOption, ApproxGreeks, ExpirationBatch, OptionChain, OptionQuote,
        OptionType, PriceBar, PriceSeries, ScanError, ScanResult, Strategy,
    };

    // Data fetching
    pub use crate::data::{MarketDataSource, StaticSource, SymbolSnapshot, YahooClient};

    // Models
    pub use crate::models::{
        heuristic_probability, norm_cdf, ItmProbabilityModel, VolatilityEstimator,
        ITM_FALLBACK_PROBABILITY, OTM_FALLBACK_PROBABILITY,
    };

    // Selection and pipeline
    pub use crate::analysis::{AnalysisReport, Analyzer, OptionsStatus, SkippedExpiration};
    pub use crate::config::{DataConfig, ModelConfig, ScannerConfig, SelectionConfig};
    pub use crate::report::ReportFormatter;
    pub use crate::selection::{OptionSelector, StrikeBand};
    pub use crate::session::run_interactive;
}

// Re-export main types at crate root
pub use crate::core::{ScanError, ScanResult};
pub use crate::analysis::{AnalysisReport, Analyzer};
