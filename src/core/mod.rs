//! Core data types for the wheel scanner
//!
//! Defines fundamental types:
//! - OptionType / Strategy: which side of the chain is sold
//! - OptionQuote / AnnotatedOption: chain rows before and after selection
//! - OptionChain / ExpirationBatch: per-expiration containers
//! - PriceSeries: daily close history
//! - ApproxGreeks: linear delta and theta proxies

pub mod option;
pub mod quote;
pub mod series;
pub mod greeks;
pub mod error;

pub use option::*;
pub use quote::*;
pub use series::*;
pub use greeks::*;
pub use error::*;
