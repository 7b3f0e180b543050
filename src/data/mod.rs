//! Market data
//!
//! Handles:
//! - The `MarketDataSource` trait the pipeline consumes
//! - Yahoo Finance history, quotes and option chains
//! - In-memory snapshots for offline runs and tests

pub mod source;
pub mod yahoo;
pub mod snapshot;

pub use source::*;
pub use yahoo::*;
pub use snapshot::*;
