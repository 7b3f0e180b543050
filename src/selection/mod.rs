//! Option selection
//!
//! - StrikeBand: strategy-specific strike interval around the reference price
//! - OptionSelector: band filter, result cap and per-row annotation

pub mod band;
pub mod selector;

pub use band::*;
pub use selector::*;
