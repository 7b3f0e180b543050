//! Screening models
//!
//! Implements:
//! - Historical volatility (trailing-window close-to-close)
//! - ITM probability (N(d1) with a fixed heuristic fallback)

pub mod volatility;
pub mod probability;

pub use volatility::*;
pub use probability::*;
