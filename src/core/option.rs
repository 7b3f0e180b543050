//! Option kinds and income strategies
//!
//! A strategy decides which side of the chain is scanned: covered calls sell
//! calls above the market, cash-secured puts sell puts just below it.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::error::ScanError;

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Is an option with this strike out of the money at `spot`?
    ///
    /// A strike equal to spot counts as in the money for both kinds, which is
    /// what the heuristic probability expects.
    pub fn is_otm(&self, spot: f64, strike: f64) -> bool {
        match self {
            OptionType::Call => strike > spot,
            OptionType::Put => strike < spot,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

/// Premium-selling strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Sell calls against owned shares (strikes above the current price)
    CoveredCalls,
    /// Sell puts backed by cash (strikes just below the current price)
    CashSecuredPuts,
}

impl Strategy {
    /// Which side of the chain this strategy sells
    pub fn option_type(&self) -> OptionType {
        match self {
            Strategy::CoveredCalls => OptionType::Call,
            Strategy::CashSecuredPuts => OptionType::Put,
        }
    }

    /// Display name used in report headers
    pub fn title(&self) -> &'static str {
        match self {
            Strategy::CoveredCalls => "COVERED CALLS",
            Strategy::CashSecuredPuts => "CASH SECURED PUTS",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Strategy::CoveredCalls => "Covered Calls",
            Strategy::CashSecuredPuts => "Cash Secured Puts",
        }
    }
}

impl FromStr for Strategy {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "calls" | "call" | "covered-calls" | "covered_calls" => Ok(Strategy::CoveredCalls),
            "2" | "puts" | "put" | "cash-secured-puts" | "cash_secured_puts" | "csp" => {
                Ok(Strategy::CashSecuredPuts)
            }
            other => Err(ScanError::invalid_input(format!(
                "unknown strategy '{}', expected calls (1) or puts (2)",
                other
            ))),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whole calendar days from `now` until midnight of the expiration date.
///
/// Rounds toward negative infinity, so an expiry later today or tomorrow
/// morning yields 0 and a passed expiry is negative.
pub fn days_to_expiry(expiry: NaiveDate, now: NaiveDateTime) -> i64 {
    let expiry_start = expiry.and_time(NaiveTime::MIN);
    (expiry_start - now).num_seconds().div_euclid(86_400)
}
