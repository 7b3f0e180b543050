//! Report rendering
//!
//! Turns an [`AnalysisReport`] into console text or JSON. No computation
//! happens here.

use std::fmt::Write;

use crate::analysis::{AnalysisReport, OptionsStatus};
use crate::core::{ExpirationBatch, ScanError, ScanResult};

const WIDE_RULE: usize = 80;
const TABLE_RULE: usize = 70;
const BATCH_RULE: usize = 50;

/// Plain-text report formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportFormatter;

impl ReportFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Render the full report
    pub fn render(&self, report: &AnalysisReport) -> String {
        let mut out = String::new();
        let title = report.strategy.title();

        let _ = writeln!(out, "{}", "=".repeat(WIDE_RULE));
        let _ = writeln!(out, "ANALYSIS FOR {} - {}", report.symbol, title);
        let _ = writeln!(out, "{}", "=".repeat(WIDE_RULE));
        let _ = writeln!(out);
        let _ = writeln!(out, "Current Price: ${:.2}", report.current_price);
        match report.volatility {
            Some(vol) => {
                let _ = writeln!(out, "Volatility (20-day): {:.1}%", vol);
            }
            None => {
                let _ = writeln!(out, "Volatility (20-day): n/a (insufficient history)");
            }
        }

        match &report.options {
            OptionsStatus::Available { batches, skipped } => {
                let _ = writeln!(out);
                let _ = writeln!(out, "{} OPPORTUNITIES:", title);
                let _ = writeln!(out, "{}", "-".repeat(TABLE_RULE));

                for (i, batch) in batches.iter().enumerate() {
                    self.render_batch(&mut out, i + 1, batch);
                }

                for skip in skipped {
                    let _ = writeln!(out);
                    let _ = writeln!(out, "Skipped {}: {}", skip.expiration, skip.reason);
                }
            }
            OptionsStatus::Unavailable { reason } => {
                let _ = writeln!(out);
                let _ = writeln!(out, "No options data available ({})", reason);
            }
        }

        out
    }

    fn render_batch(&self, out: &mut String, index: usize, batch: &ExpirationBatch) {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Expiration {}: {} ({} days)",
            index, batch.expiration, batch.days_to_expiry
        );
        let _ = writeln!(out, "{}", "-".repeat(BATCH_RULE));

        if batch.options.is_empty() {
            let _ = writeln!(out, "No suitable options found");
            return;
        }

        let _ = writeln!(
            out,
            "{:<8} {:<8} {:<8} {:<8} {:<8} {:<8} {:<8}",
            "Strike", "Premium", "Volume", "OI", "Delta", "Theta", "Prob%"
        );
        let _ = writeln!(out, "{}", "-".repeat(TABLE_RULE));

        for option in &batch.options {
            let strike = format!("${:.2}", option.quote.strike);
            let premium = format!("${:.2}", option.quote.last_price);
            let _ = writeln!(
                out,
                "{:<8} {:<8} {:<8} {:<8} {:<8.3} {:<8.3} {:<8.1}",
                strike,
                premium,
                option.quote.volume_or_zero(),
                option.quote.open_interest_or_zero(),
                option.delta,
                option.theta,
                option.itm_probability
            );
        }
    }

    /// Render the report as pretty JSON
    pub fn render_json(&self, report: &AnalysisReport) -> ScanResult<String> {
        serde_json::to_string_pretty(report).map_err(|e| ScanError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SkippedExpiration;
    use crate::core::{AnnotatedOption, OptionQuote, OptionType, Strategy};
    use chrono::NaiveDate;

    fn report(options: OptionsStatus) -> AnalysisReport {
        AnalysisReport {
            symbol: "AAPL".to_string(),
            strategy: Strategy::CoveredCalls,
            current_price: 245.5,
            volatility: Some(23.456),
            options,
        }
    }

    fn batch(options: Vec<AnnotatedOption>) -> ExpirationBatch {
        ExpirationBatch {
            expiration: NaiveDate::from_ymd_opt(2025, 1, 17).unwrap(),
            days_to_expiry: 12,
            reference_price: 245.5,
            options,
        }
    }

    #[test]
    fn test_render_table() {
        let row = AnnotatedOption {
            quote: OptionQuote::new(250.0, 1.25, OptionType::Call).with_activity(1200, 5400),
            delta: 0.408,
            theta: -0.096,
            itm_probability: 31.24,
        };
        let text = ReportFormatter::new().render(&report(OptionsStatus::Available {
            batches: vec![batch(vec![row])],
            skipped: vec![SkippedExpiration {
                expiration: NaiveDate::from_ymd_opt(2025, 1, 24).unwrap(),
                reason: "Network error: timeout".into(),
            }],
        }));

        assert!(text.contains("ANALYSIS FOR AAPL - COVERED CALLS"));
        assert!(text.contains("Current Price: $245.50"));
        assert!(text.contains("Volatility (20-day): 23.5%"));
        assert!(text.contains("Expiration 1: 2025-01-17 (12 days)"));
        assert!(text.contains("$250.00"));
        assert!(text.contains("0.408"));
        assert!(text.contains("-0.096"));
        assert!(text.contains("31.2"));
        assert!(text.contains("Skipped 2025-01-24: Network error: timeout"));
    }

    #[test]
    fn test_render_empty_batch() {
        let text = ReportFormatter::new().render(&report(OptionsStatus::Available {
            batches: vec![batch(vec![])],
            skipped: vec![],
        }));
        assert!(text.contains("No suitable options found"));
    }

    #[test]
    fn test_render_unavailable() {
        let mut r = report(OptionsStatus::Unavailable {
            reason: "No options data available".into(),
        });
        r.volatility = None;

        let text = ReportFormatter::new().render(&r);
        assert!(text.contains("No options data available"));
        assert!(text.contains("n/a"));
    }

    #[test]
    fn test_render_json() {
        let json = ReportFormatter::new()
            .render_json(&report(OptionsStatus::Unavailable { reason: "none".into() }))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["symbol"], "AAPL");
        assert_eq!(value["strategy"], "covered_calls");
        assert_eq!(value["options"]["status"], "unavailable");
    }
}
