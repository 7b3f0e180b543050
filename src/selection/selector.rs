//! Option selection and annotation
//!
//! Filters one side of a chain to the strategy's strike band, keeps the first
//! `max_options` matches in source order and attaches delta, theta and ITM
//! probability to each.

use crate::config::{ModelConfig, SelectionConfig};
use crate::core::{AnnotatedOption, ApproxGreeks, OptionQuote, OptionType, Strategy};
use crate::models::ItmProbabilityModel;

use super::band::StrikeBand;

/// Strategy-aware option selector
#[derive(Debug, Clone)]
pub struct OptionSelector {
    config: SelectionConfig,
    model: ItmProbabilityModel,
}

impl Default for OptionSelector {
    fn default() -> Self {
        Self::new(SelectionConfig::default(), ItmProbabilityModel::default())
    }
}

impl OptionSelector {
    pub fn new(config: SelectionConfig, model: ItmProbabilityModel) -> Self {
        Self { config, model }
    }

    pub fn from_config(selection: &SelectionConfig, model: &ModelConfig) -> Self {
        Self::new(selection.clone(), ItmProbabilityModel::from_config(model))
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Select and annotate options for one expiration
    ///
    /// Only rows of the strategy's option type are considered. The result
    /// keeps the chain's relative order and holds at most `max_options` rows.
    pub fn select(
        &self,
        chain: &[OptionQuote],
        spot: f64,
        strategy: Strategy,
        volatility_pct: Option<f64>,
        days_to_expiry: i64,
    ) -> Vec<AnnotatedOption> {
        let option_type = strategy.option_type();
        let band = StrikeBand::for_side(option_type, spot, &self.config);

        chain
            .iter()
            .filter(|q| q.option_type == option_type && band.contains(q.strike))
            .take(self.config.max_options)
            .map(|q| self.annotate(q, spot, volatility_pct, days_to_expiry))
            .collect()
    }

    /// Attach greeks and ITM probability to a single quote
    pub fn annotate(
        &self,
        quote: &OptionQuote,
        spot: f64,
        volatility_pct: Option<f64>,
        days_to_expiry: i64,
    ) -> AnnotatedOption {
        let option_type: OptionType = quote.option_type;
        let greeks = ApproxGreeks::approximate(
            spot,
            quote.strike,
            quote.last_price,
            days_to_expiry,
            option_type,
            self.config.delta_scale,
        );
        let itm_probability =
            self.model
                .probability_with(spot, quote.strike, volatility_pct, days_to_expiry, option_type);

        AnnotatedOption {
            quote: quote.clone(),
            delta: greeks.delta,
            theta: greeks.theta,
            itm_probability,
        }
    }
}
