//! Property-based tests for the screening invariants.

use proptest::prelude::*;

use wheel_scanner::core::{approx_delta, approx_theta, OptionQuote, OptionType, Strategy as ScanStrategy};
use wheel_scanner::models::{heuristic_probability, ItmProbabilityModel};
use wheel_scanner::selection::OptionSelector;

fn option_type() -> impl Strategy<Value = OptionType> {
    prop_oneof![Just(OptionType::Call), Just(OptionType::Put)]
}

fn scan_strategy() -> impl Strategy<Value = ScanStrategy> {
    prop_oneof![
        Just(ScanStrategy::CoveredCalls),
        Just(ScanStrategy::CashSecuredPuts),
    ]
}

proptest! {
    #[test]
    fn delta_always_clamped(
        spot in 0.01..100_000.0f64,
        strike in 0.01..100_000.0f64,
        kind in option_type(),
    ) {
        let delta = approx_delta(spot, strike, kind, 0.1);
        prop_assert!((-1.0..=1.0).contains(&delta));
    }

    #[test]
    fn theta_never_positive(premium in 0.0..500.0f64, days in -30i64..400) {
        let theta = approx_theta(premium, days);
        prop_assert!(theta <= 0.0);
        if days <= 0 {
            prop_assert_eq!(theta, 0.0);
        }
    }

    #[test]
    fn probability_in_range(
        spot in 1.0..5_000.0f64,
        strike in 1.0..5_000.0f64,
        vol in 0.0..300.0f64,
        days in -10i64..730,
        kind in option_type(),
    ) {
        let model = ItmProbabilityModel::default();
        let p = model.probability(spot, strike, vol, days, kind);
        prop_assert!((0.0..=100.0).contains(&p));
        if days <= 0 {
            prop_assert_eq!(p, 0.0);
        }
    }

    #[test]
    fn zero_vol_is_heuristic(
        spot in 1.0..5_000.0f64,
        strike in 1.0..5_000.0f64,
        days in 1i64..730,
        kind in option_type(),
    ) {
        let model = ItmProbabilityModel::default();
        let p = model.probability(spot, strike, 0.0, days, kind);
        prop_assert!(p == 30.0 || p == 70.0);
        prop_assert_eq!(p, heuristic_probability(spot, strike, kind));
    }

    #[test]
    fn selection_respects_band_cap_and_order(
        spot in 10.0..1_000.0f64,
        offsets in prop::collection::vec(-0.3..0.3f64, 0..60),
        strat in scan_strategy(),
        days in 0i64..90,
    ) {
        let kind = strat.option_type();
        let chain: Vec<OptionQuote> = offsets
            .iter()
            .map(|o| OptionQuote::new(spot * (1.0 + o), 1.0, kind))
            .collect();

        let selector = OptionSelector::default();
        let picked = selector.select(&chain, spot, strat, Some(25.0), days);
        prop_assert!(picked.len() <= 10);

        for o in &picked {
            prop_assert!(o.quote.strike != spot);
            match kind {
                OptionType::Call => prop_assert!(o.quote.strike > spot && o.quote.strike <= spot * 1.15),
                OptionType::Put => prop_assert!(o.quote.strike >= spot * 0.95 && o.quote.strike < spot),
            }
        }

        // Selected rows appear in the chain in the same relative order
        let mut cursor = 0;
        for o in &picked {
            let pos = chain[cursor..].iter().position(|q| q == &o.quote);
            prop_assert!(pos.is_some());
            cursor += pos.unwrap() + 1;
        }
    }
}
