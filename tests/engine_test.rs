//! Engine property tests

use approx::assert_relative_eq;
use histovar::engine::{compute_historical_var, percentile};
use proptest::prelude::*;

#[test]
fn test_pnl_identity_holds_for_fixture_series() {
    let prices = [250.0, 248.5, 252.0, 249.0, 251.5, 247.0];
    let nominal = -400.0; // short position
    let res = compute_historical_var(&prices, nominal, 0.95, None).unwrap();

    assert_eq!(res.shocks.len(), prices.len() - 1);
    for i in 0..res.shocks.len() {
        assert_relative_eq!(res.shocks[i], prices[i + 1] / prices[i]);
        assert_relative_eq!(
            res.pnl[i],
            nominal * (res.simulated_prices[i] - res.base_price),
            max_relative = 1e-12
        );
    }
}

#[test]
fn test_var_against_hand_computed_scenario() {
    let res = compute_historical_var(&[100.0, 102.0, 101.0, 105.0, 99.0], 1000.0, 0.95, None)
        .unwrap();
    assert_relative_eq!(res.var, 4954.159_663_865_546, max_relative = 1e-9);
}

#[test]
fn test_confidence_boundaries_degenerate_to_extremes() {
    let prices = [100.0, 102.0, 101.0, 105.0, 99.0];
    let res_min = compute_historical_var(&prices, 1000.0, 1.0, None).unwrap();
    let res_max = compute_historical_var(&prices, 1000.0, 0.0, None).unwrap();

    let worst = res_min.pnl.iter().cloned().fold(f64::INFINITY, f64::min);
    let best = res_max.pnl.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert_relative_eq!(res_min.percentile_value, worst);
    assert_relative_eq!(res_max.percentile_value, best);
}

proptest! {
    /// Moving the tail further out never shrinks VaR.
    #[test]
    fn prop_var_monotone_in_confidence(
        prices in prop::collection::vec(1.0f64..1000.0, 2..60),
        nominal in -10_000.0f64..10_000.0,
    ) {
        let var_95 = compute_historical_var(&prices, nominal, 0.95, None).unwrap().var;
        let var_99 = compute_historical_var(&prices, nominal, 0.99, None).unwrap().var;
        prop_assert!(var_99 >= var_95 - 1e-9);
    }

    /// Shock count and values are exact for any valid series.
    #[test]
    fn prop_shocks_match_price_ratios(
        prices in prop::collection::vec(1.0f64..1000.0, 2..60),
    ) {
        let res = compute_historical_var(&prices, 1.0, 0.95, None).unwrap();
        prop_assert_eq!(res.shocks.len(), prices.len() - 1);
        for i in 0..res.shocks.len() {
            prop_assert_eq!(res.shocks[i], prices[i + 1] / prices[i]);
        }
    }

    /// The engine is a pure function: identical inputs, identical outputs.
    #[test]
    fn prop_idempotent(
        prices in prop::collection::vec(1.0f64..1000.0, 2..30),
        nominal in -5_000.0f64..5_000.0,
        confidence in 0.01f64..0.99,
    ) {
        let a = compute_historical_var(&prices, nominal, confidence, None).unwrap();
        let b = compute_historical_var(&prices, nominal, confidence, None).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Percentile stays within the sample's range.
    #[test]
    fn prop_percentile_bounded(
        values in prop::collection::vec(-1000.0f64..1000.0, 1..60),
        q in 0.0f64..100.0,
    ) {
        let p = percentile(&values, q);
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(p >= min && p <= max);
    }
}
