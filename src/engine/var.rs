//! Historical-simulation VaR for a single position

use super::percentile::percentile;
use serde::Serialize;
use thiserror::Error;

/// Engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    /// Fewer than two usable prices in the series
    #[error("at least 2 historical prices are required, got {count}")]
    InsufficientData { count: usize },
}

/// Full output of one historical-simulation VaR run.
///
/// All per-shock vectors share the same length, `prices.len() - 1`,
/// and the same ordering as the input series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarResult {
    /// Reference price the shocks are projected onto
    pub base_price: f64,
    /// One-lag return ratios, `prices[i+1] / prices[i]`
    pub shocks: Vec<f64>,
    /// `base_price * shocks[i]`
    pub simulated_prices: Vec<f64>,
    /// `nominal * base_price`
    pub mtm_base: f64,
    /// `nominal * simulated_prices[i]`
    pub mtm_simulated: Vec<f64>,
    /// `mtm_simulated[i] - mtm_base`
    pub pnl: Vec<f64>,
    /// Confidence level the tail was taken at
    pub confidence: f64,
    /// Tail rank in percent, `(1 - confidence) * 100`
    pub tail_pct: f64,
    /// Raw percentile of the P&L distribution before the sign flip
    pub percentile_value: f64,
    /// `-percentile_value`; positive = expected tail loss magnitude
    pub var: f64,
}

/// Compute historical-simulation VaR.
///
/// `prices` must be ordered chronologically (oldest first). Each
/// one-period return ratio is applied to `base_price` (the last price
/// of the series when not supplied) as if it occurred today, the
/// position is marked to market under every simulated price, and VaR
/// is the negated `(1 - confidence) * 100`-th percentile of the
/// simulated P&L.
///
/// `confidence` is expected in (0, 1) exclusive; the engine does not
/// guard the boundaries, where the percentile degenerates to the min
/// or max P&L. Non-positive prices are not rejected here either: the
/// resulting NaN/Inf ratios propagate through the arithmetic. Callers
/// that want a hard error validate before invoking (the position
/// resolver does).
///
/// VaR can be negative when even the tail percentile of P&L is a gain;
/// there is deliberately no floor at zero.
pub fn compute_historical_var(
    prices: &[f64],
    nominal: f64,
    confidence: f64,
    base_price: Option<f64>,
) -> Result<VarResult, EngineError> {
    if prices.len() < 2 {
        return Err(EngineError::InsufficientData {
            count: prices.len(),
        });
    }

    let shocks: Vec<f64> = prices.windows(2).map(|w| w[1] / w[0]).collect();

    let base_price = base_price.unwrap_or(prices[prices.len() - 1]);

    let simulated_prices: Vec<f64> = shocks.iter().map(|s| base_price * s).collect();

    let mtm_base = nominal * base_price;
    let mtm_simulated: Vec<f64> = simulated_prices.iter().map(|p| nominal * p).collect();
    let pnl: Vec<f64> = mtm_simulated.iter().map(|m| m - mtm_base).collect();

    let tail_pct = (1.0 - confidence) * 100.0;
    let percentile_value = percentile(&pnl, tail_pct);
    let var = -percentile_value;

    Ok(VarResult {
        base_price,
        shocks,
        simulated_prices,
        mtm_base,
        mtm_simulated,
        pnl,
        confidence,
        tail_pct,
        percentile_value,
        var,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_shock_count_and_values() {
        let prices = [100.0, 102.0, 101.0, 105.0, 99.0];
        let res = compute_historical_var(&prices, 1000.0, 0.95, None).unwrap();

        assert_eq!(res.shocks.len(), prices.len() - 1);
        assert_relative_eq!(res.shocks[0], 102.0 / 100.0);
        assert_relative_eq!(res.shocks[1], 101.0 / 102.0);
        assert_relative_eq!(res.shocks[2], 105.0 / 101.0);
        assert_relative_eq!(res.shocks[3], 99.0 / 105.0);
    }

    #[test]
    fn test_projection_and_pnl_identities() {
        let prices = [100.0, 102.0, 101.0, 105.0, 99.0];
        let nominal = 1000.0;
        let res = compute_historical_var(&prices, nominal, 0.95, None).unwrap();

        assert_eq!(res.base_price, 99.0);
        for i in 0..res.shocks.len() {
            assert_relative_eq!(res.simulated_prices[i], res.base_price * res.shocks[i]);
            assert_relative_eq!(
                res.pnl[i],
                nominal * (res.simulated_prices[i] - res.base_price),
                max_relative = 1e-12
            );
            // equivalent form: nominal * base * (shock - 1)
            assert_relative_eq!(
                res.pnl[i],
                nominal * res.base_price * (res.shocks[i] - 1.0),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_scenario_five_prices() {
        let prices = [100.0, 102.0, 101.0, 105.0, 99.0];
        let res = compute_historical_var(&prices, 1000.0, 0.95, None).unwrap();

        // 5th percentile of 4 P&Ls: rank 0.15, interpolated between the
        // two worst outcomes.
        let mut sorted = res.pnl.clone();
        sorted.sort_unstable_by(f64::total_cmp);
        let expected_pct = sorted[0] + 0.15 * (sorted[1] - sorted[0]);

        assert_relative_eq!(res.percentile_value, expected_pct, max_relative = 1e-12);
        assert_relative_eq!(res.var, -expected_pct, max_relative = 1e-12);
        assert_relative_eq!(res.var, 4954.159_663_865_545, max_relative = 1e-9);
    }

    #[test]
    fn test_flat_series_has_zero_var() {
        let res = compute_historical_var(&[100.0, 100.0], 10.0, 0.95, None).unwrap();
        assert_eq!(res.shocks, vec![1.0]);
        assert_eq!(res.var, 0.0);
        assert_eq!(res.percentile_value, 0.0);
    }

    #[test]
    fn test_explicit_base_price() {
        let prices = [100.0, 110.0];
        let res = compute_historical_var(&prices, 5.0, 0.95, Some(50.0)).unwrap();
        assert_eq!(res.base_price, 50.0);
        assert_relative_eq!(res.simulated_prices[0], 50.0 * 1.1);
        assert_relative_eq!(res.mtm_base, 250.0);
    }

    #[test]
    fn test_single_price_is_rejected() {
        let err = compute_historical_var(&[50.0], 1.0, 0.95, None).unwrap_err();
        assert!(matches!(err, EngineError::InsufficientData { count: 1 }));
    }

    #[test]
    fn test_empty_series_is_rejected() {
        let err = compute_historical_var(&[], 1.0, 0.95, None).unwrap_err();
        assert!(matches!(err, EngineError::InsufficientData { count: 0 }));
    }

    #[test]
    fn test_idempotent() {
        let prices = [100.0, 103.0, 97.5, 101.2];
        let a = compute_historical_var(&prices, 250.0, 0.99, None).unwrap();
        let b = compute_historical_var(&prices, 250.0, 0.99, None).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_short_position_flips_pnl_sign() {
        let prices = [100.0, 90.0];
        let long = compute_historical_var(&prices, 100.0, 0.95, None).unwrap();
        let short = compute_historical_var(&prices, -100.0, 0.95, None).unwrap();
        assert_relative_eq!(long.pnl[0], -short.pnl[0], max_relative = 1e-12);
    }

    #[test]
    fn test_var_can_be_negative_when_tail_is_a_gain() {
        // strictly rising prices: every simulated P&L is a gain
        let prices = [100.0, 101.0, 102.5, 104.0];
        let res = compute_historical_var(&prices, 100.0, 0.95, None).unwrap();
        assert!(res.pnl.iter().all(|p| *p > 0.0));
        assert!(res.var < 0.0);
    }
}
