//! Linear-interpolation percentile over order statistics

/// Compute the `q`-th percentile of `values` (q in 0..=100).
///
/// Uses the linear-interpolation definition: with the sample sorted
/// ascending, the percentile sits at position `q/100 * (n-1)` and is
/// interpolated between the two neighbouring order statistics. `q` is
/// clamped to [0, 100].
///
/// NaN inputs sort after every finite value (`total_cmp`) and propagate
/// into the result rather than being filtered out.
pub fn percentile(values: &[f64], q: f64) -> f64 {
    debug_assert!(!values.is_empty(), "percentile of empty sample");

    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);

    let q = q.clamp(0.0, 100.0);
    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;

    if lo == hi {
        return sorted[lo];
    }

    let weight = rank - lo as f64;
    sorted[lo] + weight * (sorted[hi] - sorted[lo])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_extremes_and_median() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0];
        assert_eq!(percentile(&values, 0.0), 1.0);
        assert_eq!(percentile(&values, 100.0), 5.0);
        assert_eq!(percentile(&values, 50.0), 3.0);
    }

    #[test]
    fn test_interpolates_between_order_statistics() {
        // rank = 0.25 * 3 = 0.75, between 10 and 20
        let values = [10.0, 20.0, 30.0, 40.0];
        assert_relative_eq!(percentile(&values, 25.0), 17.5);
    }

    #[test]
    fn test_tail_rank_of_four_points() {
        // 5th percentile of 4 points: rank 0.15, 15% of the way from
        // the worst to the second-worst value.
        let values = [1980.0, -970.0, 3920.0, -5657.0];
        let expected = -5657.0 + 0.15 * (-970.0 - (-5657.0));
        assert_relative_eq!(percentile(&values, 5.0), expected);
    }

    #[test]
    fn test_single_value() {
        assert_eq!(percentile(&[42.0], 5.0), 42.0);
        assert_eq!(percentile(&[42.0], 95.0), 42.0);
    }

    #[test]
    fn test_clamps_out_of_range_q() {
        let values = [1.0, 2.0, 3.0];
        assert_eq!(percentile(&values, -10.0), 1.0);
        assert_eq!(percentile(&values, 110.0), 3.0);
    }
}
