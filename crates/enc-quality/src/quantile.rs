//! Linear-interpolation quantiles.

/// Quantile `q` of `values` by linear interpolation between order statistics.
///
/// Returns `None` for an empty slice; the quantile of no data is undefined.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(quantile_sorted(&sorted, q))
}

/// Same as [`quantile`] for an already ascending, non-empty slice.
///
/// `q` is clamped to `[0, 1]`.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let last = sorted.len() - 1;
    let position = last as f64 * q.clamp(0.0, 1.0);
    let lower = (position.floor() as usize).min(last);
    let upper = (position.ceil() as usize).min(last);
    lerp(sorted[lower], sorted[upper], position - lower as f64)
}

// Interpolate from the nearer end so that equal neighbours return exactly
// their value and the result never leaves [a, b].
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if t >= 0.5 {
        b - diff * (1.0 - t)
    } else {
        a + diff * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_undefined() {
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn single_value() {
        assert_eq!(quantile(&[7.0], 0.99), Some(7.0));
    }

    #[test]
    fn median_interpolates() {
        assert_eq!(quantile(&[1.0, 2.0, 3.0, 4.0], 0.5), Some(2.5));
        assert_eq!(quantile(&[4.0, 1.0, 3.0], 0.5), Some(3.0));
    }

    #[test]
    fn p99_of_skewed_counts() {
        let counts = [3.0, 2.0, 5.0, 1.0, 4.0, 2.0, 3.0, 1.0, 2.0, 2.0, 1.0, 50.0];
        let threshold = quantile(&counts, 0.99).unwrap();
        assert!((threshold - 45.05).abs() < 1e-9);
    }

    #[test]
    fn uniform_values_are_exact() {
        assert_eq!(quantile(&[5.0; 10], 0.99), Some(5.0));
    }

    #[test]
    fn extremes() {
        let values = [10.0, 20.0, 30.0];
        assert_eq!(quantile(&values, 0.0), Some(10.0));
        assert_eq!(quantile(&values, 1.0), Some(30.0));
    }
}
