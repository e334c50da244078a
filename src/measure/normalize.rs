//! Scalar normalization into the unit interval.

/// Maps `value` from `[lower, upper]` into `[0, 1]`, clamping out-of-range input.
///
/// A degenerate domain (`upper <= lower`) always yields `0.0`, and so does a
/// NaN value, so the result is never NaN or infinite.
pub fn normalize(value: f64, lower: f64, upper: f64) -> f64 {
    if upper <= lower || value.is_nan() {
        return 0.0;
    }
    ((value - lower) / (upper - lower)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_map_to_zero_and_one() {
        assert_eq!(normalize(-10.0, -10.0, 45.0), 0.0);
        assert_eq!(normalize(45.0, -10.0, 45.0), 1.0);
        assert_eq!(normalize(250.0, 0.0, 500.0), 0.5);
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(normalize(1.3, 0.0, 1.0), 1.0);
        assert_eq!(normalize(-0.2, 0.0, 1.0), 0.0);
        assert_eq!(normalize(f64::INFINITY, 0.0, 1.0), 1.0);
        assert_eq!(normalize(f64::NEG_INFINITY, 0.0, 1.0), 0.0);
    }

    #[test]
    fn degenerate_domain_is_zero() {
        assert_eq!(normalize(3.0, 1.0, 1.0), 0.0);
        assert_eq!(normalize(3.0, 5.0, 1.0), 0.0);
        assert_eq!(normalize(f64::NAN, 0.0, 1.0), 0.0);
    }

    #[test]
    fn output_always_in_unit_interval() {
        let samples = [-1e9, -55.5, -1.0, 0.0, 0.25, 17.0, 499.9, 1e12];
        for &lower in &[-10.0, 0.0, 3.5] {
            for &width in &[0.5, 55.0, 500.0] {
                for &v in &samples {
                    let n = normalize(v, lower, lower + width);
                    assert!((0.0..=1.0).contains(&n), "normalize({v}, {lower}, {}) = {n}", lower + width);
                }
            }
        }
    }
}
