use std::f64::consts::SQRT_2;

/// Area under the standard normal curve from minus infinity to `z`.
pub fn normal_probability(z: f64) -> f64 {
    0.5 * (1.0 + libm::erf(z / SQRT_2))
}

/// Base-2 logarithm that maps non-positive inputs to zero, as entropy terms
/// with zero weight contribute nothing.
#[inline]
pub fn log2_or_zero(x: f64) -> f64 {
    if x > 0.0 { x.log2() } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn normal_probability_is_half_at_zero() {
        assert_abs_diff_eq!(normal_probability(0.0), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn normal_probability_known_quantiles() {
        assert_abs_diff_eq!(normal_probability(1.96), 0.975, epsilon = 1e-3);
        assert_abs_diff_eq!(normal_probability(-1.96), 0.025, epsilon = 1e-3);
    }

    #[test]
    fn log2_or_zero_handles_zero() {
        assert_eq!(log2_or_zero(0.0), 0.0);
        assert_abs_diff_eq!(log2_or_zero(8.0), 3.0, epsilon = 1e-12);
    }
}
