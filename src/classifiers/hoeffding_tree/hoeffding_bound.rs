use crate::classifiers::hoeffding_tree::error::TreeError;

/// Hoeffding bound used to decide whether enough evidence has been seen to
/// commit to a split.
///
/// `ε = sqrt(R² · ln(1/δ) / (2n))`, where `R` is the range of the merit
/// statistic, `δ` one minus the desired probability of choosing the correct
/// attribute, and `n` the (weighted) number of observations.
///
/// Returns an error instead of clamping when any argument lies outside its
/// domain.
pub fn hoeffding_bound(range_val: f64, confidence: f64, n: f64) -> Result<f64, TreeError> {
    if !(range_val.is_finite() && range_val > 0.0) {
        return Err(TreeError::InvalidRange(range_val));
    }
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(TreeError::InvalidConfidence(confidence));
    }
    if !(n.is_finite() && n > 0.0) {
        return Err(TreeError::InvalidSampleCount(n));
    }
    Ok(((range_val * range_val * (1.0 / confidence).ln()) / (2.0 * n)).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn matches_closed_form() {
        let bound = hoeffding_bound(1.0, 0.05, 1000.0).unwrap();
        let expected = ((1.0_f64 / 0.05).ln() / 2000.0).sqrt();
        assert_relative_eq!(bound, expected, epsilon = 1e-12);
    }

    #[test]
    fn rejects_out_of_domain_confidence() {
        for confidence in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            assert!(matches!(
                hoeffding_bound(1.0, confidence, 10.0),
                Err(TreeError::InvalidConfidence(_))
            ));
        }
    }

    #[test]
    fn rejects_non_positive_sample_count() {
        assert!(matches!(
            hoeffding_bound(1.0, 0.1, 0.0),
            Err(TreeError::InvalidSampleCount(_))
        ));
        assert!(matches!(
            hoeffding_bound(1.0, 0.1, -3.0),
            Err(TreeError::InvalidSampleCount(_))
        ));
    }

    #[test]
    fn rejects_degenerate_range() {
        assert!(matches!(
            hoeffding_bound(0.0, 0.1, 10.0),
            Err(TreeError::InvalidRange(_))
        ));
        assert!(matches!(
            hoeffding_bound(f64::INFINITY, 0.1, 10.0),
            Err(TreeError::InvalidRange(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_bound_is_positive(
            range in 0.01f64..10.0,
            confidence in 1e-9f64..0.999,
            n in 1.0f64..1e7,
        ) {
            prop_assert!(hoeffding_bound(range, confidence, n).unwrap() > 0.0);
        }

        #[test]
        fn prop_bound_decreases_with_more_samples(
            range in 0.01f64..10.0,
            confidence in 1e-9f64..0.999,
            n in 1.0f64..1e6,
            extra in 1.0f64..1e6,
        ) {
            let fewer = hoeffding_bound(range, confidence, n).unwrap();
            let more = hoeffding_bound(range, confidence, n + extra).unwrap();
            prop_assert!(more < fewer);
        }

        #[test]
        fn prop_bound_increases_with_range(
            range in 0.01f64..10.0,
            widen in 0.01f64..10.0,
            confidence in 1e-9f64..0.999,
            n in 1.0f64..1e6,
        ) {
            let narrow = hoeffding_bound(range, confidence, n).unwrap();
            let wide = hoeffding_bound(range + widen, confidence, n).unwrap();
            prop_assert!(wide > narrow);
        }
    }
}
