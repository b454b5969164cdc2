use crate::utils::math::normal_probability;
use crate::utils::memory::MemorySized;
use std::f64::consts::PI;

/// Incrementally maintained weighted normal distribution (Welford update).
#[derive(Clone, Debug, Default)]
pub struct GaussianEstimator {
    weight_sum: f64,
    mean: f64,
    variance_sum: f64,
}

impl GaussianEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_observation(&mut self, value: f64, weight: f64) {
        if !value.is_finite() {
            return;
        }

        if self.weight_sum > 0.0 {
            self.weight_sum += weight;
            let last_mean = self.mean;
            self.mean += weight * (value - last_mean) / self.weight_sum;
            self.variance_sum += weight * (value - last_mean) * (value - self.mean);
        } else {
            self.mean = value;
            self.weight_sum = weight;
        }
    }

    pub fn total_weight(&self) -> f64 {
        self.weight_sum
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn variance(&self) -> f64 {
        if self.weight_sum > 1.0 {
            self.variance_sum / (self.weight_sum - 1.0)
        } else {
            0.0
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn probability_density(&self, value: f64) -> f64 {
        if self.weight_sum <= 0.0 {
            return 0.0;
        }
        let std_dev = self.std_dev();
        if std_dev > 0.0 {
            let diff = value - self.mean;
            let normal_const = (2.0 * PI).sqrt() * std_dev;
            (-(diff * diff) / (2.0 * std_dev * std_dev)).exp() / normal_const
        } else if value == self.mean {
            1.0
        } else {
            0.0
        }
    }

    /// Observed weight split into `[less, equal, greater]` than `value`.
    pub fn estimated_weight_less_equal_greater_value(&self, value: f64) -> [f64; 3] {
        let equal = self.probability_density(value) * self.weight_sum;
        let std_dev = self.std_dev();
        let less = if std_dev > 0.0 {
            normal_probability((value - self.mean) / std_dev) * self.weight_sum - equal
        } else if value > self.mean {
            self.weight_sum - equal
        } else {
            0.0
        };
        let greater = (self.weight_sum - equal - less).max(0.0);
        [less, equal, greater]
    }
}

impl MemorySized for GaussianEstimator {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn starts_empty() {
        let g = GaussianEstimator::new();
        assert_eq!(g.total_weight(), 0.0);
        assert_eq!(g.variance(), 0.0);
        assert_eq!(g.probability_density(0.0), 0.0);
    }

    #[test]
    fn sample_variance_of_three_points() {
        let mut g = GaussianEstimator::new();
        for v in [-1.0, 0.0, 1.0] {
            g.add_observation(v, 1.0);
        }
        assert_abs_diff_eq!(g.mean(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(g.variance(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            g.probability_density(0.0),
            1.0 / (2.0 * PI).sqrt(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn weights_behave_like_repetition() {
        let mut weighted = GaussianEstimator::new();
        weighted.add_observation(0.0, 2.0);
        weighted.add_observation(2.0, 1.0);

        let mut repeated = GaussianEstimator::new();
        for v in [0.0, 0.0, 2.0] {
            repeated.add_observation(v, 1.0);
        }

        assert_abs_diff_eq!(weighted.mean(), repeated.mean(), epsilon = 1e-12);
        assert_abs_diff_eq!(weighted.variance(), repeated.variance(), epsilon = 1e-12);
    }

    #[test]
    fn ignores_non_finite_values() {
        let mut g = GaussianEstimator::new();
        g.add_observation(f64::NAN, 1.0);
        g.add_observation(f64::INFINITY, 1.0);
        assert_eq!(g.total_weight(), 0.0);
    }

    #[test]
    fn weight_split_sums_to_total() {
        let mut g = GaussianEstimator::new();
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            g.add_observation(v, 1.0);
        }
        let [less, equal, greater] = g.estimated_weight_less_equal_greater_value(3.0);
        assert_abs_diff_eq!(less + equal + greater, 5.0, epsilon = 1e-9);
        assert!(less > 0.0 && greater > 0.0);
    }

    #[test]
    fn zero_variance_splits_around_the_spike() {
        let mut g = GaussianEstimator::new();
        g.add_observation(10.0, 3.0);
        assert_eq!(g.estimated_weight_less_equal_greater_value(20.0), [3.0, 0.0, 0.0]);
        assert_eq!(g.estimated_weight_less_equal_greater_value(5.0), [0.0, 0.0, 3.0]);
    }
}
