use crate::classifiers::attribute_class_observers::attribute_class_observer::AttributeClassObserver;
use crate::classifiers::conditional_tests::attribute_split_suggestion::AttributeSplitSuggestion;
use crate::classifiers::hoeffding_tree::instance_conditional_test::NumericAttributeBinaryTest;
use crate::classifiers::hoeffding_tree::split_criteria::SplitCriterion;
use crate::core::estimators::gaussian_estimator::GaussianEstimator;
use crate::utils::memory::{MemoryMeter, MemorySized};
use std::any::Any;

pub const DEFAULT_NUM_BINS: usize = 10;

/// Models a numeric attribute with one normal distribution per class and
/// proposes thresholds evenly spaced over the observed range.
#[derive(Debug, Clone)]
pub struct GaussianNumericAttributeClassObserver {
    min_value_observed_per_class: Vec<f64>,
    max_value_observed_per_class: Vec<f64>,
    attribute_value_distribution_per_class: Vec<Option<GaussianEstimator>>,
    num_bins: usize,
}

impl Default for GaussianNumericAttributeClassObserver {
    fn default() -> Self {
        Self::with_bins(DEFAULT_NUM_BINS)
    }
}

impl GaussianNumericAttributeClassObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bins(num_bins: usize) -> Self {
        Self {
            min_value_observed_per_class: Vec::new(),
            max_value_observed_per_class: Vec::new(),
            attribute_value_distribution_per_class: Vec::new(),
            num_bins,
        }
    }

    fn ensure_class(&mut self, class_val: usize) {
        if class_val >= self.attribute_value_distribution_per_class.len() {
            let new_len = class_val + 1;
            self.attribute_value_distribution_per_class
                .resize_with(new_len, || None);
            self.min_value_observed_per_class.resize(new_len, 0.0);
            self.max_value_observed_per_class.resize(new_len, 0.0);
        }
    }

    pub fn get_split_point_suggestions(&self) -> Vec<f64> {
        let mut min_val = f64::INFINITY;
        let mut max_val = f64::NEG_INFINITY;
        for (i, est) in self.attribute_value_distribution_per_class.iter().enumerate() {
            if est.is_some() {
                min_val = min_val.min(self.min_value_observed_per_class[i]);
                max_val = max_val.max(self.max_value_observed_per_class[i]);
            }
        }
        if !(min_val.is_finite() && max_val.is_finite()) {
            return Vec::new();
        }

        let step = (max_val - min_val) / (self.num_bins as f64 + 1.0);
        (0..self.num_bins)
            .map(|i| min_val + step * (i as f64 + 1.0))
            .filter(|&v| v > min_val && v < max_val)
            .collect()
    }

    pub fn get_class_dists_resulting_from_binary_split(&self, split_value: f64) -> Vec<Vec<f64>> {
        let num_classes = self.attribute_value_distribution_per_class.len();
        let mut lhs = vec![0.0; num_classes];
        let mut rhs = vec![0.0; num_classes];

        for (class_idx, est) in self.attribute_value_distribution_per_class.iter().enumerate() {
            let Some(est) = est else { continue };
            if split_value < self.min_value_observed_per_class[class_idx] {
                rhs[class_idx] += est.total_weight();
            } else if split_value >= self.max_value_observed_per_class[class_idx] {
                lhs[class_idx] += est.total_weight();
            } else {
                let [less, equal, greater] =
                    est.estimated_weight_less_equal_greater_value(split_value);
                lhs[class_idx] += less + equal;
                rhs[class_idx] += greater;
            }
        }
        vec![lhs, rhs]
    }
}

impl AttributeClassObserver for GaussianNumericAttributeClassObserver {
    fn observe_attribute_class(&mut self, att_val: f64, class_val: usize, weight: f64) {
        if !att_val.is_finite() || !weight.is_finite() || weight <= 0.0 {
            return;
        }
        self.ensure_class(class_val);

        let slot = &mut self.attribute_value_distribution_per_class[class_val];
        match slot {
            Some(est) => {
                let min = &mut self.min_value_observed_per_class[class_val];
                *min = min.min(att_val);
                let max = &mut self.max_value_observed_per_class[class_val];
                *max = max.max(att_val);
                est.add_observation(att_val, weight);
            }
            None => {
                let mut est = GaussianEstimator::new();
                est.add_observation(att_val, weight);
                *slot = Some(est);
                self.min_value_observed_per_class[class_val] = att_val;
                self.max_value_observed_per_class[class_val] = att_val;
            }
        }
    }

    fn get_best_evaluated_split_suggestion(
        &self,
        criterion: &dyn SplitCriterion,
        pre_split_dist: &[f64],
        att_index: usize,
        _binary_only: bool,
    ) -> Option<AttributeSplitSuggestion> {
        let mut best: Option<AttributeSplitSuggestion> = None;
        for split_value in self.get_split_point_suggestions() {
            let post_dists = self.get_class_dists_resulting_from_binary_split(split_value);
            let merit = criterion.get_merit_of_split(pre_split_dist, &post_dists);
            if best.as_ref().is_none_or(|b| merit > b.merit()) {
                best = Some(AttributeSplitSuggestion::new(
                    Some(Box::new(NumericAttributeBinaryTest::new(
                        att_index,
                        split_value,
                        true,
                    ))),
                    post_dists,
                    merit,
                ));
            }
        }
        best
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl MemorySized for GaussianNumericAttributeClassObserver {
    fn extra_heap_size(&self, meter: &mut MemoryMeter) -> usize {
        meter.measure_field(&self.min_value_observed_per_class)
            + meter.measure_field(&self.max_value_observed_per_class)
            + meter.measure_field(&self.attribute_value_distribution_per_class)
    }
}
