use crate::classifiers::attribute_class_observers::attribute_class_observer::AttributeClassObserver;
use crate::classifiers::conditional_tests::attribute_split_suggestion::AttributeSplitSuggestion;
use crate::classifiers::hoeffding_tree::instance_conditional_test::{
    NominalAttributeBinaryTest, NominalAttributeMultiwayTest,
};
use crate::classifiers::hoeffding_tree::split_criteria::SplitCriterion;
use crate::utils::memory::{MemoryMeter, MemorySized};
use std::any::Any;

/// Weight counts per (class, value) for a nominal attribute.
#[derive(Debug, Default, Clone)]
pub struct NominalAttributeClassObserver {
    total_weight_observed: f64,
    missing_weight_observed: f64,
    attribute_value_distribution_per_class: Vec<Vec<f64>>,
}

impl NominalAttributeClassObserver {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_value(&mut self, class_val: usize, att_val_int: usize) {
        if class_val >= self.attribute_value_distribution_per_class.len() {
            self.attribute_value_distribution_per_class
                .resize_with(class_val + 1, Vec::new);
        }
        let row = &mut self.attribute_value_distribution_per_class[class_val];
        if att_val_int >= row.len() {
            row.resize(att_val_int + 1, 0.0);
        }
    }

    pub fn total_weight_observed(&self) -> f64 {
        self.total_weight_observed
    }

    pub fn missing_weight_observed(&self) -> f64 {
        self.missing_weight_observed
    }

    pub fn get_max_att_vals_observed(&self) -> usize {
        self.attribute_value_distribution_per_class
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
    }

    pub fn get_class_dists_resulting_from_multiway_split(
        &self,
        max_att_vals: usize,
    ) -> Vec<Vec<f64>> {
        let num_classes = self.attribute_value_distribution_per_class.len();
        let mut dists = vec![vec![0.0; num_classes]; max_att_vals];
        for (class_idx, row) in self.attribute_value_distribution_per_class.iter().enumerate() {
            for (val_idx, &count) in row.iter().enumerate() {
                dists[val_idx][class_idx] = count;
            }
        }
        dists
    }

    pub fn get_class_dists_resulting_from_binary_split(&self, val_index: usize) -> Vec<Vec<f64>> {
        let num_classes = self.attribute_value_distribution_per_class.len();
        let mut equal = vec![0.0; num_classes];
        let mut not_equal = vec![0.0; num_classes];
        for (class_idx, row) in self.attribute_value_distribution_per_class.iter().enumerate() {
            let matching = row.get(val_index).copied().unwrap_or(0.0);
            equal[class_idx] = matching;
            not_equal[class_idx] = row.iter().sum::<f64>() - matching;
        }
        vec![equal, not_equal]
    }
}

impl AttributeClassObserver for NominalAttributeClassObserver {
    fn observe_attribute_class(&mut self, att_val: f64, class_val: usize, weight: f64) {
        if att_val.is_nan() || att_val < 0.0 {
            self.missing_weight_observed += weight;
        } else {
            let att_val_int = att_val as usize;
            self.ensure_value(class_val, att_val_int);
            self.attribute_value_distribution_per_class[class_val][att_val_int] += weight;
        }
        self.total_weight_observed += weight;
    }

    fn get_best_evaluated_split_suggestion(
        &self,
        criterion: &dyn SplitCriterion,
        pre_split_dist: &[f64],
        att_index: usize,
        binary_only: bool,
    ) -> Option<AttributeSplitSuggestion> {
        let max_att_vals_observed = self.get_max_att_vals_observed();
        let mut best: Option<AttributeSplitSuggestion> = None;

        if !binary_only && max_att_vals_observed > 0 {
            let post_split_dists =
                self.get_class_dists_resulting_from_multiway_split(max_att_vals_observed);
            let merit = criterion.get_merit_of_split(pre_split_dist, &post_split_dists);
            best = Some(AttributeSplitSuggestion::new(
                Some(Box::new(NominalAttributeMultiwayTest::new(att_index))),
                post_split_dists,
                merit,
            ));
        }

        for val_index in 0..max_att_vals_observed {
            let post_split_dists = self.get_class_dists_resulting_from_binary_split(val_index);
            let merit = criterion.get_merit_of_split(pre_split_dist, &post_split_dists);
            if best.as_ref().is_none_or(|b| merit > b.merit()) {
                best = Some(AttributeSplitSuggestion::new(
                    Some(Box::new(NominalAttributeBinaryTest::new(att_index, val_index))),
                    post_split_dists,
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

impl MemorySized for NominalAttributeClassObserver {
    fn extra_heap_size(&self, meter: &mut MemoryMeter) -> usize {
        meter.measure_field(&self.attribute_value_distribution_per_class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::hoeffding_tree::split_criteria::InfoGainSplitCriterion;
    use approx::assert_abs_diff_eq;

    fn separable() -> NominalAttributeClassObserver {
        let mut obs = NominalAttributeClassObserver::new();
        for _ in 0..10 {
            obs.observe_attribute_class(0.0, 0, 1.0);
            obs.observe_attribute_class(1.0, 1, 1.0);
            obs.observe_attribute_class(2.0, 1, 1.0);
        }
        obs
    }

    #[test]
    fn counts_weights_and_missing_values() {
        let mut obs = NominalAttributeClassObserver::new();
        obs.observe_attribute_class(1.0, 0, 2.0);
        obs.observe_attribute_class(f64::NAN, 1, 0.5);
        assert_abs_diff_eq!(obs.total_weight_observed(), 2.5);
        assert_abs_diff_eq!(obs.missing_weight_observed(), 0.5);
        assert_eq!(obs.get_max_att_vals_observed(), 2);
    }

    #[test]
    fn multiway_distributions_are_transposed_counts() {
        let obs = separable();
        let dists = obs.get_class_dists_resulting_from_multiway_split(3);
        assert_eq!(dists, vec![vec![10.0, 0.0], vec![0.0, 10.0], vec![0.0, 10.0]]);
    }

    #[test]
    fn binary_split_isolates_one_value() {
        let obs = separable();
        let dists = obs.get_class_dists_resulting_from_binary_split(0);
        assert_eq!(dists, vec![vec![10.0, 0.0], vec![0.0, 20.0]]);
    }

    #[test]
    fn best_suggestion_respects_binary_only() {
        let obs = separable();
        let criterion = InfoGainSplitCriterion::default();
        let pre = [10.0, 20.0];

        let multi = obs
            .get_best_evaluated_split_suggestion(&criterion, &pre, 4, false)
            .unwrap();
        assert!(multi.merit() > 0.0);

        let binary = obs
            .get_best_evaluated_split_suggestion(&criterion, &pre, 4, true)
            .unwrap();
        assert_eq!(binary.number_of_splits(), 2);
        assert!(
            binary
                .split_test()
                .unwrap()
                .as_any()
                .is::<NominalAttributeBinaryTest>()
        );
        assert_abs_diff_eq!(binary.merit(), multi.merit(), epsilon = 1e-12);
    }

    #[test]
    fn nothing_observed_means_no_suggestion() {
        let obs = NominalAttributeClassObserver::new();
        let criterion = InfoGainSplitCriterion::default();
        assert!(
            obs.get_best_evaluated_split_suggestion(&criterion, &[1.0], 0, false)
                .is_none()
        );
    }
}
