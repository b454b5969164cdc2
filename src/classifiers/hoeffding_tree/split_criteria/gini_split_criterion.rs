use crate::classifiers::hoeffding_tree::split_criteria::split_criterion::SplitCriterion;
use crate::utils::memory::MemorySized;

#[derive(Debug, Default, Clone, Copy)]
pub struct GiniSplitCriterion;

impl GiniSplitCriterion {
    pub fn new() -> Self {
        Self
    }

    pub fn compute_gini(distribution: &[f64], distribution_sum_of_weights: f64) -> f64 {
        let mut gini = 1.0;
        for &weight in distribution {
            let rel_freq = weight / distribution_sum_of_weights;
            gini -= rel_freq * rel_freq;
        }
        gini
    }
}

impl SplitCriterion for GiniSplitCriterion {
    fn get_range_of_merit(&self, _pre_split_distribution: &[f64]) -> f64 {
        1.0
    }

    fn get_merit_of_split(
        &self,
        _pre_split_distribution: &[f64],
        post_split_dists: &[Vec<f64>],
    ) -> f64 {
        let dist_weights: Vec<f64> = post_split_dists
            .iter()
            .map(|dist| dist.iter().sum())
            .collect();
        let total_weight: f64 = dist_weights.iter().sum();
        if total_weight <= 0.0 {
            return 0.0;
        }

        let gini: f64 = post_split_dists
            .iter()
            .zip(&dist_weights)
            .filter(|(_, w)| **w > 0.0)
            .map(|(dist, &w)| (w / total_weight) * Self::compute_gini(dist, w))
            .sum();

        1.0 - gini
    }
}

impl MemorySized for GiniSplitCriterion {}
