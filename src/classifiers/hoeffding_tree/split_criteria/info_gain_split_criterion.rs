use crate::classifiers::hoeffding_tree::split_criteria::split_criterion::SplitCriterion;
use crate::utils::math::log2_or_zero;
use crate::utils::memory::MemorySized;

pub const DEFAULT_MIN_BRANCH_FRAC: f64 = 0.01;

/// Entropy reduction. Splits that leave fewer than two branches holding at
/// least `min_branch_frac` of the weight score negative infinity.
#[derive(Debug, Clone, Copy)]
pub struct InfoGainSplitCriterion {
    min_branch_frac: f64,
}

impl Default for InfoGainSplitCriterion {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_BRANCH_FRAC)
    }
}

impl InfoGainSplitCriterion {
    pub fn new(min_branch_frac: f64) -> Self {
        Self { min_branch_frac }
    }

    pub fn compute_entropy(distribution: &[f64]) -> f64 {
        let mut entropy = 0.0;
        let mut sum = 0.0;
        for &d in distribution {
            entropy -= d * log2_or_zero(d);
            sum += d;
        }
        if sum > 0.0 {
            (entropy + sum * sum.log2()) / sum
        } else {
            0.0
        }
    }

    pub fn compute_weighted_entropy(dists: &[Vec<f64>]) -> f64 {
        let mut total_weight = 0.0;
        let mut entropy = 0.0;
        for dist in dists {
            let weight: f64 = dist.iter().sum();
            entropy += weight * Self::compute_entropy(dist);
            total_weight += weight;
        }
        if total_weight > 0.0 {
            entropy / total_weight
        } else {
            0.0
        }
    }

    fn num_subsets_greater_than_frac(&self, dists: &[Vec<f64>]) -> usize {
        let sums: Vec<f64> = dists.iter().map(|d| d.iter().sum()).collect();
        let total: f64 = sums.iter().sum();
        if total <= 0.0 {
            return 0;
        }
        sums.iter()
            .filter(|&&s| s / total > self.min_branch_frac)
            .count()
    }
}

impl SplitCriterion for InfoGainSplitCriterion {
    fn get_range_of_merit(&self, pre_split_distribution: &[f64]) -> f64 {
        let num_classes = pre_split_distribution.len().max(2);
        (num_classes as f64).log2()
    }

    fn get_merit_of_split(
        &self,
        pre_split_distribution: &[f64],
        post_split_dists: &[Vec<f64>],
    ) -> f64 {
        if self.num_subsets_greater_than_frac(post_split_dists) < 2 {
            return f64::NEG_INFINITY;
        }
        Self::compute_entropy(pre_split_distribution)
            - Self::compute_weighted_entropy(post_split_dists)
    }
}

impl MemorySized for InfoGainSplitCriterion {}
