use crate::utils::memory::MemorySized;

/// Scores a candidate split from the class distributions it would produce.
pub trait SplitCriterion: MemorySized {
    /// Width of the merit interval for `pre_split_distribution`, used as the
    /// range term of the Hoeffding bound.
    fn get_range_of_merit(&self, pre_split_distribution: &[f64]) -> f64;

    fn get_merit_of_split(
        &self,
        pre_split_distribution: &[f64],
        post_split_dists: &[Vec<f64>],
    ) -> f64;
}
