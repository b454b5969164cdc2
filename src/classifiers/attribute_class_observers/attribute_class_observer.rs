use crate::classifiers::conditional_tests::attribute_split_suggestion::AttributeSplitSuggestion;
use crate::classifiers::hoeffding_tree::split_criteria::SplitCriterion;
use crate::utils::memory::MemorySized;
use std::any::Any;

/// Per-attribute statistics a leaf keeps to propose splits on that attribute.
pub trait AttributeClassObserver: Any + MemorySized {
    fn observe_attribute_class(&mut self, att_val: f64, class_val: usize, weight: f64);

    /// Best split on attribute `att_index` according to `criterion`, or
    /// `None` when nothing has been observed yet.
    fn get_best_evaluated_split_suggestion(
        &self,
        criterion: &dyn SplitCriterion,
        pre_split_dist: &[f64],
        att_index: usize,
        binary_only: bool,
    ) -> Option<AttributeSplitSuggestion>;

    fn as_any(&self) -> &dyn Any;
}
