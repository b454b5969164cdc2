use crate::classifiers::attribute_class_observers::attribute_class_observer::AttributeClassObserver;
use crate::classifiers::conditional_tests::attribute_split_suggestion::AttributeSplitSuggestion;
use crate::classifiers::hoeffding_tree::split_criteria::SplitCriterion;
use crate::utils::memory::MemorySized;
use std::any::Any;

/// Stand-in for a disabled attribute: observes nothing, suggests nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAttributeClassObserver;

impl NullAttributeClassObserver {
    pub fn new() -> Self {
        Self
    }
}

impl AttributeClassObserver for NullAttributeClassObserver {
    fn observe_attribute_class(&mut self, _att_val: f64, _class_val: usize, _weight: f64) {}

    fn get_best_evaluated_split_suggestion(
        &self,
        _criterion: &dyn SplitCriterion,
        _pre_split_dist: &[f64],
        _att_index: usize,
        _binary_only: bool,
    ) -> Option<AttributeSplitSuggestion> {
        None
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl MemorySized for NullAttributeClassObserver {}
