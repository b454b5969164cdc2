use crate::classifiers::attribute_class_observers::{
    AttributeClassObserver, GaussianNumericAttributeClassObserver, NominalAttributeClassObserver,
    NullAttributeClassObserver,
};
use crate::classifiers::conditional_tests::attribute_split_suggestion::AttributeSplitSuggestion;
use crate::classifiers::hoeffding_tree::nodes::learning_node::LearningNode;
use crate::classifiers::hoeffding_tree::nodes::learning_nodes::{
    add_class_weight, describe_leaf, majority_promise,
};
use crate::classifiers::hoeffding_tree::split_criteria::SplitCriterion;
use crate::core::instances::Instance;
use crate::utils::memory::{MemoryMeter, MemorySized};
use std::any::Any;

/// Leaf that keeps a class distribution plus one observer per attribute.
/// Observers are indexed by header position; the class slot stays empty.
pub struct ActiveLearningNode {
    observed_class_distribution: Vec<f64>,
    depth: usize,
    weight_seen_at_last_split_evaluation: f64,
    attribute_observers: Vec<Option<Box<dyn AttributeClassObserver>>>,
}

impl ActiveLearningNode {
    pub fn new(observed_class_distribution: Vec<f64>, depth: usize) -> Self {
        let weight_seen = observed_class_distribution.iter().sum();
        Self {
            observed_class_distribution,
            depth,
            weight_seen_at_last_split_evaluation: weight_seen,
            attribute_observers: Vec::new(),
        }
    }

    pub fn weight_seen(&self) -> f64 {
        self.observed_class_distribution.iter().sum()
    }

    pub fn weight_seen_at_last_split_evaluation(&self) -> f64 {
        self.weight_seen_at_last_split_evaluation
    }

    pub fn set_weight_seen_at_last_split_evaluation(&mut self, weight: f64) {
        self.weight_seen_at_last_split_evaluation = weight;
    }

    pub fn observed_class_distribution_is_pure(&self) -> bool {
        self.observed_class_distribution
            .iter()
            .filter(|&&w| w != 0.0)
            .count()
            < 2
    }

    /// Best split per observed attribute, preceded by the "do not split"
    /// candidate when `merit_preprune` is set.
    pub fn get_best_split_suggestions(
        &self,
        criterion: &dyn SplitCriterion,
        binary_only: bool,
        merit_preprune: bool,
    ) -> Vec<AttributeSplitSuggestion> {
        let pre_split_distribution = &self.observed_class_distribution;
        let mut best_suggestions = Vec::new();

        if merit_preprune {
            let unsplit = vec![pre_split_distribution.clone()];
            let merit = criterion.get_merit_of_split(pre_split_distribution, &unsplit);
            best_suggestions.push(AttributeSplitSuggestion::new(None, unsplit, merit));
        }

        for (att_index, observer) in self.attribute_observers.iter().enumerate() {
            let Some(observer) = observer else { continue };
            if let Some(suggestion) = observer.get_best_evaluated_split_suggestion(
                criterion,
                pre_split_distribution,
                att_index,
                binary_only,
            ) {
                best_suggestions.push(suggestion);
            }
        }
        best_suggestions
    }

    pub fn disable_attribute(&mut self, att_index: usize) {
        if let Some(slot) = self.attribute_observers.get_mut(att_index) {
            *slot = Some(Box::new(NullAttributeClassObserver::new()));
        }
    }

    pub fn attribute_observer(&self, att_index: usize) -> Option<&dyn AttributeClassObserver> {
        self.attribute_observers.get(att_index)?.as_deref()
    }

    fn new_observer(instance: &dyn Instance, att_index: usize) -> Box<dyn AttributeClassObserver> {
        match instance.attribute_at_index(att_index) {
            Some(attribute) if attribute.is_nominal() => {
                Box::new(NominalAttributeClassObserver::new())
            }
            _ => Box::new(GaussianNumericAttributeClassObserver::new()),
        }
    }
}

impl LearningNode<Vec<f64>> for ActiveLearningNode {
    fn stats(&self) -> &Vec<f64> {
        &self.observed_class_distribution
    }

    fn depth(&self) -> usize {
        self.depth
    }

    fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
    }

    fn is_active(&self) -> bool {
        true
    }

    fn calculate_promise(&self) -> f64 {
        majority_promise(&self.observed_class_distribution)
    }

    fn learn_from_instance(&mut self, instance: &dyn Instance) {
        let Some(class_value) = instance.class_value() else {
            return;
        };
        let class_index = class_value as usize;
        let weight = instance.weight();
        add_class_weight(&mut self.observed_class_distribution, class_index, weight);

        let n_attributes = instance.number_of_attributes();
        if self.attribute_observers.len() < n_attributes {
            self.attribute_observers.resize_with(n_attributes, || None);
        }

        for att_index in 0..n_attributes {
            if att_index == instance.class_index() {
                continue;
            }
            let Some(value) = instance.value_at_index(att_index) else {
                continue;
            };
            self.attribute_observers[att_index]
                .get_or_insert_with(|| Self::new_observer(instance, att_index))
                .observe_attribute_class(value, class_index, weight);
        }
    }

    fn describe(&self) -> String {
        describe_leaf("active", &self.observed_class_distribution)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl MemorySized for ActiveLearningNode {
    fn extra_heap_size(&self, meter: &mut MemoryMeter) -> usize {
        meter.measure_field(&self.observed_class_distribution)
            + meter.measure_field(&self.attribute_observers)
    }
}
