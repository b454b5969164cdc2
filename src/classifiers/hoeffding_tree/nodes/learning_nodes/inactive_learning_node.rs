use crate::classifiers::hoeffding_tree::nodes::learning_node::LearningNode;
use crate::classifiers::hoeffding_tree::nodes::learning_nodes::{describe_leaf, majority_promise};
use crate::core::instances::Instance;
use crate::utils::memory::{MemoryMeter, MemorySized};
use std::any::Any;

/// Leaf holding only the class distribution it had when deactivated.
pub struct InactiveLearningNode {
    observed_class_distribution: Vec<f64>,
    depth: usize,
}

impl InactiveLearningNode {
    pub fn new(observed_class_distribution: Vec<f64>, depth: usize) -> Self {
        Self {
            observed_class_distribution,
            depth,
        }
    }
}

impl LearningNode<Vec<f64>> for InactiveLearningNode {
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
        false
    }

    fn calculate_promise(&self) -> f64 {
        majority_promise(&self.observed_class_distribution)
    }

    fn learn_from_instance(&mut self, _instance: &dyn Instance) {}

    fn describe(&self) -> String {
        describe_leaf("inactive", &self.observed_class_distribution)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl MemorySized for InactiveLearningNode {
    fn extra_heap_size(&self, meter: &mut MemoryMeter) -> usize {
        meter.measure_field(&self.observed_class_distribution)
    }
}
