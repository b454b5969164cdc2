mod active_learning_node;
mod inactive_learning_node;

pub use active_learning_node::ActiveLearningNode;
pub use inactive_learning_node::InactiveLearningNode;

/// Total weight minus the majority-class weight.
pub(crate) fn majority_promise(distribution: &[f64]) -> f64 {
    let total: f64 = distribution.iter().sum();
    if total > 0.0 {
        let majority = distribution.iter().copied().fold(f64::MIN, f64::max);
        total - majority
    } else {
        0.0
    }
}

pub(crate) fn add_class_weight(distribution: &mut Vec<f64>, class_index: usize, weight: f64) {
    if class_index >= distribution.len() {
        distribution.resize(class_index + 1, 0.0);
    }
    distribution[class_index] += weight;
}

pub(crate) fn majority_class(distribution: &[f64]) -> Option<usize> {
    distribution
        .iter()
        .enumerate()
        .filter(|(_, w)| **w > 0.0)
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
}

pub(crate) fn describe_leaf(state: &str, distribution: &[f64]) -> String {
    let weights = distribution
        .iter()
        .map(|w| format!("{w:.3}"))
        .collect::<Vec<_>>()
        .join(", ");
    match majority_class(distribution) {
        Some(class) => format!("Leaf [{state}] class {class} | [{weights}]"),
        None => format!("Leaf [{state}] empty"),
    }
}
