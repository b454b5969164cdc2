use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Point-in-time view of a tree's shape and memory model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelMeasurements {
    pub tree_size_nodes: usize,
    pub tree_size_leaves: usize,
    pub active_learning_nodes: usize,
    pub tree_depth: usize,
    pub active_leaf_byte_size_estimate: f64,
    pub inactive_leaf_byte_size_estimate: f64,
    pub byte_size_estimate_overhead: f64,
}

impl Display for ModelMeasurements {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "nodes={}, leaves={}, active={}, depth={}, active_leaf_bytes={:.1}, inactive_leaf_bytes={:.1}, overhead={:.3}",
            self.tree_size_nodes,
            self.tree_size_leaves,
            self.active_learning_nodes,
            self.tree_depth,
            self.active_leaf_byte_size_estimate,
            self.inactive_leaf_byte_size_estimate,
            self.byte_size_estimate_overhead
        )
    }
}
