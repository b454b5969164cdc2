use crate::classifiers::hoeffding_tree::nodes::{LearningNode, Node};
use crate::utils::memory::MemorySized;

/// What a concrete tree contributes to the shared engine: the statistics its
/// leaves keep and how leaves are built.
pub trait TreeVariant: MemorySized {
    type Stats: Clone + MemorySized + 'static;

    /// Builds a leaf. `parent` is the node the leaf hangs under, or the leaf
    /// it replaces when a leaf changes state in place; implementations place
    /// the new leaf at `parent.depth() + 1`.
    fn new_learning_node(
        &self,
        initial_stats: Option<Self::Stats>,
        parent: Option<&Node<Self::Stats>>,
        is_active: bool,
    ) -> Box<dyn LearningNode<Self::Stats>>;
}
