use crate::classifiers::hoeffding_tree::instance_conditional_test::InstanceConditionalTest;
use crate::classifiers::hoeffding_tree::nodes::node::Node;
use crate::core::instances::Instance;
use crate::utils::memory::{MemoryMeter, MemorySized};

/// Internal node. Owns its children; `target_stats` are the statistics of the
/// leaf it replaced.
pub struct SplitNode<S> {
    split_test: Box<dyn InstanceConditionalTest>,
    target_stats: S,
    depth: usize,
    children: Vec<Option<Node<S>>>,
}

impl<S: 'static> SplitNode<S> {
    pub fn new(split_test: Box<dyn InstanceConditionalTest>, target_stats: S, depth: usize) -> Self {
        Self {
            split_test,
            target_stats,
            depth,
            children: Vec::new(),
        }
    }

    pub fn split_test(&self) -> &dyn InstanceConditionalTest {
        self.split_test.as_ref()
    }

    pub fn target_stats(&self) -> &S {
        &self.target_stats
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn set_child(&mut self, index: usize, child: Node<S>) {
        if index >= self.children.len() {
            self.children.resize_with(index + 1, || None);
        }
        self.children[index] = Some(child);
    }

    pub fn child(&self, index: usize) -> Option<&Node<S>> {
        self.children.get(index).and_then(Option::as_ref)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut Node<S>> {
        self.children.get_mut(index).and_then(Option::as_mut)
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> Option<&mut Option<Node<S>>> {
        self.children.get_mut(index)
    }

    /// Occupied child slots with their branch index.
    pub fn children(&self) -> impl Iterator<Item = (usize, &Node<S>)> {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|c| (i, c)))
    }

    pub fn n_children(&self) -> usize {
        self.children.len()
    }

    pub fn instance_child_index(&self, instance: &dyn Instance) -> Option<usize> {
        self.split_test.branch_for_instance(instance)
    }
}

impl<S: MemorySized + 'static> MemorySized for SplitNode<S> {
    fn extra_heap_size(&self, meter: &mut MemoryMeter) -> usize {
        meter.measure_field(&self.split_test)
            + meter.measure_field(&self.target_stats)
            + meter.measure_field(&self.children)
    }
}
