use crate::classifiers::hoeffding_tree::nodes::found_node::{NodePath, Route};
use crate::classifiers::hoeffding_tree::nodes::learning_node::LearningNode;
use crate::classifiers::hoeffding_tree::nodes::split_node::SplitNode;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::utils::memory::{MemoryMeter, MemorySized};
use std::fmt::Write;

pub enum Node<S> {
    Split(SplitNode<S>),
    Learning(Box<dyn LearningNode<S>>),
}

/// Node kinds reachable from some node, itself included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeCounts {
    pub split: usize,
    pub active: usize,
    pub inactive: usize,
}

impl<S: 'static> Node<S> {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Learning(_))
    }

    pub fn depth(&self) -> usize {
        match self {
            Node::Split(split) => split.depth(),
            Node::Learning(leaf) => leaf.depth(),
        }
    }

    /// Height of the subtree rooted here; a leaf has height 0.
    pub fn subtree_depth(&self) -> usize {
        match self {
            Node::Learning(_) => 0,
            Node::Split(split) => {
                1 + split
                    .children()
                    .map(|(_, child)| child.subtree_depth())
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    pub fn as_learning(&self) -> Option<&dyn LearningNode<S>> {
        match self {
            Node::Learning(leaf) => Some(leaf.as_ref()),
            Node::Split(_) => None,
        }
    }

    pub fn as_learning_mut(&mut self) -> Option<&mut dyn LearningNode<S>> {
        match self {
            Node::Learning(leaf) => Some(leaf.as_mut()),
            Node::Split(_) => None,
        }
    }

    pub fn as_split(&self) -> Option<&SplitNode<S>> {
        match self {
            Node::Split(split) => Some(split),
            Node::Learning(_) => None,
        }
    }

    pub fn counts(&self) -> NodeCounts {
        match self {
            Node::Learning(leaf) if leaf.is_active() => NodeCounts {
                active: 1,
                ..NodeCounts::default()
            },
            Node::Learning(_) => NodeCounts {
                inactive: 1,
                ..NodeCounts::default()
            },
            Node::Split(split) => split.children().fold(
                NodeCounts {
                    split: 1,
                    ..NodeCounts::default()
                },
                |acc, (_, child)| {
                    let c = child.counts();
                    NodeCounts {
                        split: acc.split + c.split,
                        active: acc.active + c.active,
                        inactive: acc.inactive + c.inactive,
                    }
                },
            ),
        }
    }

    /// Descends from this node along the branches chosen by `instance`.
    pub fn route(&self, instance: &dyn Instance) -> Route {
        let mut path = NodePath::root();
        let mut node = self;
        loop {
            let split = match node {
                Node::Learning(_) => return Route::Leaf(path),
                Node::Split(split) => split,
            };
            let Some(branch) = split.instance_child_index(instance) else {
                return Route::Split(path);
            };
            match split.child(branch) {
                Some(child) => {
                    path = path.child(branch);
                    node = child;
                }
                None => return Route::Vacant { parent: path, branch },
            }
        }
    }

    pub fn at_path(&self, path: &[usize]) -> Option<&Node<S>> {
        let mut node = self;
        for &branch in path {
            node = node.as_split()?.child(branch)?;
        }
        Some(node)
    }

    pub fn at_path_mut(&mut self, path: &[usize]) -> Option<&mut Node<S>> {
        let mut node = self;
        for &branch in path {
            let current = node;
            node = match current {
                Node::Split(split) => split.child_mut(branch)?,
                Node::Learning(_) => return None,
            };
        }
        Some(node)
    }

    pub fn describe_subtree(
        &self,
        out: &mut String,
        indent: usize,
        header: Option<&InstanceHeader>,
    ) {
        match self {
            Node::Learning(leaf) => {
                let _ = writeln!(out, "{:indent$}{}", "", leaf.describe());
            }
            Node::Split(split) => {
                for (branch, child) in split.children() {
                    let condition = split
                        .split_test()
                        .describe_condition_for_branch(branch, header);
                    let _ = writeln!(out, "{:indent$}if {condition}:", "");
                    child.describe_subtree(out, indent + 2, header);
                }
            }
        }
    }
}

impl<S: MemorySized + 'static> MemorySized for Node<S> {
    fn extra_heap_size(&self, meter: &mut MemoryMeter) -> usize {
        match self {
            Node::Split(split) => meter.measure_field(split),
            Node::Learning(leaf) => meter.measure_field(leaf),
        }
    }
}
