use crate::classifiers::hoeffding_tree::nodes::learning_node::LearningNode;
use crate::classifiers::hoeffding_tree::nodes::node::Node;
use crate::classifiers::hoeffding_tree::nodes::split_node::SplitNode;
use std::fmt;

/// Branch indices leading from the root to a node. The empty path is the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn child(&self, branch: usize) -> Self {
        let mut branches = Vec::with_capacity(self.0.len() + 1);
        branches.extend_from_slice(&self.0);
        branches.push(branch);
        Self(branches)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of split nodes above the addressed node.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Branch taken from the parent, `None` for the root.
    pub fn branch(&self) -> Option<usize> {
        self.0.last().copied()
    }

    pub fn parent_and_branch(&self) -> Option<(&[usize], usize)> {
        let (last, parent) = self.0.split_last()?;
        Some((parent, *last))
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(branches: Vec<usize>) -> Self {
        Self(branches)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/")?;
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{b}")?;
        }
        Ok(())
    }
}

/// Where an instance lands when it descends the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// A learning node.
    Leaf(NodePath),
    /// A split node whose chosen branch has no child yet.
    Vacant { parent: NodePath, branch: usize },
    /// A split node whose test cannot decide for this instance.
    Split(NodePath),
}

/// A node found during traversal, together with its parent and the branch
/// that leads to it. Borrows the tree, so it cannot outlive the pass that
/// produced it.
pub struct FoundNode<'a, S> {
    node: &'a Node<S>,
    parent: Option<&'a SplitNode<S>>,
    path: NodePath,
}

impl<'a, S: 'static> FoundNode<'a, S> {
    pub fn new(node: &'a Node<S>, parent: Option<&'a SplitNode<S>>, path: NodePath) -> Self {
        Self { node, parent, path }
    }

    pub fn node(&self) -> &'a Node<S> {
        self.node
    }

    pub fn parent(&self) -> Option<&'a SplitNode<S>> {
        self.parent
    }

    pub fn parent_branch(&self) -> Option<usize> {
        self.path.branch()
    }

    pub fn path(&self) -> &NodePath {
        &self.path
    }

    pub fn into_path(self) -> NodePath {
        self.path
    }

    pub fn learning(&self) -> Option<&'a dyn LearningNode<S>> {
        self.node.as_learning()
    }

    /// Promise of the leaf, zero for anything that is not a learning node.
    pub fn promise(&self) -> f64 {
        self.learning().map_or(0.0, |leaf| leaf.calculate_promise())
    }
}
