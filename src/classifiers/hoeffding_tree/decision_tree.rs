use crate::classifiers::hoeffding_tree::config::TreeConfig;
use crate::classifiers::hoeffding_tree::error::ConfigError;
use crate::classifiers::hoeffding_tree::instance_conditional_test::InstanceConditionalTest;
use crate::classifiers::hoeffding_tree::measurements::ModelMeasurements;
use crate::classifiers::hoeffding_tree::nodes::{
    FoundNode, LearningNode, Node, NodePath, Route, SplitNode,
};
use crate::classifiers::hoeffding_tree::variant::TreeVariant;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::utils::memory::{MemoryMeter, MemorySized};
use tracing::{debug, info, trace, warn};

/// Growth, memory and leaf lifecycle policy shared by every tree variant.
///
/// The engine owns the root and the node-kind counters. It periodically
/// measures how much an active and an inactive leaf cost, and when the tree
/// no longer fits in `max_size` it keeps only the most promising leaves
/// active.
pub struct DecisionTree<V: TreeVariant> {
    variant: V,
    config: TreeConfig,
    max_byte_size: f64,
    tree_root: Option<Node<V::Stats>>,
    n_decision_nodes: usize,
    n_active_leaves: usize,
    n_inactive_leaves: usize,
    active_leaf_size_estimate: f64,
    inactive_leaf_size_estimate: f64,
    size_estimate_overhead_fraction: f64,
    growth_allowed: bool,
    train_weight_seen_by_model: f64,
    instances_since_estimate: u64,
}

impl<V: TreeVariant> DecisionTree<V> {
    pub fn new(variant: V, config: TreeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            variant,
            max_byte_size: config.max_byte_size(),
            config,
            tree_root: None,
            n_decision_nodes: 0,
            n_active_leaves: 0,
            n_inactive_leaves: 0,
            active_leaf_size_estimate: 0.0,
            inactive_leaf_size_estimate: 0.0,
            size_estimate_overhead_fraction: 1.0,
            growth_allowed: true,
            train_weight_seen_by_model: 0.0,
            instances_since_estimate: 0,
        })
    }

    /// Changes the memory ceiling, in megabytes.
    pub fn set_max_size(&mut self, max_size: f64) -> Result<(), ConfigError> {
        let config = TreeConfig {
            max_size,
            ..self.config.clone()
        };
        config.validate()?;
        self.max_byte_size = config.max_byte_size();
        self.config = config;
        Ok(())
    }

    pub fn variant(&self) -> &V {
        &self.variant
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn root(&self) -> Option<&Node<V::Stats>> {
        self.tree_root.as_ref()
    }

    pub fn max_byte_size(&self) -> f64 {
        self.max_byte_size
    }

    pub fn n_decision_nodes(&self) -> usize {
        self.n_decision_nodes
    }

    pub fn n_active_leaves(&self) -> usize {
        self.n_active_leaves
    }

    pub fn n_inactive_leaves(&self) -> usize {
        self.n_inactive_leaves
    }

    pub fn active_leaf_size_estimate(&self) -> f64 {
        self.active_leaf_size_estimate
    }

    pub fn inactive_leaf_size_estimate(&self) -> f64 {
        self.inactive_leaf_size_estimate
    }

    pub fn size_estimate_overhead_fraction(&self) -> f64 {
        self.size_estimate_overhead_fraction
    }

    /// False once memory management has frozen the tree.
    pub fn growth_allowed(&self) -> bool {
        self.growth_allowed
    }

    pub fn train_weight_seen_by_model(&self) -> f64 {
        self.train_weight_seen_by_model
    }

    pub fn depth(&self) -> usize {
        self.tree_root.as_ref().map_or(0, Node::subtree_depth)
    }

    pub fn model_measurements(&self) -> ModelMeasurements {
        ModelMeasurements {
            tree_size_nodes: self.n_decision_nodes + self.n_active_leaves + self.n_inactive_leaves,
            tree_size_leaves: self.n_active_leaves + self.n_inactive_leaves,
            active_learning_nodes: self.n_active_leaves,
            tree_depth: self.depth(),
            active_leaf_byte_size_estimate: self.active_leaf_size_estimate,
            inactive_leaf_byte_size_estimate: self.inactive_leaf_size_estimate,
            byte_size_estimate_overhead: self.size_estimate_overhead_fraction,
        }
    }

    pub fn get_model_description(&self) -> Option<String> {
        self.describe_with(None)
    }

    /// Model description using attribute names and labels from `header`.
    pub fn describe_with(&self, header: Option<&InstanceHeader>) -> Option<String> {
        let root = self.tree_root.as_ref()?;
        let mut out = String::new();
        root.describe_subtree(&mut out, 0, header);
        Some(out)
    }

    pub fn new_split_node(
        &self,
        split_test: Box<dyn InstanceConditionalTest>,
        target_stats: V::Stats,
        depth: usize,
    ) -> SplitNode<V::Stats> {
        SplitNode::new(split_test, target_stats, depth)
    }

    pub fn new_learning_node(
        &self,
        initial_stats: Option<V::Stats>,
        parent: Option<&Node<V::Stats>>,
        is_active: bool,
    ) -> Box<dyn LearningNode<V::Stats>> {
        self.variant
            .new_learning_node(initial_stats, parent, is_active)
    }

    /// Creates the first leaf. Returns false when the tree already has a root.
    pub fn ensure_root(&mut self) -> bool {
        if self.tree_root.is_some() {
            return false;
        }
        let leaf = self.new_learning_node(None, None, true);
        self.count_new_leaf(leaf.as_ref());
        self.tree_root = Some(Node::Learning(leaf));
        true
    }

    pub fn route(&self, instance: &dyn Instance) -> Option<Route> {
        self.tree_root.as_ref().map(|root| root.route(instance))
    }

    pub fn node_at(&self, path: &NodePath) -> Option<&Node<V::Stats>> {
        self.tree_root.as_ref()?.at_path(path.as_slice())
    }

    fn node_at_mut(&mut self, path: &NodePath) -> Option<&mut Node<V::Stats>> {
        self.tree_root.as_mut()?.at_path_mut(path.as_slice())
    }

    pub fn leaf_mut(&mut self, path: &NodePath) -> Option<&mut dyn LearningNode<V::Stats>> {
        self.node_at_mut(path)?.as_learning_mut()
    }

    /// Fills the empty `branch` of the split node at `parent` with a fresh
    /// active leaf and returns its path.
    pub fn attach_leaf(&mut self, parent: &NodePath, branch: usize) -> Option<NodePath> {
        let leaf = {
            let parent_node = self.node_at(parent)?;
            let Some(split) = parent_node.as_split() else {
                warn!(path = %parent, "cannot attach a leaf below a learning node");
                return None;
            };
            if split.child(branch).is_some() {
                return None;
            }
            self.new_learning_node(None, Some(parent_node), true)
        };

        self.count_new_leaf(leaf.as_ref());
        match self.node_at_mut(parent) {
            Some(Node::Split(split)) => split.set_child(branch, Node::Learning(leaf)),
            _ => return None,
        }
        let path = parent.child(branch);
        trace!(path = %path, "attached leaf to vacant branch");
        Some(path)
    }

    fn count_new_leaf(&mut self, leaf: &dyn LearningNode<V::Stats>) {
        if leaf.is_active() {
            self.n_active_leaves += 1;
        } else {
            self.n_inactive_leaves += 1;
        }
    }

    /// Every learning node reachable from the root, in depth-first order.
    pub fn find_learning_nodes(&self) -> Vec<FoundNode<'_, V::Stats>> {
        let mut found = Vec::new();
        if let Some(root) = &self.tree_root {
            Self::find_learning_nodes_rec(root, None, NodePath::root(), &mut found);
        }
        found
    }

    fn find_learning_nodes_rec<'a>(
        node: &'a Node<V::Stats>,
        parent: Option<&'a SplitNode<V::Stats>>,
        path: NodePath,
        found: &mut Vec<FoundNode<'a, V::Stats>>,
    ) {
        match node {
            Node::Learning(_) => found.push(FoundNode::new(node, parent, path)),
            Node::Split(split) => {
                for (branch, child) in split.children() {
                    Self::find_learning_nodes_rec(child, Some(split), path.child(branch), found);
                }
            }
        }
    }

    /// Replaces the active leaf at `path` with an inactive one holding the
    /// same statistics.
    pub fn deactivate_leaf(&mut self, path: &NodePath) -> bool {
        let replacement = {
            let Some((node, leaf)) = self.leaf_at(path) else {
                return false;
            };
            if !leaf.is_active() {
                return false;
            }
            self.replacement_leaf(node, leaf, false)
        };

        if !self.splice(path, Node::Learning(replacement)) {
            return false;
        }
        self.n_active_leaves = self.n_active_leaves.saturating_sub(1);
        self.n_inactive_leaves += 1;
        trace!(path = %path, "deactivated leaf");
        true
    }

    /// Replaces the inactive leaf at `path` with an active one. Refused when
    /// the leaf sits at or below `max_depth`.
    pub fn activate_leaf(&mut self, path: &NodePath) -> bool {
        let replacement = {
            let Some((node, leaf)) = self.leaf_at(path) else {
                return false;
            };
            if leaf.is_active() {
                return false;
            }
            if !self.config.depth_allows(leaf.depth()) {
                trace!(path = %path, depth = leaf.depth(), "reactivation refused at max depth");
                return false;
            }
            self.replacement_leaf(node, leaf, true)
        };

        if !self.splice(path, Node::Learning(replacement)) {
            return false;
        }
        self.n_inactive_leaves = self.n_inactive_leaves.saturating_sub(1);
        self.n_active_leaves += 1;
        trace!(path = %path, "activated leaf");
        true
    }

    pub fn deactivate_all_leaves(&mut self) -> usize {
        let active: Vec<NodePath> = self
            .find_learning_nodes()
            .into_iter()
            .filter(|found| found.learning().is_some_and(|leaf| leaf.is_active()))
            .map(FoundNode::into_path)
            .collect();
        active
            .iter()
            .filter(|path| self.deactivate_leaf(path))
            .count()
    }

    /// Turns the active leaf at `path` into a split node with one fresh
    /// active child per entry of `children_stats`.
    pub fn split_leaf(
        &mut self,
        path: &NodePath,
        split_test: Box<dyn InstanceConditionalTest>,
        children_stats: Vec<V::Stats>,
    ) -> bool {
        let split = {
            let Some((_, leaf)) = self.leaf_at(path) else {
                return false;
            };
            if !leaf.is_active() || !self.config.depth_allows(leaf.depth()) {
                return false;
            }
            let mut split = Node::Split(self.new_split_node(
                split_test,
                leaf.stats().clone(),
                leaf.depth(),
            ));
            for (branch, stats) in children_stats.into_iter().enumerate() {
                let child = self.new_learning_node(Some(stats), Some(&split), true);
                if let Node::Split(node) = &mut split {
                    node.set_child(branch, Node::Learning(child));
                }
            }
            split
        };

        let counts = split.counts();
        if !self.splice(path, split) {
            return false;
        }
        self.n_active_leaves = self.n_active_leaves.saturating_sub(1) + counts.active;
        self.n_inactive_leaves += counts.inactive;
        self.n_decision_nodes += counts.split;
        trace!(path = %path, children = counts.active + counts.inactive, "split leaf");
        true
    }

    fn leaf_at(
        &self,
        path: &NodePath,
    ) -> Option<(&Node<V::Stats>, &dyn LearningNode<V::Stats>)> {
        let Some(node) = self.node_at(path) else {
            warn!(path = %path, "no node at path");
            return None;
        };
        let Some(leaf) = node.as_learning() else {
            warn!(path = %path, "expected a learning node, found a split node");
            return None;
        };
        Some((node, leaf))
    }

    fn replacement_leaf(
        &self,
        node: &Node<V::Stats>,
        leaf: &dyn LearningNode<V::Stats>,
        is_active: bool,
    ) -> Box<dyn LearningNode<V::Stats>> {
        let mut replacement =
            self.new_learning_node(Some(leaf.stats().clone()), Some(node), is_active);
        replacement.set_depth(replacement.depth().saturating_sub(1));
        replacement
    }

    fn splice(&mut self, path: &NodePath, node: Node<V::Stats>) -> bool {
        let slot = match path.parent_and_branch() {
            None => &mut self.tree_root,
            Some((parent, branch)) => {
                match self
                    .tree_root
                    .as_mut()
                    .and_then(|root| root.at_path_mut(parent))
                {
                    Some(Node::Split(split)) => match split.slot_mut(branch) {
                        Some(slot) => slot,
                        None => return false,
                    },
                    _ => return false,
                }
            }
        };
        *slot = Some(node);
        true
    }

    fn linear_size_estimate(&self, n_active: usize, n_inactive: usize) -> f64 {
        (n_active as f64 * self.active_leaf_size_estimate
            + n_inactive as f64 * self.inactive_leaf_size_estimate)
            * self.size_estimate_overhead_fraction
    }

    /// Largest number of active leaves, out of `n_leaves`, whose projected
    /// size stays within the budget. Scans upward from zero and stops at the
    /// first count that overflows.
    pub fn greedy_max_active(&self, n_leaves: usize) -> usize {
        let mut max_active = 0;
        while max_active < n_leaves {
            max_active += 1;
            if self.linear_size_estimate(max_active, n_leaves - max_active) > self.max_byte_size {
                max_active -= 1;
                break;
            }
        }
        max_active
    }

    /// Keeps the most promising leaves active and deactivates the rest so the
    /// projected size fits the budget. With `stop_mem_management` the tree
    /// simply stops growing instead, once the limit is reached or some leaf
    /// is already inactive.
    pub fn enforce_size_limit(&mut self) {
        let tree_size = self.linear_size_estimate(self.n_active_leaves, self.n_inactive_leaves);
        let over_limit = self.n_inactive_leaves > 0 || tree_size > self.max_byte_size;
        if over_limit && self.config.stop_mem_management {
            if self.growth_allowed {
                info!(
                    tree_size,
                    max_byte_size = self.max_byte_size,
                    "memory limit reached, tree growth disabled"
                );
            }
            self.growth_allowed = false;
            return;
        }

        let (to_deactivate, to_activate, max_active) = {
            let mut learning_nodes = self.find_learning_nodes();
            learning_nodes.sort_by(|a, b| a.promise().total_cmp(&b.promise()));
            let max_active = self.greedy_max_active(learning_nodes.len());
            let cutoff = learning_nodes.len() - max_active;

            let mut to_deactivate = Vec::new();
            let mut to_activate = Vec::new();
            for (rank, found) in learning_nodes.into_iter().enumerate() {
                let Some(leaf) = found.learning() else {
                    warn!(path = %found.path(), "skipping non-leaf during enforcement");
                    continue;
                };
                if rank < cutoff {
                    if leaf.is_active() {
                        to_deactivate.push(found.into_path());
                    }
                } else if !leaf.is_active() {
                    to_activate.push(found.into_path());
                }
            }
            (to_deactivate, to_activate, max_active)
        };

        let deactivated = to_deactivate
            .iter()
            .filter(|path| self.deactivate_leaf(path))
            .count();
        let activated = to_activate
            .iter()
            .filter(|path| self.activate_leaf(path))
            .count();

        debug!(
            tree_size,
            max_active,
            deactivated,
            activated,
            active = self.n_active_leaves,
            inactive = self.n_inactive_leaves,
            "enforced size limit"
        );
    }

    /// Re-measures average active and inactive leaf sizes and the overhead of
    /// everything else, then enforces the limit if the tree is too large.
    pub fn estimate_model_size(&mut self) {
        let (total_active_size, total_inactive_size) = {
            let mut active = 0usize;
            let mut inactive = 0usize;
            for found in self.find_learning_nodes() {
                let Some(leaf) = found.learning() else {
                    warn!(path = %found.path(), "skipping non-leaf during size estimation");
                    continue;
                };
                let size = MemoryMeter::measure_root(leaf);
                if leaf.is_active() {
                    active += size;
                } else {
                    inactive += size;
                }
            }
            (active, inactive)
        };

        if total_active_size > 0 && self.n_active_leaves > 0 {
            self.active_leaf_size_estimate =
                total_active_size as f64 / self.n_active_leaves as f64;
        }
        if total_inactive_size > 0 && self.n_inactive_leaves > 0 {
            self.inactive_leaf_size_estimate =
                total_inactive_size as f64 / self.n_inactive_leaves as f64;
        }

        let actual_model_size = MemoryMeter::measure_root(self) as f64;
        let estimated_model_size = self.n_active_leaves as f64 * self.active_leaf_size_estimate
            + self.n_inactive_leaves as f64 * self.inactive_leaf_size_estimate;
        if estimated_model_size > 0.0 {
            self.size_estimate_overhead_fraction = actual_model_size / estimated_model_size;
        }

        debug!(
            actual_model_size,
            active_leaf_size = self.active_leaf_size_estimate,
            inactive_leaf_size = self.inactive_leaf_size_estimate,
            overhead = self.size_estimate_overhead_fraction,
            "estimated model size"
        );

        if actual_model_size > self.max_byte_size {
            self.enforce_size_limit();
        }
    }

    /// Records one absorbed instance and runs the size estimate every
    /// `memory_estimate_period` instances.
    pub fn register_instance(&mut self, weight: f64) {
        self.train_weight_seen_by_model += weight;
        self.instances_since_estimate += 1;
        if self.instances_since_estimate >= self.config.memory_estimate_period {
            self.instances_since_estimate = 0;
            self.estimate_model_size();
        }
    }
}

impl<V: TreeVariant> MemorySized for DecisionTree<V> {
    fn extra_heap_size(&self, meter: &mut MemoryMeter) -> usize {
        meter.measure_field(&self.variant) + meter.measure_field(&self.tree_root)
    }
}
