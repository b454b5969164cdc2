use crate::classifiers::Classifier;
use crate::classifiers::conditional_tests::attribute_split_suggestion::AttributeSplitSuggestion;
use crate::classifiers::hoeffding_tree::config::ClassifierConfig;
use crate::classifiers::hoeffding_tree::decision_tree::DecisionTree;
use crate::classifiers::hoeffding_tree::error::TreeError;
use crate::classifiers::hoeffding_tree::hoeffding_bound::hoeffding_bound;
use crate::classifiers::hoeffding_tree::measurements::ModelMeasurements;
use crate::classifiers::hoeffding_tree::nodes::{
    ActiveLearningNode, InactiveLearningNode, LearningNode, Node, NodePath, Route,
};
use crate::classifiers::hoeffding_tree::split_criteria::SplitCriterion;
use crate::classifiers::hoeffding_tree::variant::TreeVariant;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::utils::memory::{MemoryMeter, MemorySized};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, trace};

/// Leaves that keep a class distribution as their statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassificationLeaves;

impl TreeVariant for ClassificationLeaves {
    type Stats = Vec<f64>;

    fn new_learning_node(
        &self,
        initial_stats: Option<Vec<f64>>,
        parent: Option<&Node<Vec<f64>>>,
        is_active: bool,
    ) -> Box<dyn LearningNode<Vec<f64>>> {
        let distribution = initial_stats.unwrap_or_default();
        let depth = parent.map_or(0, |p| p.depth() + 1);
        if is_active {
            Box::new(ActiveLearningNode::new(distribution, depth))
        } else {
            Box::new(InactiveLearningNode::new(distribution, depth))
        }
    }
}

impl MemorySized for ClassificationLeaves {}

/// Hoeffding tree classifier (VFDT) on top of the memory-bounded engine.
pub struct HoeffdingTreeClassifier {
    tree: DecisionTree<ClassificationLeaves>,
    config: ClassifierConfig,
    split_criterion: Box<dyn SplitCriterion>,
    header: Option<Arc<InstanceHeader>>,
}

impl HoeffdingTreeClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self, TreeError> {
        config.validate()?;
        let tree = DecisionTree::new(ClassificationLeaves, config.tree.clone())?;
        Ok(Self {
            tree,
            split_criterion: config.split_criterion.build(),
            config,
            header: None,
        })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn tree(&self) -> &DecisionTree<ClassificationLeaves> {
        &self.tree
    }

    fn learn(&mut self, instance: &dyn Instance) -> Result<(), TreeError> {
        self.tree.ensure_root();
        let path = match self.tree.route(instance) {
            Some(Route::Leaf(path)) => path,
            Some(Route::Vacant { parent, branch }) => {
                match self.tree.attach_leaf(&parent, branch) {
                    Some(path) => path,
                    None => return Ok(()),
                }
            }
            Some(Route::Split(path)) => {
                trace!(path = %path, "instance stopped at a split node");
                return Ok(());
            }
            None => return Ok(()),
        };

        let growth_allowed = self.tree.growth_allowed();
        let Some(leaf) = self.tree.leaf_mut(&path) else {
            return Ok(());
        };
        leaf.learn_from_instance(instance);
        if !growth_allowed || !leaf.is_active() {
            return Ok(());
        }
        if !self.config.tree.depth_allows(leaf.depth()) {
            self.tree.deactivate_leaf(&path);
            return Ok(());
        }

        let Some(active) = leaf.as_any().downcast_ref::<ActiveLearningNode>() else {
            return Ok(());
        };
        let since_last_evaluation =
            active.weight_seen() - active.weight_seen_at_last_split_evaluation();
        if since_last_evaluation >= self.config.grace_period as f64 {
            self.attempt_to_split(&path)?;
        }
        Ok(())
    }

    fn attempt_to_split(&mut self, path: &NodePath) -> Result<(), TreeError> {
        let (mut suggestions, pre_split_dist, weight_seen) = {
            let Some(active) = self
                .tree
                .leaf_mut(path)
                .and_then(|leaf| leaf.as_any_mut().downcast_mut::<ActiveLearningNode>())
            else {
                return Ok(());
            };
            let weight_seen = active.weight_seen();
            active.set_weight_seen_at_last_split_evaluation(weight_seen);
            if active.observed_class_distribution_is_pure() {
                return Ok(());
            }
            let suggestions = active.get_best_split_suggestions(
                self.split_criterion.as_ref(),
                self.config.tree.binary_split,
                self.config.tree.merit_preprune,
            );
            (suggestions, active.stats().clone(), weight_seen)
        };

        suggestions.sort_by(|a, b| a.merit().total_cmp(&b.merit()));

        let should_split = match suggestions.as_slice() {
            [] => false,
            [_] => true,
            [.., second, best] => {
                let epsilon = hoeffding_bound(
                    self.split_criterion.get_range_of_merit(&pre_split_dist),
                    self.config.split_confidence,
                    weight_seen,
                )?;
                let decided = best.merit() - second.merit() > epsilon
                    || epsilon < self.config.tie_threshold;
                if self.config.tree.remove_poor_atts {
                    self.remove_poor_attributes(path, &suggestions, epsilon);
                }
                decided
            }
        };
        if !should_split {
            return Ok(());
        }

        let Some(decision) = suggestions.pop() else {
            return Ok(());
        };
        match decision.split_test {
            None => {
                trace!(path = %path, "not splitting wins, deactivating leaf");
                self.tree.deactivate_leaf(path);
            }
            Some(split_test) => {
                trace!(path = %path, merit = decision.merit, "splitting leaf");
                self.tree
                    .split_leaf(path, split_test, decision.resulting_class_distributions);
            }
        }
        self.tree.enforce_size_limit();
        Ok(())
    }

    /// Stops observing attributes whose best split trails the winner by
    /// more than `epsilon`.
    fn remove_poor_attributes(
        &mut self,
        path: &NodePath,
        suggestions: &[AttributeSplitSuggestion],
        epsilon: f64,
    ) {
        let Some(best_merit) = suggestions.last().map(AttributeSplitSuggestion::merit) else {
            return;
        };
        let single_attribute = |s: &AttributeSplitSuggestion| -> Option<usize> {
            match s.split_test()?.get_atts_test_depends_on().as_slice() {
                [att] => Some(*att),
                _ => None,
            }
        };

        let mut poor_atts: HashSet<usize> = suggestions
            .iter()
            .filter(|s| best_merit - s.merit() > epsilon)
            .filter_map(single_attribute)
            .collect();
        for s in suggestions.iter().filter(|s| best_merit - s.merit() < epsilon) {
            if let Some(att) = single_attribute(s) {
                poor_atts.remove(&att);
            }
        }
        if poor_atts.is_empty() {
            return;
        }

        let Some(active) = self
            .tree
            .leaf_mut(path)
            .and_then(|leaf| leaf.as_any_mut().downcast_mut::<ActiveLearningNode>())
        else {
            return;
        };
        debug!(path = %path, ?poor_atts, "disabling poor attributes");
        for att in poor_atts {
            active.disable_attribute(att);
        }
    }
}

impl Classifier for HoeffdingTreeClassifier {
    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Vec<f64> {
        let n_classes = self
            .header
            .as_ref()
            .map_or_else(|| instance.number_of_classes(), |h| h.number_of_classes());

        let mut votes = match self.tree.route(instance) {
            None => Vec::new(),
            Some(Route::Leaf(path)) => self
                .tree
                .node_at(&path)
                .and_then(Node::as_learning)
                .map(|leaf| leaf.stats().clone())
                .unwrap_or_default(),
            Some(Route::Vacant { parent, .. } | Route::Split(parent)) => self
                .tree
                .node_at(&parent)
                .and_then(Node::as_split)
                .map(|split| split.target_stats().clone())
                .unwrap_or_default(),
        };
        if votes.len() < n_classes {
            votes.resize(n_classes, 0.0);
        }
        votes
    }

    fn set_model_context(&mut self, header: Arc<InstanceHeader>) {
        self.header = Some(header);
    }

    fn train_on_instance(&mut self, instance: &dyn Instance) -> Result<(), TreeError> {
        if instance.class_value().is_none() {
            return Ok(());
        }
        self.learn(instance)?;
        self.tree.register_instance(instance.weight());
        Ok(())
    }

    fn calc_memory_size(&self) -> usize {
        MemoryMeter::measure_root(self)
    }

    fn model_measurements(&self) -> Option<ModelMeasurements> {
        Some(self.tree.model_measurements())
    }

    fn get_model_description(&self) -> Option<String> {
        self.tree.describe_with(self.header.as_deref())
    }
}

impl MemorySized for HoeffdingTreeClassifier {
    fn extra_heap_size(&self, meter: &mut MemoryMeter) -> usize {
        meter.measure_field(&self.tree)
            + meter.measure_field(&self.split_criterion)
            + meter.measure_field(&self.header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::hoeffding_tree::config::TreeConfig;
    use crate::core::attributes::{AttributeRef, NominalAttribute};
    use crate::core::instances::DenseInstance;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn header() -> Arc<InstanceHeader> {
        let atts: Vec<AttributeRef> = vec![
            Arc::new(NominalAttribute::new("signal", labels(&["off", "on"]))),
            Arc::new(NominalAttribute::new("noise", labels(&["low", "high"]))),
            Arc::new(NominalAttribute::new("class", labels(&["neg", "pos"]))),
        ];
        Arc::new(InstanceHeader::new("toy", atts, 2))
    }

    /// `signal` decides the class; `noise` cycles independently of it.
    fn instance(header: &Arc<InstanceHeader>, i: usize) -> DenseInstance {
        let signal = (i % 2) as f64;
        let noise = ((i / 2) % 2) as f64;
        DenseInstance::new(header.clone(), vec![signal, noise, signal], 1.0)
    }

    fn classifier(config: ClassifierConfig) -> HoeffdingTreeClassifier {
        let mut c = HoeffdingTreeClassifier::new(config).unwrap();
        c.set_model_context(header());
        c
    }

    fn small_grace() -> ClassifierConfig {
        ClassifierConfig {
            grace_period: 50,
            ..ClassifierConfig::default()
        }
    }

    #[test]
    fn rejects_invalid_config() {
        let config = ClassifierConfig {
            split_confidence: 0.0,
            ..ClassifierConfig::default()
        };
        assert!(matches!(
            HoeffdingTreeClassifier::new(config),
            Err(TreeError::Config(_))
        ));
    }

    #[test]
    fn empty_model_votes_zero_for_every_class() {
        let c = classifier(ClassifierConfig::default());
        let h = header();
        assert_eq!(c.get_votes_for_instance(&instance(&h, 0)), vec![0.0, 0.0]);
        assert!(c.get_model_description().is_none());
    }

    #[test]
    fn splits_on_the_informative_attribute() {
        let mut c = classifier(small_grace());
        let h = header();
        for i in 0..200 {
            c.train_on_instance(&instance(&h, i)).unwrap();
        }

        let m = c.model_measurements().unwrap();
        assert_eq!(m.tree_size_nodes, 3);
        assert_eq!(m.active_learning_nodes, 2);
        assert_eq!(m.tree_depth, 1);

        let split = c.tree().root().and_then(Node::as_split).unwrap();
        assert_eq!(split.split_test().get_atts_test_depends_on(), vec![0]);

        let on = c.get_votes_for_instance(&instance(&h, 1));
        let off = c.get_votes_for_instance(&instance(&h, 0));
        assert!(on[1] > on[0]);
        assert!(off[0] > off[1]);

        let text = c.get_model_description().unwrap();
        assert!(text.contains("if signal = on:"));
    }

    #[test]
    fn pure_leaf_never_splits() {
        let mut c = classifier(small_grace());
        let h = header();
        for _ in 0..300 {
            c.train_on_instance(&instance(&h, 0)).unwrap();
        }
        assert!(c.tree().root().is_some_and(Node::is_leaf));
        assert_eq!(c.tree().train_weight_seen_by_model(), 300.0);
    }

    #[test]
    fn unlabeled_instances_are_ignored() {
        let mut c = classifier(small_grace());
        let h = header();
        let unlabeled = DenseInstance::new(h, vec![1.0, 0.0, f64::NAN], 1.0);
        c.train_on_instance(&unlabeled).unwrap();
        assert!(c.tree().root().is_none());
        assert_eq!(c.tree().train_weight_seen_by_model(), 0.0);
    }

    #[test]
    fn leaf_at_max_depth_is_deactivated() {
        let config = ClassifierConfig {
            tree: TreeConfig {
                max_depth: Some(0),
                ..TreeConfig::default()
            },
            ..small_grace()
        };
        let mut c = classifier(config);
        let h = header();
        for i in 0..10 {
            c.train_on_instance(&instance(&h, i)).unwrap();
        }
        assert_eq!(c.tree().n_active_leaves(), 0);
        assert_eq!(c.tree().n_inactive_leaves(), 1);
        assert_eq!(c.get_votes_for_instance(&instance(&h, 0)), vec![1.0, 0.0]);
    }

    #[test]
    fn tiny_budget_with_stop_mem_management_freezes_growth() {
        let config = ClassifierConfig {
            tree: TreeConfig {
                max_size: 1e-6,
                memory_estimate_period: 10,
                stop_mem_management: true,
                ..TreeConfig::default()
            },
            ..small_grace()
        };
        let mut c = classifier(config);
        let h = header();
        for i in 0..200 {
            c.train_on_instance(&instance(&h, i)).unwrap();
        }
        assert!(!c.tree().growth_allowed());
        assert!(c.tree().root().is_some_and(Node::is_leaf));
        assert_eq!(c.tree().n_active_leaves(), 1);
    }

    #[test]
    fn memory_size_grows_with_training() {
        let mut c = classifier(small_grace());
        let before = c.calc_memory_size();
        let h = header();
        for i in 0..20 {
            c.train_on_instance(&instance(&h, i)).unwrap();
        }
        assert!(c.calc_memory_size() > before);
    }
}
