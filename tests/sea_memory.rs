use arbor::classifiers::Classifier;
use arbor::classifiers::hoeffding_tree::{ClassifierConfig, HoeffdingTreeClassifier, TreeConfig};
use arbor::classifiers::hoeffding_tree::nodes::Node;
use arbor::evaluation::BasicClassificationEvaluator;
use arbor::streams::{SeaGenerator, SeaParameters, Stream};

fn prequential(config: ClassifierConfig, n: usize) -> (HoeffdingTreeClassifier, f64) {
    let mut learner = HoeffdingTreeClassifier::new(config).unwrap();
    let mut stream = SeaGenerator::new(SeaParameters::default()).unwrap();
    learner.set_model_context(stream.header());

    let mut evaluator = BasicClassificationEvaluator::new();
    for _ in 0..n {
        let instance = stream.next_instance().unwrap();
        let votes = learner.get_votes_for_instance(instance.as_ref());
        evaluator.add_result(instance.as_ref(), &votes);
        learner.train_on_instance(instance.as_ref()).unwrap();
    }
    (learner, evaluator.accuracy())
}

fn assert_consistent(learner: &HoeffdingTreeClassifier) {
    let tree = learner.tree();
    let counts = tree.root().map(Node::counts).unwrap_or_default();
    assert_eq!(counts.split, tree.n_decision_nodes());
    assert_eq!(counts.active, tree.n_active_leaves());
    assert_eq!(counts.inactive, tree.n_inactive_leaves());
    for found in tree.find_learning_nodes() {
        assert_eq!(found.learning().unwrap().depth(), found.path().len());
    }
}

#[test]
fn learns_the_sea_concept() {
    let (learner, accuracy) = prequential(ClassifierConfig::default(), 50_000);
    assert!(accuracy > 0.72, "accuracy {accuracy}");
    assert!(learner.tree().n_decision_nodes() > 0);
    assert_consistent(&learner);
}

#[test]
fn budget_below_one_leaf_freezes_the_root() {
    let config = ClassifierConfig {
        tree: TreeConfig {
            max_size: 1e-4,
            memory_estimate_period: 100,
            ..TreeConfig::default()
        },
        ..ClassifierConfig::default()
    };
    let (learner, _) = prequential(config, 2_000);

    let m = learner.model_measurements().unwrap();
    assert_eq!(m.tree_size_leaves, 1);
    assert_eq!(m.active_learning_nodes, 0);
    assert!(learner.tree().growth_allowed());
    let frozen: f64 = learner
        .tree()
        .root()
        .and_then(Node::as_learning)
        .map(|leaf| leaf.stats().iter().sum())
        .unwrap();
    assert_eq!(frozen, 100.0);
    assert_consistent(&learner);
}

#[test]
fn stop_mem_management_keeps_the_root_active() {
    let config = ClassifierConfig {
        tree: TreeConfig {
            max_size: 1e-4,
            memory_estimate_period: 100,
            stop_mem_management: true,
            ..TreeConfig::default()
        },
        ..ClassifierConfig::default()
    };
    let (learner, _) = prequential(config, 2_000);

    assert!(!learner.tree().growth_allowed());
    let m = learner.model_measurements().unwrap();
    assert_eq!(m.tree_size_nodes, 1);
    assert_eq!(m.active_learning_nodes, 1);
    assert_consistent(&learner);
}

#[test]
fn moderate_budget_stays_consistent() {
    let config = ClassifierConfig {
        tree: TreeConfig {
            max_size: 0.02,
            memory_estimate_period: 1_000,
            ..TreeConfig::default()
        },
        grace_period: 100,
        ..ClassifierConfig::default()
    };
    let (learner, accuracy) = prequential(config, 30_000);
    assert!(accuracy > 0.6, "accuracy {accuracy}");
    assert_consistent(&learner);

    let m = learner.model_measurements().unwrap();
    assert!(m.active_leaf_byte_size_estimate > 0.0);
    assert!(m.byte_size_estimate_overhead > 0.0);
}
