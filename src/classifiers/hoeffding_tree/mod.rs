pub mod config;
pub mod decision_tree;
pub mod error;
pub mod hoeffding_bound;
#[allow(clippy::module_inception)]
pub mod hoeffding_tree;
pub mod instance_conditional_test;
pub mod measurements;
pub mod nodes;
pub mod split_criteria;
pub mod variant;

pub use config::{ClassifierConfig, TreeConfig};
pub use decision_tree::DecisionTree;
pub use error::{ConfigError, TreeError};
pub use hoeffding_bound::hoeffding_bound;
pub use hoeffding_tree::{ClassificationLeaves, HoeffdingTreeClassifier};
pub use measurements::ModelMeasurements;
pub use variant::TreeVariant;
