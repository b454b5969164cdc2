pub mod found_node;
pub mod learning_node;
pub mod learning_nodes;
pub mod node;
pub mod split_node;

pub use found_node::{FoundNode, NodePath, Route};
pub use learning_node::LearningNode;
pub use learning_nodes::{ActiveLearningNode, InactiveLearningNode};
pub use node::{Node, NodeCounts};
pub use split_node::SplitNode;
