pub mod attribute_class_observers;
mod classifier;
pub mod conditional_tests;
pub mod hoeffding_tree;

pub use classifier::Classifier;
