use crate::core::instances::Instance;
use crate::utils::memory::MemorySized;
use std::any::Any;

/// A leaf. Active leaves keep learning and may be split; inactive leaves hold
/// a frozen copy of the statistics they had when deactivated.
pub trait LearningNode<S>: Any + MemorySized {
    fn stats(&self) -> &S;

    fn depth(&self) -> usize;

    fn set_depth(&mut self, depth: usize);

    fn is_active(&self) -> bool;

    /// How much this leaf stands to gain from further splitting. Leaves with
    /// the lowest promise are the first to be deactivated.
    fn calculate_promise(&self) -> f64;

    fn learn_from_instance(&mut self, instance: &dyn Instance);

    fn describe(&self) -> String;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
