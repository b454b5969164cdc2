use crate::utils::memory::MemorySized;
use std::any::Any;
use std::sync::Arc;

pub type AttributeRef = Arc<dyn Attribute>;

pub trait Attribute: Any + Send + Sync + MemorySized {
    fn name(&self) -> &str;

    fn as_any(&self) -> &dyn Any;

    fn is_nominal(&self) -> bool {
        false
    }

    /// Number of distinct labels for nominal attributes.
    fn number_of_values(&self) -> Option<usize> {
        None
    }

    fn value_label(&self, _index: usize) -> Option<&str> {
        None
    }
}
