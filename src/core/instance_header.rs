use crate::core::attributes::{Attribute, AttributeRef};
use crate::utils::memory::{MemoryMeter, MemorySized};
use std::fmt;
use std::mem::size_of;

/// Schema shared by every instance of a stream.
pub struct InstanceHeader {
    relation_name: String,
    attributes: Vec<AttributeRef>,
    class_index: usize,
}

impl InstanceHeader {
    pub fn new(
        relation_name: impl Into<String>,
        attributes: Vec<AttributeRef>,
        class_index: usize,
    ) -> InstanceHeader {
        InstanceHeader {
            relation_name: relation_name.into(),
            attributes,
            class_index,
        }
    }

    pub fn number_of_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn relation_name(&self) -> &str {
        &self.relation_name
    }

    pub fn attribute_at_index(&self, index: usize) -> Option<&dyn Attribute> {
        self.attributes.get(index).map(|a| a.as_ref())
    }

    pub fn index_of_attribute(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name() == name)
    }

    pub fn class_index(&self) -> usize {
        self.class_index
    }

    pub fn number_of_classes(&self) -> usize {
        self.attribute_at_index(self.class_index)
            .and_then(|a| a.number_of_values())
            .unwrap_or(0)
    }
}

impl MemorySized for InstanceHeader {
    fn inline_size(&self) -> usize {
        size_of::<Self>()
    }

    fn extra_heap_size(&self, meter: &mut MemoryMeter) -> usize {
        meter.measure_field(&self.relation_name) + meter.measure_field(&self.attributes)
    }
}

impl fmt::Debug for InstanceHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceHeader")
            .field("relation_name", &self.relation_name)
            .field("class_index", &self.class_index)
            .field("n_attributes", &self.attributes.len())
            .finish()
    }
}
