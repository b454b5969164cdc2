use crate::core::attributes::Attribute;
use crate::utils::memory::{MemoryMeter, MemorySized};
use std::any::Any;
use std::collections::HashMap;
use std::mem::size_of;

#[derive(Clone, Debug)]
pub struct NominalAttribute {
    name: String,
    values: Vec<String>,
    label_to_index: HashMap<String, usize>,
}

impl NominalAttribute {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        let label_to_index = values
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i))
            .collect();
        Self {
            name: name.into(),
            values,
            label_to_index,
        }
    }

    pub fn index_of_value(&self, label: &str) -> Option<usize> {
        self.label_to_index.get(label).copied()
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl Attribute for NominalAttribute {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn is_nominal(&self) -> bool {
        true
    }

    fn number_of_values(&self) -> Option<usize> {
        Some(self.values.len())
    }

    fn value_label(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }
}

impl MemorySized for NominalAttribute {
    fn inline_size(&self) -> usize {
        size_of::<Self>()
    }

    fn extra_heap_size(&self, meter: &mut MemoryMeter) -> usize {
        let mut total = 0;
        total += meter.measure_field(&self.name);
        total += meter.measure_field(&self.values);
        total += meter.measure_field(&self.label_to_index);
        total
    }
}
