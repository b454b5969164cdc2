use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct DenseInstance {
    header: Arc<InstanceHeader>,
    values: Vec<f64>,
    weight: f64,
}

impl DenseInstance {
    pub fn new(header: Arc<InstanceHeader>, values: Vec<f64>, weight: f64) -> Self {
        Self {
            header,
            values,
            weight,
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl Instance for DenseInstance {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn value_at_index(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    fn header(&self) -> &InstanceHeader {
        &self.header
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attributes::{AttributeRef, NominalAttribute, NumericAttribute};

    fn header() -> Arc<InstanceHeader> {
        let atts: Vec<AttributeRef> = vec![
            Arc::new(NumericAttribute::new("x")),
            Arc::new(NominalAttribute::new(
                "class",
                vec!["a".to_string(), "b".to_string()],
            )),
        ];
        Arc::new(InstanceHeader::new("rel", atts, 1))
    }

    #[test]
    fn exposes_class_value_and_weight() {
        let inst = DenseInstance::new(header(), vec![0.5, 1.0], 2.0);
        assert_eq!(inst.class_value(), Some(1.0));
        assert_eq!(inst.weight(), 2.0);
        assert_eq!(inst.number_of_classes(), 2);
    }

    #[test]
    fn nan_is_missing() {
        let inst = DenseInstance::new(header(), vec![f64::NAN, f64::NAN], 1.0);
        assert!(inst.is_missing_at_index(0));
        assert!(inst.is_missing_at_index(7));
        assert_eq!(inst.class_value(), None);
    }
}
