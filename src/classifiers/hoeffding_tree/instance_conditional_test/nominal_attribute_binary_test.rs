use crate::classifiers::hoeffding_tree::instance_conditional_test::instance_conditional_test::{
    InstanceConditionalTest, attribute_name, value_label,
};
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::utils::memory::MemorySized;
use std::any::Any;

/// Sends one nominal value to branch 0 and every other value to branch 1.
#[derive(Debug, Clone)]
pub struct NominalAttributeBinaryTest {
    attribute_index: usize,
    attribute_value: usize,
}

impl NominalAttributeBinaryTest {
    pub fn new(attribute_index: usize, attribute_value: usize) -> Self {
        Self {
            attribute_index,
            attribute_value,
        }
    }
}

impl InstanceConditionalTest for NominalAttributeBinaryTest {
    fn branch_for_instance(&self, instance: &dyn Instance) -> Option<usize> {
        if instance.is_missing_at_index(self.attribute_index) {
            return None;
        }
        let value = instance.value_at_index(self.attribute_index)?;
        if value as usize == self.attribute_value {
            Some(0)
        } else {
            Some(1)
        }
    }

    fn max_branches(&self) -> usize {
        2
    }

    fn get_atts_test_depends_on(&self) -> Vec<usize> {
        vec![self.attribute_index]
    }

    fn describe_condition_for_branch(
        &self,
        branch: usize,
        header: Option<&InstanceHeader>,
    ) -> String {
        let op = if branch == 0 { "=" } else { "!=" };
        format!(
            "{} {op} {}",
            attribute_name(header, self.attribute_index),
            value_label(header, self.attribute_index, self.attribute_value)
        )
    }

    fn clone_box(&self) -> Box<dyn InstanceConditionalTest> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl MemorySized for NominalAttributeBinaryTest {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attributes::{AttributeRef, NominalAttribute};
    use crate::core::instances::DenseInstance;
    use std::sync::Arc;

    fn header() -> Arc<InstanceHeader> {
        let colour: AttributeRef = Arc::new(NominalAttribute::new(
            "colour",
            vec!["red".into(), "green".into(), "blue".into()],
        ));
        let class: AttributeRef =
            Arc::new(NominalAttribute::new("class", vec!["no".into(), "yes".into()]));
        Arc::new(InstanceHeader::new("colours", vec![colour, class], 1))
    }

    #[test]
    fn matching_value_goes_left() {
        let test = NominalAttributeBinaryTest::new(0, 2);
        let h = header();
        let blue = DenseInstance::new(h.clone(), vec![2.0, 0.0], 1.0);
        let red = DenseInstance::new(h, vec![0.0, 0.0], 1.0);
        assert_eq!(test.branch_for_instance(&blue), Some(0));
        assert_eq!(test.branch_for_instance(&red), Some(1));
    }

    #[test]
    fn missing_value_cannot_be_routed() {
        let test = NominalAttributeBinaryTest::new(0, 1);
        let inst = DenseInstance::new(header(), vec![f64::NAN, 1.0], 1.0);
        assert_eq!(test.branch_for_instance(&inst), None);
    }

    #[test]
    fn describes_with_and_without_header() {
        let test = NominalAttributeBinaryTest::new(0, 1);
        let h = header();
        assert_eq!(test.describe_condition_for_branch(0, Some(&*h)), "colour = green");
        assert_eq!(test.describe_condition_for_branch(1, Some(&*h)), "colour != green");
        assert_eq!(test.describe_condition_for_branch(0, None), "attribute #0 = 1");
    }

    #[test]
    fn depends_on_single_attribute() {
        let test = NominalAttributeBinaryTest::new(5, 3);
        assert_eq!(test.get_atts_test_depends_on(), vec![5]);
        assert_eq!(test.max_branches(), 2);
    }
}
