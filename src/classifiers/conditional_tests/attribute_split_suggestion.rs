use crate::classifiers::hoeffding_tree::instance_conditional_test::InstanceConditionalTest;

/// A candidate split and the class distributions it would leave in each
/// branch. A missing test stands for "do not split".
pub struct AttributeSplitSuggestion {
    pub split_test: Option<Box<dyn InstanceConditionalTest>>,
    pub resulting_class_distributions: Vec<Vec<f64>>,
    pub merit: f64,
}

impl AttributeSplitSuggestion {
    pub fn new(
        split_test: Option<Box<dyn InstanceConditionalTest>>,
        resulting_class_distributions: Vec<Vec<f64>>,
        merit: f64,
    ) -> Self {
        Self {
            split_test,
            resulting_class_distributions,
            merit,
        }
    }

    pub fn merit(&self) -> f64 {
        self.merit
    }

    pub fn split_test(&self) -> Option<&dyn InstanceConditionalTest> {
        self.split_test.as_deref()
    }

    pub fn number_of_splits(&self) -> usize {
        self.resulting_class_distributions.len()
    }

    pub fn resulting_class_distribution_from_split(&self, split_index: usize) -> &[f64] {
        self.resulting_class_distributions
            .get(split_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
