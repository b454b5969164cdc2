use crate::core::instances::Instance;

/// Running prequential accuracy, weighted by instance weight.
#[derive(Debug, Clone, Default)]
pub struct BasicClassificationEvaluator {
    weight_observed: f64,
    weight_correct: f64,
}

impl BasicClassificationEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scores `votes` against the instance's label. Unlabeled instances are
    /// skipped; an all-zero vote vector counts as a miss.
    pub fn add_result(&mut self, instance: &dyn Instance, votes: &[f64]) {
        let Some(class_value) = instance.class_value() else {
            return;
        };
        let weight = instance.weight();
        if weight <= 0.0 {
            return;
        }
        self.weight_observed += weight;
        if predicted_class(votes) == Some(class_value as usize) {
            self.weight_correct += weight;
        }
    }

    /// NaN until something was observed.
    pub fn accuracy(&self) -> f64 {
        if self.weight_observed > 0.0 {
            self.weight_correct / self.weight_observed
        } else {
            f64::NAN
        }
    }

    pub fn weight_observed(&self) -> f64 {
        self.weight_observed
    }
}

fn predicted_class(votes: &[f64]) -> Option<usize> {
    votes
        .iter()
        .enumerate()
        .filter(|(_, v)| **v > 0.0)
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attributes::{AttributeRef, NominalAttribute};
    use crate::core::instance_header::InstanceHeader;
    use crate::core::instances::DenseInstance;
    use std::sync::Arc;

    fn labelled(class: f64, weight: f64) -> DenseInstance {
        let atts: Vec<AttributeRef> = vec![Arc::new(NominalAttribute::new(
            "class",
            vec!["a".to_string(), "b".to_string()],
        ))];
        DenseInstance::new(Arc::new(InstanceHeader::new("t", atts, 0)), vec![class], weight)
    }

    #[test]
    fn empty_evaluator_reports_nan() {
        assert!(BasicClassificationEvaluator::new().accuracy().is_nan());
    }

    #[test]
    fn weighs_hits_and_misses() {
        let mut e = BasicClassificationEvaluator::new();
        e.add_result(&labelled(1.0, 3.0), &[0.2, 0.8]);
        e.add_result(&labelled(0.0, 1.0), &[0.2, 0.8]);
        assert_eq!(e.accuracy(), 0.75);
    }

    #[test]
    fn zero_votes_count_as_a_miss() {
        let mut e = BasicClassificationEvaluator::new();
        e.add_result(&labelled(0.0, 1.0), &[0.0, 0.0]);
        e.add_result(&labelled(0.0, 1.0), &[]);
        assert_eq!(e.accuracy(), 0.0);
        assert_eq!(e.weight_observed(), 2.0);
    }

    #[test]
    fn unlabeled_instances_are_skipped() {
        let mut e = BasicClassificationEvaluator::new();
        e.add_result(&labelled(f64::NAN, 1.0), &[1.0, 0.0]);
        assert!(e.accuracy().is_nan());
    }
}
