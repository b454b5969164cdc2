use crate::classifiers::hoeffding_tree::measurements::ModelMeasurements;
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub instances_seen: u64,
    pub accuracy: f64,
    pub seconds: f64,
    pub model_bytes: usize,
    pub measurements: Option<ModelMeasurements>,
}

impl Snapshot {
    #[inline]
    fn fmtv(v: f64) -> String {
        if v.is_nan() {
            "NaN".into()
        } else {
            format!("{v:.6}")
        }
    }
}

impl Display for Snapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "seen={}, acc={}, t={:.6}s, bytes={}",
            self.instances_seen,
            Self::fmtv(self.accuracy),
            self.seconds,
            self.model_bytes
        )?;
        if let Some(m) = &self.measurements {
            write!(f, ", {m}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_accuracy_is_spelled_out() {
        let s = Snapshot {
            instances_seen: 0,
            accuracy: f64::NAN,
            seconds: 0.0,
            model_bytes: 16,
            measurements: None,
        };
        assert_eq!(s.to_string(), "seen=0, acc=NaN, t=0.000000s, bytes=16");
    }

    #[test]
    fn appends_model_measurements() {
        let s = Snapshot {
            instances_seen: 10,
            accuracy: 0.5,
            seconds: 1.0,
            model_bytes: 100,
            measurements: Some(ModelMeasurements {
                tree_size_nodes: 1,
                tree_size_leaves: 1,
                active_learning_nodes: 1,
                tree_depth: 0,
                active_leaf_byte_size_estimate: 0.0,
                inactive_leaf_byte_size_estimate: 0.0,
                byte_size_estimate_overhead: 1.0,
            }),
        };
        let text = s.to_string();
        assert!(text.starts_with("seen=10, acc=0.500000"));
        assert!(text.contains("nodes=1, leaves=1, active=1"));
    }
}
