use crate::classifiers::hoeffding_tree::error::TreeError;
use crate::classifiers::hoeffding_tree::measurements::ModelMeasurements;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use std::sync::Arc;

pub trait Classifier {
    /// Per-class vote weights. Always at least as long as the number of classes.
    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Vec<f64>;
    fn set_model_context(&mut self, header: Arc<InstanceHeader>);
    fn train_on_instance(&mut self, instance: &dyn Instance) -> Result<(), TreeError>;
    fn calc_memory_size(&self) -> usize;

    fn model_measurements(&self) -> Option<ModelMeasurements> {
        None
    }

    fn get_model_description(&self) -> Option<String> {
        None
    }
}
