mod evaluator;
mod preview;

pub use evaluator::BasicClassificationEvaluator;
pub use preview::learning_curve::LearningCurve;
pub use preview::snapshot::Snapshot;
