use crate::classifiers::Classifier;
use crate::classifiers::hoeffding_tree::error::{ConfigError, TreeError};
use crate::evaluation::{BasicClassificationEvaluator, LearningCurve, Snapshot};
use crate::streams::Stream;
use cpu_time::ThreadTime;
use tracing::debug;

/// Test-then-train loop: every instance is first predicted, then learned.
pub struct PrequentialEvaluator {
    learner: Box<dyn Classifier>,
    stream: Box<dyn Stream>,
    evaluator: BasicClassificationEvaluator,
    curve: LearningCurve,
    max_instances: Option<u64>,
    sample_frequency: u64,
    processed: u64,
    start_cpu: ThreadTime,
}

impl PrequentialEvaluator {
    pub fn new(
        mut learner: Box<dyn Classifier>,
        stream: Box<dyn Stream>,
        max_instances: Option<u64>,
        sample_frequency: u64,
    ) -> Result<Self, ConfigError> {
        if sample_frequency == 0 {
            return Err(ConfigError::invalid("sample_frequency", "must be at least 1"));
        }
        learner.set_model_context(stream.header());

        Ok(Self {
            learner,
            stream,
            evaluator: BasicClassificationEvaluator::new(),
            curve: LearningCurve::default(),
            max_instances,
            sample_frequency,
            processed: 0,
            start_cpu: ThreadTime::now(),
        })
    }

    pub fn run(&mut self) -> Result<(), TreeError> {
        self.run_with(|_| {})
    }

    /// Runs to completion, handing every snapshot to `on_snapshot` as it is
    /// taken. A final snapshot is always taken when the loop ends.
    pub fn run_with(&mut self, mut on_snapshot: impl FnMut(&Snapshot)) -> Result<(), TreeError> {
        self.start_cpu = ThreadTime::now();

        while self.stream.has_more_instances() {
            if self.max_instances.is_some_and(|n| self.processed >= n) {
                break;
            }
            let Some(instance) = self.stream.next_instance() else {
                break;
            };
            self.processed += 1;

            let votes = self.learner.get_votes_for_instance(instance.as_ref());
            self.evaluator.add_result(instance.as_ref(), &votes);
            self.learner.train_on_instance(instance.as_ref())?;

            if self.processed % self.sample_frequency == 0 {
                on_snapshot(&self.take_snapshot());
            }
        }

        if self.processed == 0 || self.processed % self.sample_frequency != 0 {
            on_snapshot(&self.take_snapshot());
        }
        debug!(processed = self.processed, "prequential evaluation finished");
        Ok(())
    }

    pub fn curve(&self) -> &LearningCurve {
        &self.curve
    }

    pub fn learner(&self) -> &dyn Classifier {
        self.learner.as_ref()
    }

    fn take_snapshot(&mut self) -> Snapshot {
        let snapshot = Snapshot {
            instances_seen: self.processed,
            accuracy: self.evaluator.accuracy(),
            seconds: self.start_cpu.elapsed().as_secs_f64(),
            model_bytes: self.learner.calc_memory_size(),
            measurements: self.learner.model_measurements(),
        };
        self.curve.push(snapshot.clone());
        snapshot
    }
}
