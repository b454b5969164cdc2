use crate::evaluation::preview::snapshot::Snapshot;

/// Snapshots taken during an evaluation, oldest first.
#[derive(Debug, Clone, Default)]
pub struct LearningCurve {
    snapshots: Vec<Snapshot>,
}

impl LearningCurve {
    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.snapshots)
    }
}
