//! Labelable text instances

use super::dataset::DatasetId;
use serde::{Deserialize, Serialize};

/// Identifier of an instance, unique within its dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(u64);

impl InstanceId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for InstanceId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A text item that users label.
///
/// The owning dataset is fixed at construction. The only mutable state is
/// the assignment counter, which only ever grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub id: InstanceId,
    pub text: String,
    dataset: DatasetId,
    #[serde(default)]
    total_label_assignments: u64,
}

impl Instance {
    pub fn new(id: impl Into<InstanceId>, text: impl Into<String>, dataset: DatasetId) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            dataset,
            total_label_assignments: 0,
        }
    }

    /// The dataset this instance belongs to
    pub fn dataset(&self) -> DatasetId {
        self.dataset
    }

    /// How many label assignments have targeted this instance
    pub fn total_label_assignments(&self) -> u64 {
        self.total_label_assignments
    }

    /// Whether at least one assignment has been recorded
    pub fn is_labeled(&self) -> bool {
        self.total_label_assignments >= 1
    }

    /// Count one more assignment against this instance; returns the new total
    pub(crate) fn increment_assignments(&mut self) -> u64 {
        self.total_label_assignments += 1;
        self.total_label_assignments
    }
}
