//! Label definitions scoped to a dataset

use super::dataset::DatasetId;
use serde::{Deserialize, Serialize};

/// Identifier of a label, unique within its dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelId(u64);

impl LabelId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for LabelId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for LabelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable label definition.
///
/// Analytics aggregate on `text`, never on `id`: two labels with equal text
/// are the same category as far as reports are concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    pub id: LabelId,
    pub text: String,
    /// Owning dataset (non-owning back reference)
    pub dataset: DatasetId,
}

impl Label {
    pub fn new(id: impl Into<LabelId>, text: impl Into<String>, dataset: DatasetId) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            dataset,
        }
    }

    /// The aggregation key of this label
    pub fn key(&self) -> &str {
        &self.text
    }
}
