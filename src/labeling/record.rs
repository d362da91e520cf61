//! Raw ingestion records
//!
//! Records arrive as JSON values in the shape produced by the ingestion
//! side: instances as `{"id": 1, "instance": "..."}` and labels as
//! `{"label id": 1, "label text": "..."}`.

use super::engine::{LabelingError, LabelingResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which kind of record a batch holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Instance,
    Label,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Instance => write!(f, "instance"),
            Self::Label => write!(f, "label"),
        }
    }
}

/// An instance record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRecord {
    pub id: u64,
    #[serde(rename = "instance")]
    pub text: String,
}

/// A label record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRecord {
    #[serde(rename = "label id")]
    pub id: u64,
    #[serde(rename = "label text")]
    pub text: String,
}

/// Parse a whole batch, failing on the first malformed record.
///
/// Nothing is returned unless every record parses, so callers can apply
/// the batch all-or-nothing.
pub(crate) fn parse_batch<T: DeserializeOwned>(
    kind: RecordKind,
    records: &[Value],
) -> LabelingResult<Vec<T>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            T::deserialize(record).map_err(|e| LabelingError::MalformedRecord {
                kind,
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}
