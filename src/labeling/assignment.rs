//! Label assignments: one user labeling one instance once

use super::dataset::DatasetId;
use super::engine::{LabelingError, LabelingResult};
use super::instance::{Instance, InstanceId};
use super::label::Label;
use super::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Non-owning reference to an instance inside a specific dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceRef {
    pub dataset: DatasetId,
    pub instance: InstanceId,
}

impl InstanceRef {
    pub fn new(dataset: DatasetId, instance: InstanceId) -> Self {
        Self { dataset, instance }
    }
}

impl From<&Instance> for InstanceRef {
    fn from(instance: &Instance) -> Self {
        Self::new(instance.dataset(), instance.id)
    }
}

impl std::fmt::Display for InstanceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.dataset, self.instance)
    }
}

/// A single act of labeling.
///
/// Immutable once created. The label sequence is never empty and keeps the
/// order in which the user submitted the labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelAssignment {
    instance: InstanceRef,
    user: UserId,
    labels: Vec<Label>,
    assigned_at: DateTime<Utc>,
}

impl LabelAssignment {
    /// Create an assignment stamped with the current time
    pub fn new(user: UserId, instance: InstanceRef, labels: Vec<Label>) -> LabelingResult<Self> {
        Self::at(user, instance, labels, Utc::now())
    }

    /// Create an assignment with an explicit timestamp
    pub fn at(
        user: UserId,
        instance: InstanceRef,
        labels: Vec<Label>,
        assigned_at: DateTime<Utc>,
    ) -> LabelingResult<Self> {
        if labels.is_empty() {
            return Err(LabelingError::EmptyAssignment(instance));
        }
        Ok(Self {
            instance,
            user,
            labels,
            assigned_at,
        })
    }

    pub fn instance(&self) -> InstanceRef {
        self.instance
    }

    pub fn dataset(&self) -> DatasetId {
        self.instance.dataset
    }

    pub fn user(&self) -> UserId {
        self.user
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn assigned_at(&self) -> DateTime<Utc> {
        self.assigned_at
    }

    /// Label texts in submission order
    pub fn label_texts(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(Label::key)
    }

    /// Whether this assignment targets an instance of the given dataset
    pub fn targets(&self, dataset: DatasetId) -> bool {
        self.instance.dataset == dataset
    }
}
