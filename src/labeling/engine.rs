//! LabelingEngine: coordinates datasets, users and the assignments between them

use super::assignment::{InstanceRef, LabelAssignment};
use super::dataset::{Dataset, DatasetId};
use super::instance::InstanceId;
use super::label::{Label, LabelId};
use super::record::RecordKind;
use super::user::{User, UserId};
use crate::analytics::DatasetReport;
use crate::config::EngineConfig;
use dashmap::DashMap;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur in labeling operations
#[derive(Debug, Error)]
pub enum LabelingError {
    #[error("Malformed {kind} record at index {index}: {reason}")]
    MalformedRecord {
        kind: RecordKind,
        index: usize,
        reason: String,
    },

    #[error("Instance not found: {0}")]
    InstanceNotFound(InstanceId),

    #[error("Label not found: {0}")]
    LabelNotFound(LabelId),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Dataset not found: {0}")]
    DatasetNotFound(DatasetId),

    #[error("Dataset {0} has no instances")]
    EmptyDataset(DatasetId),

    #[error("No assignments target dataset {0}")]
    NoAssignments(DatasetId),

    #[error("User {user} has no completeness recorded for dataset {dataset}")]
    MissingData { user: UserId, dataset: DatasetId },

    #[error("Assignment for instance {0} carries no labels")]
    EmptyAssignment(InstanceRef),

    #[error("Dataset {dataset} allows at most {max} labels per assignment, got {given}")]
    TooManyLabels {
        dataset: DatasetId,
        max: usize,
        given: usize,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for labeling operations
pub type LabelingResult<T> = Result<T, LabelingError>;

/// Holds datasets and users for a labeling session.
///
/// Each dataset and each user sits behind its own map entry lock, so
/// writes to one dataset are serialized while other datasets stay
/// available. Lock order is always dataset before user.
#[derive(Debug, Default)]
pub struct LabelingEngine {
    datasets: DashMap<DatasetId, Dataset>,
    users: DashMap<UserId, User>,
    config: EngineConfig,
}

impl LabelingEngine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with an explicit configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Insert or replace a dataset; returns its id
    pub fn upsert_dataset(&self, dataset: Dataset) -> DatasetId {
        let id = dataset.id();
        self.datasets.insert(id, dataset);
        id
    }

    /// Get a snapshot of a dataset
    pub fn get_dataset(&self, id: &DatasetId) -> Option<Dataset> {
        self.datasets.get(id).map(|r| r.clone())
    }

    pub fn remove_dataset(&self, id: &DatasetId) -> Option<Dataset> {
        self.datasets.remove(id).map(|(_, ds)| ds)
    }

    /// List all dataset ids, sorted
    pub fn list_datasets(&self) -> Vec<DatasetId> {
        let mut ids: Vec<DatasetId> = self.datasets.iter().map(|r| *r.key()).collect();
        ids.sort();
        ids
    }

    pub fn dataset_count(&self) -> usize {
        self.datasets.len()
    }

    /// Insert or replace a user; returns its id
    pub fn upsert_user(&self, user: User) -> UserId {
        let id = user.id;
        self.users.insert(id, user);
        id
    }

    /// Get a snapshot of a user
    pub fn get_user(&self, id: &UserId) -> Option<User> {
        self.users.get(id).map(|r| r.clone())
    }

    /// Put a user on a dataset's assigned list
    pub fn assign_user(&self, dataset_id: DatasetId, user_id: UserId) -> LabelingResult<()> {
        let mut dataset = self
            .datasets
            .get_mut(&dataset_id)
            .ok_or(LabelingError::DatasetNotFound(dataset_id))?;
        let user = self
            .users
            .get(&user_id)
            .ok_or(LabelingError::UserNotFound(user_id))?;
        dataset.add_assigned_user(&user);
        Ok(())
    }

    /// Record a user labeling one instance.
    ///
    /// All validation happens before any state changes: on error neither
    /// the dataset nor the user is modified. On success the instance
    /// counter grows, the user gains the assignment, and the user's stored
    /// completeness for the dataset is refreshed.
    pub fn label(
        &self,
        user_id: UserId,
        dataset_id: DatasetId,
        instance_id: InstanceId,
        label_ids: &[LabelId],
    ) -> LabelingResult<LabelAssignment> {
        let mut dataset = self
            .datasets
            .get_mut(&dataset_id)
            .ok_or(LabelingError::DatasetNotFound(dataset_id))?;
        let mut user = self
            .users
            .get_mut(&user_id)
            .ok_or(LabelingError::UserNotFound(user_id))?;

        if dataset.get_instance(instance_id).is_none() {
            return Err(LabelingError::InstanceNotFound(instance_id));
        }

        let labels = label_ids
            .iter()
            .map(|id| {
                dataset
                    .get_label(*id)
                    .cloned()
                    .ok_or(LabelingError::LabelNotFound(*id))
            })
            .collect::<LabelingResult<Vec<Label>>>()?;

        if self.config.enforce_max_labels && labels.len() > dataset.max_label() {
            return Err(LabelingError::TooManyLabels {
                dataset: dataset_id,
                max: dataset.max_label(),
                given: labels.len(),
            });
        }

        let assignment =
            LabelAssignment::new(user_id, InstanceRef::new(dataset_id, instance_id), labels)?;

        let total = dataset.record_assignment(instance_id)?;
        user.record(assignment.clone());
        let completeness = user.update_completeness(&dataset)?;

        debug!(
            dataset = %dataset_id,
            instance = %instance_id,
            user = %user_id,
            total,
            completeness,
            "recorded label assignment"
        );

        Ok(assignment)
    }

    /// Compute every analytic for one dataset.
    ///
    /// Works on snapshots, so the dataset is only locked while it is copied.
    pub fn report(&self, dataset_id: DatasetId) -> LabelingResult<DatasetReport> {
        let dataset = self
            .get_dataset(&dataset_id)
            .ok_or(LabelingError::DatasetNotFound(dataset_id))?;

        let users: HashMap<UserId, User> = dataset
            .assigned_users()
            .iter()
            .filter_map(|id| self.users.get(id).map(|u| (*id, u.clone())))
            .collect();

        Ok(DatasetReport::build(
            &dataset,
            &users,
            self.config.consistency.strategy(),
        ))
    }
}
