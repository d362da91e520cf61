//! Users and the directory through which datasets resolve them
//!
//! Users are owned outside any dataset. A dataset only remembers the ids of
//! its assigned users and looks them up through a [`UserDirectory`] when a
//! per-user report is requested.

use super::assignment::LabelAssignment;
use super::dataset::{Dataset, DatasetId};
use super::engine::LabelingResult;
use crate::analytics::completeness;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifier of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key under which per-user results are reported: `"user" + id`
pub fn user_key(id: UserId) -> String {
    format!("user{}", id)
}

/// A labeler and everything they have produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    assignments: Vec<LabelAssignment>,
    /// Completeness per dataset, keyed `"dataset" + id`
    #[serde(default)]
    completeness: HashMap<String, f64>,
}

impl User {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            assignments: Vec::new(),
            completeness: HashMap::new(),
        }
    }

    /// Key of the completeness entry for a dataset: `"dataset" + id`
    pub fn completeness_key(dataset: DatasetId) -> String {
        format!("dataset{}", dataset)
    }

    /// Append an assignment this user produced
    pub fn record(&mut self, assignment: LabelAssignment) {
        self.assignments.push(assignment);
    }

    /// All assignments, across every dataset
    pub fn assignments(&self) -> &[LabelAssignment] {
        &self.assignments
    }

    /// Assignments that target instances of one dataset
    pub fn assignments_in(&self, dataset: DatasetId) -> impl Iterator<Item = &LabelAssignment> {
        self.assignments.iter().filter(move |a| a.targets(dataset))
    }

    /// The full completeness mapping
    pub fn completeness(&self) -> &HashMap<String, f64> {
        &self.completeness
    }

    /// Stored completeness for one dataset, if it was ever computed
    pub fn completeness_for(&self, dataset: DatasetId) -> Option<f64> {
        self.completeness.get(&Self::completeness_key(dataset)).copied()
    }

    /// Store a completeness value computed elsewhere
    pub fn set_completeness(&mut self, dataset: DatasetId, percentage: f64) {
        self.completeness
            .insert(Self::completeness_key(dataset), percentage);
    }

    /// Recompute and store the share of the dataset's instances this user
    /// has labeled at least once.
    pub fn update_completeness(&mut self, dataset: &Dataset) -> LabelingResult<f64> {
        let percentage =
            completeness::user_completeness(dataset, self.assignments_in(dataset.id()))?;
        self.set_completeness(dataset.id(), percentage);
        Ok(percentage)
    }
}

/// Read-only lookup of users by id
pub trait UserDirectory {
    fn user(&self, id: UserId) -> Option<&User>;
}

impl UserDirectory for HashMap<UserId, User> {
    fn user(&self, id: UserId) -> Option<&User> {
        self.get(&id)
    }
}

impl UserDirectory for [User] {
    fn user(&self, id: UserId) -> Option<&User> {
        self.iter().find(|u| u.id == id)
    }
}

impl UserDirectory for Vec<User> {
    fn user(&self, id: UserId) -> Option<&User> {
        self.as_slice().user(id)
    }
}
