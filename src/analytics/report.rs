//! Aggregated dataset report

use super::consistency::{self, ConsistencyScore, SequenceEquality};
use crate::labeling::{
    user_key, Dataset, DatasetId, LabelAssignment, LabelingError, LabelingResult, UserDirectory,
    UserId,
};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Per-user row of a [`DatasetReport`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserReport {
    pub id: UserId,
    pub name: String,
    /// Number of this user's assignments on the dataset's instances
    pub assignments: usize,
    /// Stored completeness, absent if it was never computed
    pub completeness: Option<f64>,
    pub consistency: ConsistencyScore,
    pub consistency_percentage: f64,
}

/// Every analytic for one dataset, computed from a single snapshot.
///
/// Metrics that are undefined for the snapshot (no instances, no
/// assignments) are `None` rather than failing the whole report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetReport {
    pub dataset: DatasetId,
    pub name: String,
    pub max_label: usize,
    pub total_instances: usize,
    pub total_labels: usize,
    pub total_assigned_users: usize,
    /// Assignments by assigned users on this dataset's instances
    pub total_assignments: usize,
    pub completeness: Option<f64>,
    pub distribution: Option<BTreeMap<String, f64>>,
    pub unique_instances: BTreeMap<String, usize>,
    /// Stored completeness by user name
    pub user_completeness: BTreeMap<String, f64>,
    /// Consistency keyed `"user" + id`
    pub user_consistency: BTreeMap<String, f64>,
    pub users: Vec<UserReport>,
}

impl DatasetReport {
    /// Build a report from a dataset and the users it references.
    ///
    /// The assignment history is the union of every distinct assigned
    /// user's assignments for this dataset. Users missing from `users` are
    /// skipped with a warning.
    pub fn build<D>(dataset: &Dataset, users: &D, equality: &dyn SequenceEquality) -> Self
    where
        D: UserDirectory + ?Sized,
    {
        let id = dataset.id();
        let index = dataset.instance_index();
        let mut history: Vec<&LabelAssignment> = Vec::new();
        let mut rows = Vec::new();
        let mut user_completeness = BTreeMap::new();
        let mut user_consistency = BTreeMap::new();
        let mut seen = BTreeSet::new();

        for &user_id in dataset.assigned_users() {
            let Some(user) = users.user(user_id) else {
                warn!(
                    user = %user_id,
                    dataset = %id,
                    "assigned user not found, omitted from report"
                );
                continue;
            };

            let completeness = user.completeness_for(id);
            match completeness {
                Some(value) => {
                    user_completeness.insert(user.name.clone(), value);
                }
                None => {
                    let error = LabelingError::MissingData {
                        user: user_id,
                        dataset: id,
                    };
                    warn!(%error, "user completeness omitted from report");
                }
            }

            let grouped = consistency::group_by_instance(dataset, user.assignments());
            let score = consistency::score(&grouped, equality);
            user_consistency.insert(user_key(user_id), score.percentage());

            // A user assigned twice still contributes their history once.
            if seen.insert(user_id) {
                let before = history.len();
                history.extend(
                    user.assignments()
                        .iter()
                        .filter(|a| index.resolve(a).is_some()),
                );
                rows.push(UserReport {
                    id: user_id,
                    name: user.name.clone(),
                    assignments: history.len() - before,
                    completeness,
                    consistency: score,
                    consistency_percentage: score.percentage(),
                });
            }
        }

        Self {
            dataset: id,
            name: dataset.name().to_string(),
            max_label: dataset.max_label(),
            total_instances: dataset.instances().len(),
            total_labels: dataset.labels().len(),
            total_assigned_users: dataset.total_assigned_users(),
            total_assignments: history.len(),
            completeness: dataset.completeness().ok(),
            distribution: dataset.distribution(history.iter().copied()).ok(),
            unique_instances: dataset.unique_instances(history.iter().copied()),
            user_completeness,
            user_consistency,
            users: rows,
        }
    }

    /// Render the report as pretty-printed JSON
    pub fn to_json(&self) -> LabelingResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
