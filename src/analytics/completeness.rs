//! Completeness of a dataset, overall and per user

use super::percentage;
use crate::labeling::{Dataset, InstanceId, LabelAssignment, LabelingError, LabelingResult};
use std::collections::HashSet;

/// Percentage of the dataset's instances with at least one assignment.
///
/// An empty dataset has no meaningful completeness and fails with
/// [`LabelingError::EmptyDataset`].
pub fn dataset_completeness(dataset: &Dataset) -> LabelingResult<f64> {
    let instances = dataset.instances();
    if instances.is_empty() {
        return Err(LabelingError::EmptyDataset(dataset.id()));
    }
    let labeled = instances.iter().filter(|i| i.is_labeled()).count();
    Ok(percentage(labeled, instances.len()))
}

/// Percentage of the dataset's distinct instance ids that appear in the
/// given assignments.
///
/// Assignments for other datasets or unknown instances are ignored.
pub fn user_completeness<'a, I>(dataset: &Dataset, assignments: I) -> LabelingResult<f64>
where
    I: IntoIterator<Item = &'a LabelAssignment>,
{
    let index = dataset.instance_index();
    if index.is_empty() {
        return Err(LabelingError::EmptyDataset(dataset.id()));
    }
    let labeled: HashSet<InstanceId> = assignments
        .into_iter()
        .filter_map(|a| index.resolve(a))
        .map(|i| i.id)
        .collect();
    Ok(percentage(labeled.len(), index.len()))
}
