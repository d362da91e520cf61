//! Per-label coverage: how many distinct instances received each label

use crate::labeling::{Dataset, Instance, LabelAssignment};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// The value that decides whether two instances are "the same" for
/// coverage counting.
///
/// Instances are currently told apart by text, so two instances with
/// identical text count once.
pub fn coverage_key(instance: &Instance) -> &str {
    &instance.text
}

/// For every label defined on the dataset, the number of distinct
/// instances (by [`coverage_key`]) that received it at least once.
///
/// Labels never used map to `0`. An empty assignment list is not an error.
pub fn unique_instances<'a, I>(dataset: &Dataset, assignments: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a LabelAssignment>,
{
    let mut seen: BTreeMap<&str, HashSet<&str>> = dataset
        .labels()
        .iter()
        .map(|l| (l.key(), HashSet::new()))
        .collect();
    let index = dataset.instance_index();

    for assignment in assignments {
        let Some(instance) = index.resolve(assignment) else {
            debug!(instance = %assignment.instance(), "assignment outside dataset, skipped");
            continue;
        };
        for text in assignment.label_texts() {
            if let Some(instances) = seen.get_mut(text) {
                instances.insert(coverage_key(instance));
            }
        }
    }

    seen.into_iter()
        .map(|(label, instances)| (label.to_string(), instances.len()))
        .collect()
}
