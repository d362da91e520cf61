//! Label distribution across assignments

use super::percentage;
use crate::labeling::{Dataset, LabelAssignment, LabelingError, LabelingResult};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// For every label defined on the dataset, the percentage of in-scope
/// assignments that carry it.
///
/// Each assignment counts at most once per label, so no single value
/// exceeds 100, but the values together can. Labels never used appear with
/// `0.0`. Labels carried by an assignment but not defined on the dataset
/// are skipped.
///
/// Fails with [`LabelingError::NoAssignments`] when no assignment targets
/// an instance of this dataset.
pub fn label_distribution<'a, I>(
    dataset: &Dataset,
    assignments: I,
) -> LabelingResult<BTreeMap<String, f64>>
where
    I: IntoIterator<Item = &'a LabelAssignment>,
{
    let mut counts: BTreeMap<&str, usize> =
        dataset.labels().iter().map(|l| (l.key(), 0)).collect();
    let index = dataset.instance_index();
    let mut total = 0usize;

    for assignment in assignments {
        if index.resolve(assignment).is_none() {
            debug!(instance = %assignment.instance(), "assignment outside dataset, skipped");
            continue;
        }
        total += 1;

        let carried: BTreeSet<&str> = assignment.label_texts().collect();
        for text in carried {
            match counts.get_mut(text) {
                Some(count) => *count += 1,
                None => {
                    debug!(label = text, dataset = %dataset.id(), "label not defined on dataset")
                }
            }
        }
    }

    if total == 0 {
        return Err(LabelingError::NoAssignments(dataset.id()));
    }

    Ok(counts
        .into_iter()
        .map(|(text, count)| (text.to_string(), percentage(count, total)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labeling::{
        DatasetId, InstanceId, InstanceRecord, InstanceRef, Label, LabelRecord, UserId,
    };

    fn dataset() -> Dataset {
        let mut ds = Dataset::new(1, "pets", 2);
        ds.add_instance_records(vec![
            InstanceRecord { id: 1, text: "whiskers".into() },
            InstanceRecord { id: 2, text: "barks".into() },
        ]);
        ds.add_label_records(vec![
            LabelRecord { id: 1, text: "cat".into() },
            LabelRecord { id: 2, text: "dog".into() },
            LabelRecord { id: 3, text: "bird".into() },
        ]);
        ds
    }

    fn assign(dataset: u64, instance: u64, labels: &[&str]) -> LabelAssignment {
        let ds = DatasetId::new(dataset);
        LabelAssignment::new(
            UserId::new(1),
            InstanceRef::new(ds, InstanceId::new(instance)),
            labels.iter().map(|t| Label::new(0, *t, ds)).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_multi_label_distribution_exceeds_100() {
        let ds = dataset();
        let assignments = vec![assign(1, 1, &["cat"]), assign(1, 2, &["cat", "dog"])];

        let dist = label_distribution(&ds, &assignments).unwrap();
        assert_eq!(dist.get("cat"), Some(&100.0));
        assert_eq!(dist.get("dog"), Some(&50.0));
        assert_eq!(dist.get("bird"), Some(&0.0));
        assert_eq!(dist.len(), 3);
    }

    #[test]
    fn test_no_assignments_fails() {
        let ds = dataset();
        let none: Vec<LabelAssignment> = Vec::new();
        assert!(matches!(
            label_distribution(&ds, &none),
            Err(LabelingError::NoAssignments(_))
        ));
    }

    #[test]
    fn test_out_of_scope_assignments_do_not_count() {
        let ds = dataset();
        let assignments = vec![
            assign(1, 1, &["dog"]),
            assign(2, 1, &["cat"]),
            assign(1, 42, &["cat"]),
        ];
        let dist = label_distribution(&ds, &assignments).unwrap();
        assert_eq!(dist.get("dog"), Some(&100.0));
        assert_eq!(dist.get("cat"), Some(&0.0));

        let only_foreign = vec![assign(2, 1, &["cat"])];
        assert!(label_distribution(&ds, &only_foreign).is_err());
    }

    #[test]
    fn test_unknown_labels_are_ignored() {
        let ds = dataset();
        let assignments = vec![assign(1, 1, &["fish", "cat"])];
        let dist = label_distribution(&ds, &assignments).unwrap();
        assert_eq!(dist.len(), 3);
        assert_eq!(dist.get("cat"), Some(&100.0));
        assert!(!dist.contains_key("fish"));
    }

    #[test]
    fn test_repeated_label_counts_once_per_assignment() {
        let ds = dataset();
        let assignments = vec![assign(1, 1, &["cat", "cat"]), assign(1, 2, &["dog"])];
        let dist = label_distribution(&ds, &assignments).unwrap();
        assert_eq!(dist.get("cat"), Some(&50.0));
    }
}
