//! Dataset and assignment builders
//!
//! Instance and label ids are assigned 1, 2, 3... in the order the texts
//! are given.

use labelscope::{
    Dataset, InstanceId, InstanceRecord, InstanceRef, Label, LabelAssignment,
    LabelRecord, User, UserId,
};

/// Install a fmt subscriber that writes through the test harness
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Build a dataset from instance texts and label texts
pub fn dataset(id: u64, instances: &[&str], labels: &[&str]) -> Dataset {
    let mut ds = Dataset::new(id, format!("dataset-{id}"), labels.len().max(1));
    ds.add_instance_records(instances.iter().zip(1..).map(|(text, id)| InstanceRecord {
        id,
        text: text.to_string(),
    }));
    ds.add_label_records(labels.iter().zip(1..).map(|(text, id)| LabelRecord {
        id,
        text: text.to_string(),
    }));
    ds
}

/// An assignment by `user` of `labels` (by text) to an instance.
///
/// Labels are resolved on the dataset when defined there; otherwise a
/// free-standing label with id 0 is used.
pub fn assign(ds: &Dataset, user: u64, instance: u64, labels: &[&str]) -> LabelAssignment {
    let labels = labels
        .iter()
        .map(|text| {
            ds.labels()
                .iter()
                .find(|l| l.text == *text)
                .cloned()
                .unwrap_or_else(|| Label::new(0, *text, ds.id()))
        })
        .collect();
    LabelAssignment::new(
        UserId::new(user),
        InstanceRef::new(ds.id(), InstanceId::new(instance)),
        labels,
    )
    .expect("fixture assignments carry labels")
}

/// A user who produced the given assignments, with completeness refreshed
/// for `ds`, and counters on `ds` updated for in-scope assignments
pub fn user_with(ds: &mut Dataset, id: u64, name: &str, assignments: Vec<LabelAssignment>) -> User {
    let mut user = User::new(id, name);
    for assignment in assignments {
        if assignment.dataset() == ds.id() {
            ds.record_assignment(assignment.instance().instance)
                .expect("fixture instance exists");
        }
        user.record(assignment);
    }
    user.update_completeness(ds).expect("fixture dataset has instances");
    ds.add_assigned_user(&user);
    user
}
