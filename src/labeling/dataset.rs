//! Dataset: the aggregate root owning instances and labels

use super::assignment::LabelAssignment;
use super::engine::{LabelingError, LabelingResult};
use super::instance::{Instance, InstanceId};
use super::label::{Label, LabelId};
use super::record::{parse_batch, InstanceRecord, LabelRecord, RecordKind};
use super::user::{user_key, User, UserDirectory, UserId};
use crate::analytics::consistency::{self, OrderSensitive, SequenceEquality};
use crate::analytics::{completeness, coverage, distribution};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Unique identifier for a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetId(u64);

impl DatasetId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for DatasetId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for DatasetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named collection of instances and the labels users may attach to them
///
/// Instances and labels are owned and kept in insertion order. Assigned
/// users are only referenced by id; they live in whatever [`UserDirectory`]
/// the caller hands to the per-user analytics.
///
/// Mutation (`add_*`, [`Dataset::record_assignment`]) takes `&mut self`, so
/// analytics can never observe a dataset mid-update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    id: DatasetId,
    name: String,
    max_label: usize,
    instances: Vec<Instance>,
    labels: Vec<Label>,
    assigned_users: Vec<UserId>,
}

impl Dataset {
    /// Create an empty dataset.
    ///
    /// `max_label` is the number of labels a single assignment may carry.
    /// It is enforced by whoever creates assignments, not here.
    pub fn new(id: impl Into<DatasetId>, name: impl Into<String>, max_label: usize) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            max_label,
            instances: Vec::new(),
            labels: Vec::new(),
            assigned_users: Vec::new(),
        }
    }

    pub fn id(&self) -> DatasetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_label(&self) -> usize {
        self.max_label
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn assigned_users(&self) -> &[UserId] {
        &self.assigned_users
    }

    pub fn total_assigned_users(&self) -> usize {
        self.assigned_users.len()
    }

    /// Append instances parsed from raw records.
    ///
    /// Every record is parsed before any instance is added, so a malformed
    /// record leaves the dataset untouched. Returns the number appended.
    pub fn add_instances(&mut self, records: &[Value]) -> LabelingResult<usize> {
        let parsed: Vec<InstanceRecord> = parse_batch(RecordKind::Instance, records)?;
        Ok(self.add_instance_records(parsed))
    }

    /// Append instances from already-typed records
    pub fn add_instance_records(
        &mut self,
        records: impl IntoIterator<Item = InstanceRecord>,
    ) -> usize {
        let before = self.instances.len();
        let id = self.id;
        self.instances
            .extend(records.into_iter().map(|r| Instance::new(r.id, r.text, id)));
        self.instances.len() - before
    }

    /// Append labels parsed from raw records; all-or-nothing like
    /// [`Dataset::add_instances`].
    pub fn add_labels(&mut self, records: &[Value]) -> LabelingResult<usize> {
        let parsed: Vec<LabelRecord> = parse_batch(RecordKind::Label, records)?;
        Ok(self.add_label_records(parsed))
    }

    /// Append labels from already-typed records
    pub fn add_label_records(&mut self, records: impl IntoIterator<Item = LabelRecord>) -> usize {
        let before = self.labels.len();
        let id = self.id;
        self.labels
            .extend(records.into_iter().map(|r| Label::new(r.id, r.text, id)));
        self.labels.len() - before
    }

    /// Reference a user as working on this dataset.
    ///
    /// No deduplication: adding the same user twice makes them count twice
    /// in per-user aggregates.
    pub fn add_assigned_user(&mut self, user: &User) {
        self.assigned_users.push(user.id);
    }

    /// Find an instance by id.
    ///
    /// This is a linear scan. If several instances share the id, the one
    /// added last is returned. Use [`Dataset::instance_index`] for repeated
    /// lookups.
    pub fn get_instance(&self, id: InstanceId) -> Option<&Instance> {
        self.instances.iter().rev().find(|i| i.id == id)
    }

    /// Find a label by id (linear scan, last added wins)
    pub fn get_label(&self, id: LabelId) -> Option<&Label> {
        self.labels.iter().rev().find(|l| l.id == id)
    }

    /// Build a lookup index over the current instances.
    ///
    /// The index borrows the dataset, so it cannot outlive a mutation.
    pub fn instance_index(&self) -> InstanceIndex<'_> {
        InstanceIndex::build(self)
    }

    /// Count one assignment against an instance; returns its new total
    pub fn record_assignment(&mut self, id: InstanceId) -> LabelingResult<u64> {
        self.instances
            .iter_mut()
            .rev()
            .find(|i| i.id == id)
            .map(Instance::increment_assignments)
            .ok_or(LabelingError::InstanceNotFound(id))
    }

    /// Percentage of instances with at least one recorded assignment.
    ///
    /// Fails with [`LabelingError::EmptyDataset`] when there are no instances.
    pub fn completeness(&self) -> LabelingResult<f64> {
        completeness::dataset_completeness(self)
    }

    /// For each label, the percentage of assignments that carry it.
    ///
    /// Only assignments targeting this dataset's instances are counted.
    /// Percentages can sum past 100 when assignments carry several labels.
    /// Fails with [`LabelingError::NoAssignments`] when nothing is in scope.
    pub fn distribution<'a, I>(&self, assignments: I) -> LabelingResult<BTreeMap<String, f64>>
    where
        I: IntoIterator<Item = &'a LabelAssignment>,
    {
        distribution::label_distribution(self, assignments)
    }

    /// For each label, how many distinct instances received it
    pub fn unique_instances<'a, I>(&self, assignments: I) -> BTreeMap<String, usize>
    where
        I: IntoIterator<Item = &'a LabelAssignment>,
    {
        coverage::unique_instances(self, assignments)
    }

    /// Each assigned user's stored completeness for this dataset, by name.
    ///
    /// A user without a stored value fails the call with
    /// [`LabelingError::MissingData`].
    pub fn user_completeness_percentage<D>(
        &self,
        users: &D,
    ) -> LabelingResult<BTreeMap<String, f64>>
    where
        D: UserDirectory + ?Sized,
    {
        let mut result = BTreeMap::new();
        for &user_id in &self.assigned_users {
            let user = users
                .user(user_id)
                .ok_or(LabelingError::UserNotFound(user_id))?;
            let percentage = user
                .completeness_for(self.id)
                .ok_or(LabelingError::MissingData {
                    user: user_id,
                    dataset: self.id,
                })?;
            result.insert(user.name.clone(), percentage);
        }
        Ok(result)
    }

    /// Each assigned user's labeling consistency, keyed `"user" + id`,
    /// comparing label sequences in order.
    pub fn user_consistency_percentage<D>(
        &self,
        users: &D,
    ) -> LabelingResult<BTreeMap<String, f64>>
    where
        D: UserDirectory + ?Sized,
    {
        self.user_consistency_with(users, &OrderSensitive)
    }

    /// Same as [`Dataset::user_consistency_percentage`] with an explicit
    /// sequence comparison.
    pub fn user_consistency_with<D>(
        &self,
        users: &D,
        equality: &dyn SequenceEquality,
    ) -> LabelingResult<BTreeMap<String, f64>>
    where
        D: UserDirectory + ?Sized,
    {
        let mut result = BTreeMap::new();
        for &user_id in &self.assigned_users {
            let user = users
                .user(user_id)
                .ok_or(LabelingError::UserNotFound(user_id))?;
            let history = consistency::group_by_instance(self, user.assignments());
            let score = consistency::score(&history, equality);
            result.insert(user_key(user_id), score.percentage());
        }
        Ok(result)
    }
}

/// Read-only id index over a dataset's instances
#[derive(Debug)]
pub struct InstanceIndex<'a> {
    dataset: DatasetId,
    by_id: HashMap<InstanceId, &'a Instance>,
}

impl<'a> InstanceIndex<'a> {
    fn build(dataset: &'a Dataset) -> Self {
        // Later inserts overwrite earlier ones, matching `get_instance`.
        let by_id = dataset.instances.iter().map(|i| (i.id, i)).collect();
        Self {
            dataset: dataset.id,
            by_id,
        }
    }

    pub fn get(&self, id: InstanceId) -> Option<&'a Instance> {
        self.by_id.get(&id).copied()
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Number of distinct instance ids
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// The instance an assignment targets, if it belongs to this dataset
    pub fn resolve(&self, assignment: &LabelAssignment) -> Option<&'a Instance> {
        if !assignment.targets(self.dataset) {
            return None;
        }
        self.get(assignment.instance().instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labeling::InstanceRef;
    use serde_json::json;

    fn sample() -> Dataset {
        let mut ds = Dataset::new(1, "reviews", 2);
        ds.add_instances(&[
            json!({"id": 1, "instance": "great food"}),
            json!({"id": 2, "instance": "slow service"}),
            json!({"id": 3, "instance": "great food"}),
        ])
        .unwrap();
        ds.add_labels(&[
            json!({"label id": 1, "label text": "positive"}),
            json!({"label id": 2, "label text": "negative"}),
        ])
        .unwrap();
        ds
    }

    #[test]
    fn test_add_instances_preserves_order_and_links_dataset() {
        let ds = sample();
        let ids: Vec<u64> = ds.instances().iter().map(|i| i.id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(ds.instances().iter().all(|i| i.dataset() == ds.id()));
        assert!(ds.labels().iter().all(|l| l.dataset == ds.id()));
    }

    #[test]
    fn test_malformed_batch_applies_nothing() {
        let mut ds = sample();
        let result = ds.add_instances(&[
            json!({"id": 4, "instance": "fine"}),
            json!({"instance": "no id"}),
        ]);
        assert!(matches!(result, Err(LabelingError::MalformedRecord { index: 1, .. })));
        assert_eq!(ds.instances().len(), 3);

        let result = ds.add_labels(&[json!({"label id": 3})]);
        assert!(result.is_err());
        assert_eq!(ds.labels().len(), 2);
    }

    #[test]
    fn test_get_instance() {
        let ds = sample();
        assert_eq!(
            ds.get_instance(InstanceId::new(2)).map(|i| i.text.as_str()),
            Some("slow service")
        );
        assert!(ds.get_instance(InstanceId::new(9)).is_none());
    }

    #[test]
    fn test_get_instance_duplicate_id_last_wins() {
        let mut ds = Dataset::new(1, "dup", 1);
        ds.add_instance_records(vec![
            InstanceRecord { id: 1, text: "first".into() },
            InstanceRecord { id: 1, text: "second".into() },
        ]);
        assert_eq!(ds.get_instance(InstanceId::new(1)).unwrap().text, "second");
        assert_eq!(ds.instance_index().get(InstanceId::new(1)).unwrap().text, "second");
        assert_eq!(ds.instance_index().len(), 1);
    }

    #[test]
    fn test_record_assignment_increments_counter() {
        let mut ds = sample();
        assert_eq!(ds.record_assignment(InstanceId::new(2)).unwrap(), 1);
        assert_eq!(ds.record_assignment(InstanceId::new(2)).unwrap(), 2);
        assert!(matches!(
            ds.record_assignment(InstanceId::new(42)),
            Err(LabelingError::InstanceNotFound(id)) if id == InstanceId::new(42)
        ));
    }

    #[test]
    fn test_assigned_users_are_not_deduplicated() {
        let mut ds = sample();
        let user = User::new(5, "ada");
        ds.add_assigned_user(&user);
        ds.add_assigned_user(&user);
        assert_eq!(ds.total_assigned_users(), 2);
    }

    #[test]
    fn test_user_completeness_missing_data() {
        let mut ds = sample();
        let user = User::new(5, "ada");
        ds.add_assigned_user(&user);

        let users = vec![user];
        let err = ds.user_completeness_percentage(&users).unwrap_err();
        assert!(matches!(err, LabelingError::MissingData { .. }));
    }

    #[test]
    fn test_user_completeness_reads_stored_value() {
        let mut ds = sample();
        let mut user = User::new(5, "ada");
        user.set_completeness(ds.id(), 66.0);
        ds.add_assigned_user(&user);

        let result = ds.user_completeness_percentage(&vec![user]).unwrap();
        assert_eq!(result.get("ada"), Some(&66.0));
    }

    #[test]
    fn test_unknown_assigned_user() {
        let mut ds = sample();
        ds.add_assigned_user(&User::new(5, "ada"));
        let empty: Vec<User> = Vec::new();
        assert!(matches!(
            ds.user_consistency_percentage(&empty),
            Err(LabelingError::UserNotFound(_))
        ));
    }

    #[test]
    fn test_consistency_ignores_unknown_instances() {
        let mut ds = sample();
        let mut user = User::new(1, "ada");
        for instance in [1, 99, 99] {
            let target = InstanceRef::new(ds.id(), InstanceId::new(instance));
            let labels = vec![Label::new(1, "positive", ds.id())];
            user.record(LabelAssignment::new(user.id, target, labels).unwrap());
        }
        ds.add_assigned_user(&user);

        let users = vec![user];
        assert_eq!(ds.user_consistency_percentage(&users).unwrap()["user1"], 0.0);
        let dist = ds.distribution(users[0].assignments()).unwrap();
        assert_eq!(dist["positive"], 100.0);
    }
}
