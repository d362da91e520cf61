//! Per-user labeling consistency
//!
//! Computed in two phases. [`group_by_instance`] walks a user's assignments
//! once and collects, per instance, every label sequence the user gave it.
//! [`score`] then counts the recurrent instances (labeled more than once)
//! and how many of those got equal sequences every time.
//!
//! What "equal" means is pluggable through [`SequenceEquality`].
//! [`OrderSensitive`] treats `["a", "b"]` and `["b", "a"]` as different
//! labelings; [`SetBased`] does not.

use super::percentage;
use crate::labeling::{Dataset, InstanceId, LabelAssignment};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Label texts of one assignment, in submission order
pub type LabelSequence = Vec<String>;

/// Pluggable comparison of two label sequences
pub trait SequenceEquality: Send + Sync {
    fn equal(&self, a: &[String], b: &[String]) -> bool;
}

/// Sequences are equal when they hold the same labels in the same order
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderSensitive;

impl SequenceEquality for OrderSensitive {
    fn equal(&self, a: &[String], b: &[String]) -> bool {
        a == b
    }
}

/// Sequences are equal when they hold the same set of labels
#[derive(Debug, Clone, Copy, Default)]
pub struct SetBased;

impl SequenceEquality for SetBased {
    fn equal(&self, a: &[String], b: &[String]) -> bool {
        let a: BTreeSet<&String> = a.iter().collect();
        let b: BTreeSet<&String> = b.iter().collect();
        a == b
    }
}

/// Label sequences per instance, in the order the assignments were given
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstanceHistory {
    sequences: BTreeMap<InstanceId, Vec<LabelSequence>>,
}

impl InstanceHistory {
    /// All sequences recorded for one instance
    pub fn get(&self, instance: InstanceId) -> Option<&[LabelSequence]> {
        self.sequences.get(&instance).map(Vec::as_slice)
    }

    /// Number of distinct instances seen
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (InstanceId, &[LabelSequence])> {
        self.sequences.iter().map(|(id, s)| (*id, s.as_slice()))
    }

    /// Instances labeled more than once
    pub fn recurrent(&self) -> impl Iterator<Item = (InstanceId, &[LabelSequence])> {
        self.iter().filter(|(_, s)| s.len() > 1)
    }
}

/// Group the assignments that target `dataset` by instance.
///
/// Only assignments resolving to one of the dataset's instances are kept.
/// Other datasets and unknown instance ids are dropped.
pub fn group_by_instance<'a, I>(dataset: &Dataset, assignments: I) -> InstanceHistory
where
    I: IntoIterator<Item = &'a LabelAssignment>,
{
    let index = dataset.instance_index();
    let mut sequences: BTreeMap<InstanceId, Vec<LabelSequence>> = BTreeMap::new();
    for assignment in assignments {
        if index.resolve(assignment).is_none() {
            continue;
        }
        sequences
            .entry(assignment.instance().instance)
            .or_default()
            .push(assignment.label_texts().map(str::to_string).collect());
    }
    InstanceHistory { sequences }
}

/// Counts behind a consistency percentage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConsistencyScore {
    /// Instances labeled more than once
    pub recurrent: usize,
    /// Recurrent instances whose sequences were all equal
    pub consistent: usize,
}

impl ConsistencyScore {
    /// `100 * consistent / recurrent`, or `0.0` with no recurrent instances
    pub fn percentage(&self) -> f64 {
        if self.recurrent == 0 {
            0.0
        } else {
            percentage(self.consistent, self.recurrent)
        }
    }
}

/// Score a grouped history
pub fn score(history: &InstanceHistory, equality: &dyn SequenceEquality) -> ConsistencyScore {
    let mut result = ConsistencyScore::default();
    for (_, sequences) in history.recurrent() {
        result.recurrent += 1;
        let first = &sequences[0];
        if sequences[1..].iter().all(|s| equality.equal(first, s)) {
            result.consistent += 1;
        }
    }
    result
}
