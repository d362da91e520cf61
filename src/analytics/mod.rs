//! Dataset analytics
//!
//! Every function here is a pure computation over borrowed state: nothing
//! is cached, and calling twice with the same inputs yields the same
//! result. [`crate::Dataset`] exposes these as methods; the free functions
//! are public so each phase can be used and tested on its own.
//!
//! # Metrics
//!
//! - **Completeness**: share of instances with at least one assignment
//! - **Distribution**: per label, share of assignments carrying it
//! - **Coverage**: per label, number of distinct instances that received it
//! - **Consistency**: per user, share of repeatedly labeled instances that
//!   got the same labels every time

pub mod completeness;
pub mod consistency;
pub mod coverage;
pub mod distribution;
mod report;

pub use consistency::{
    ConsistencyScore, InstanceHistory, LabelSequence, OrderSensitive, SequenceEquality, SetBased,
};
pub use report::{DatasetReport, UserReport};

/// `100 * part / whole`; callers guarantee `whole > 0`
pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    part as f64 * 100.0 / whole as f64
}
