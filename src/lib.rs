//! Labelscope: analytics for crowd-sourced text labeling
//!
//! Users attach labels from a fixed label set to the text instances of a
//! dataset. Labelscope answers how complete and how consistent that effort
//! is.
//!
//! # Core Concepts
//!
//! - **Dataset**: aggregate root owning instances and labels, referencing
//!   the users assigned to it
//! - **LabelAssignment**: one user giving one instance an ordered,
//!   non-empty sequence of labels
//! - **Analytics**: completeness, label distribution, per-label coverage
//!   and per-user consistency, recomputed on every call
//!
//! # Example
//!
//! ```
//! use labelscope::{Dataset, InstanceId};
//! use serde_json::json;
//!
//! let mut dataset = Dataset::new(1, "reviews", 2);
//! dataset
//!     .add_instances(&[
//!         json!({"id": 1, "instance": "great"}),
//!         json!({"id": 2, "instance": "bad"}),
//!     ])
//!     .unwrap();
//! dataset.record_assignment(InstanceId::new(1)).unwrap();
//! assert_eq!(dataset.completeness().unwrap(), 50.0);
//! ```

pub mod analytics;
pub mod config;
mod labeling;

pub use analytics::{
    ConsistencyScore, DatasetReport, InstanceHistory, OrderSensitive, SequenceEquality, SetBased,
    UserReport,
};
pub use config::{ConsistencyMode, EngineConfig};
pub use labeling::{
    user_key, Dataset, DatasetId, Instance, InstanceId, InstanceIndex, InstanceRecord,
    InstanceRef, Label, LabelAssignment, LabelId, LabelRecord, LabelingEngine, LabelingError,
    LabelingResult, RecordKind, User, UserDirectory, UserId,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
