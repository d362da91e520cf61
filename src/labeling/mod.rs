//! Core labeling data structures

mod assignment;
mod dataset;
mod engine;
mod instance;
mod label;
mod record;
mod user;


pub use assignment::{InstanceRef, LabelAssignment};
pub use dataset::{Dataset, DatasetId, InstanceIndex};
pub use engine::{LabelingEngine, LabelingError, LabelingResult};
pub use instance::{Instance, InstanceId};
pub use label::{Label, LabelId};
pub use record::{InstanceRecord, LabelRecord, RecordKind};
pub use user::{user_key, User, UserDirectory, UserId};
