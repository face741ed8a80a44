//! Data model for facility checklists and inventory.
//!
//! - **recurrence**: checklist schedules and the tasks they generate
//! - **inventory**: the canonical inventory record and sparse patches
//! - **extension**: the typed extension bag stored as a JSON blob
//! - **shapes**: persistence and wire shapes of an inventory record

pub mod enums;
pub mod error;
pub mod extension;
pub mod inventory;
pub mod recurrence;
pub mod shapes;

pub use enums::{Frequency, Priority, TaskStatus, Weekday};
pub use error::{ModelError, Result};
pub use extension::{ExtensionBag, ExtensionPatch, is_typed_key};
pub use inventory::{CanonicalInventoryRecord, RecordPatch};
pub use recurrence::{
    DEFAULT_DURATION_MINUTES, DEFAULT_POINTS, DEFAULT_TIME, RecurrenceConfig, ScheduledChecklist,
    ScheduledTask, Triggers, parse_time_of_day,
};
pub use shapes::{PersistenceRow, WireRecord};
