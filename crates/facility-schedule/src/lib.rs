//! Recurrence scheduling for facility checklists.
//!
//! - **rules**: which calendar days a frequency fires on
//! - **scheduler**: occurrence enumeration and next-occurrence search
//! - **options**: default time of day and lookahead bound

pub mod options;
pub mod rules;
pub mod scheduler;

pub use options::{DEFAULT_LOOKAHEAD_DAYS, SchedulerOptions};
pub use rules::{epoch_week_number, should_schedule_on_date};
pub use scheduler::{NextOccurrence, RecurrenceScheduler};
