//! Checklist recurrence configuration and the tasks it produces.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::{Frequency, Priority, TaskStatus, Weekday};
use crate::error::{ModelError, Result};

/// Time of day used when a schedule does not set one.
pub const DEFAULT_TIME: &str = "09:00";
/// Reward points used when a schedule does not set them.
pub const DEFAULT_POINTS: u32 = 10;
/// Estimated duration in minutes used when a schedule does not set one.
pub const DEFAULT_DURATION_MINUTES: u32 = 30;

/// External signals that may also start a checklist.
///
/// Informational only: the calendar scheduler never evaluates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Triggers {
    pub room_status: bool,
    pub staff_schedule: bool,
    pub admin_decision: bool,
}

/// Recurrence settings attached to a checklist with scheduling enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceConfig {
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<Weekday>,
    /// "HH:MM", 24-hour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub triggers: Triggers,
}

impl RecurrenceConfig {
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            day: None,
            time: None,
            priority: Priority::default(),
            points: None,
            duration_minutes: None,
            triggers: Triggers::default(),
        }
    }

    #[must_use]
    pub fn with_day(mut self, day: Weekday) -> Self {
        self.day = Some(day);
        self
    }

    #[must_use]
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_points(mut self, points: u32) -> Self {
        self.points = Some(points);
        self
    }

    #[must_use]
    pub fn with_duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    pub fn points_or_default(&self) -> u32 {
        self.points.unwrap_or(DEFAULT_POINTS)
    }

    pub fn duration_or_default(&self) -> u32 {
        self.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES)
    }

    /// Check the combination of fields before the config is stored.
    ///
    /// The scheduler itself never calls this; it treats anything that
    /// slips through as "never matches".
    pub fn validate(&self) -> Result<()> {
        if self.frequency.requires_day() && self.day.is_none() {
            return Err(ModelError::MissingDay {
                frequency: self.frequency,
            });
        }
        if let Some(time) = &self.time
            && parse_time_of_day(time).is_none()
        {
            return Err(ModelError::InvalidTime(time.clone()));
        }
        if self.duration_minutes == Some(0) {
            return Err(ModelError::InvalidDuration);
        }
        Ok(())
    }
}

/// Parse a strict `HH:MM` 24-hour time.
///
/// Both components must be exactly two digits.
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let (hours, minutes) = value.trim().split_once(':')?;
    if hours.len() != 2 || minutes.len() != 2 {
        return None;
    }
    if !hours.chars().chain(minutes.chars()).all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    NaiveTime::from_hms_opt(hours, minutes, 0)
}

/// A checklist with scheduling enabled, as handed to the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledChecklist {
    pub checklist_id: String,
    pub checklist_title: String,
    pub schedule: RecurrenceConfig,
}

impl ScheduledChecklist {
    pub fn new(
        checklist_id: impl Into<String>,
        checklist_title: impl Into<String>,
        schedule: RecurrenceConfig,
    ) -> Self {
        Self {
            checklist_id: checklist_id.into(),
            checklist_title: checklist_title.into(),
            schedule,
        }
    }
}

/// One concrete occurrence of a recurring checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    pub id: Uuid,
    pub checklist_id: String,
    pub checklist_title: String,
    pub scheduled_for: NaiveDateTime,
    pub priority: Priority,
    pub points: u32,
    /// Minutes.
    pub estimated_duration: u32,
    pub status: TaskStatus,
}

impl ScheduledTask {
    /// Create a pending task for `checklist` at `scheduled_for`.
    pub fn pending(checklist: &ScheduledChecklist, scheduled_for: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            checklist_id: checklist.checklist_id.clone(),
            checklist_title: checklist.checklist_title.clone(),
            scheduled_for,
            priority: checklist.schedule.priority,
            points: checklist.schedule.points_or_default(),
            estimated_duration: checklist.schedule.duration_or_default(),
            status: TaskStatus::Pending,
        }
    }
}
