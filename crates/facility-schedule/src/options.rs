//! Scheduler configuration.

use chrono::NaiveTime;

use facility_model::{DEFAULT_TIME, parse_time_of_day};

/// Days scanned by `next_occurrence` before giving up.
pub const DEFAULT_LOOKAHEAD_DAYS: u32 = 365;

/// Immutable settings shared by every scheduler call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerOptions {
    /// Time of day used when a schedule has none (or an unreadable one).
    pub default_time: NaiveTime,
    /// Upper bound for the forward scan in `next_occurrence`.
    pub lookahead_days: u32,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            default_time: parse_time_of_day(DEFAULT_TIME).unwrap_or(NaiveTime::MIN),
            lookahead_days: DEFAULT_LOOKAHEAD_DAYS,
        }
    }
}

impl SchedulerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_default_time(mut self, time: NaiveTime) -> Self {
        self.default_time = time;
        self
    }

    #[must_use]
    pub fn with_lookahead_days(mut self, days: u32) -> Self {
        self.lookahead_days = days;
        self
    }
}
