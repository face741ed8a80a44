//! Occurrence enumeration over a date window.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use facility_model::{RecurrenceConfig, ScheduledChecklist, ScheduledTask, parse_time_of_day};

use crate::options::SchedulerOptions;
use crate::rules::should_schedule_on_date;

/// Outcome of a forward search for the next occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextOccurrence {
    /// The frequency is event-driven (or missing its day) and has no
    /// calendar occurrences at all.
    NotScheduled,
    /// Calendar-based, but nothing matched before `until` (exclusive).
    NoneWithin { until: NaiveDate },
    Found(NaiveDateTime),
}

impl NextOccurrence {
    pub fn found(self) -> Option<NaiveDateTime> {
        match self {
            NextOccurrence::Found(at) => Some(at),
            NextOccurrence::NotScheduled | NextOccurrence::NoneWithin { .. } => None,
        }
    }
}

/// Pure calendar computation over recurrence configs.
///
/// Holds only immutable options, so one instance can be shared freely.
/// The current date is always passed in by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecurrenceScheduler {
    options: SchedulerOptions,
}

impl RecurrenceScheduler {
    pub fn new(options: SchedulerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SchedulerOptions {
        &self.options
    }

    /// Time of day for occurrences of `config`.
    pub fn time_of_day(&self, config: &RecurrenceConfig) -> NaiveTime {
        match config.time.as_deref() {
            None => self.options.default_time,
            Some(raw) => parse_time_of_day(raw).unwrap_or_else(|| {
                debug!(time = raw, "unreadable schedule time, using default");
                self.options.default_time
            }),
        }
    }

    /// One pending task per matching day in `start..=end`, ascending.
    ///
    /// An inverted window yields no tasks.
    pub fn generate_occurrences(
        &self,
        checklist: &ScheduledChecklist,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<ScheduledTask> {
        if start > end {
            return Vec::new();
        }
        let config = &checklist.schedule;
        if !config.frequency.is_calendar_based() {
            return Vec::new();
        }
        let time = self.time_of_day(config);
        let tasks: Vec<ScheduledTask> = start
            .iter_days()
            .take_while(|day| *day <= end)
            .filter(|day| should_schedule_on_date(config, *day))
            .map(|day| ScheduledTask::pending(checklist, day.and_time(time)))
            .collect();
        debug!(
            checklist_id = %checklist.checklist_id,
            frequency = %config.frequency,
            %start,
            %end,
            count = tasks.len(),
            "generated occurrences"
        );
        tasks
    }

    /// The first occurrence at or after `from`, scanning at most
    /// `lookahead_days` calendar days.
    ///
    /// `None` covers both "not calendar-scheduled" and "nothing within
    /// the lookahead"; use [`Self::next_occurrence_detailed`] to tell
    /// them apart.
    pub fn next_occurrence(
        &self,
        config: &RecurrenceConfig,
        from: NaiveDateTime,
    ) -> Option<NaiveDateTime> {
        self.next_occurrence_detailed(config, from).found()
    }

    pub fn next_occurrence_detailed(
        &self,
        config: &RecurrenceConfig,
        from: NaiveDateTime,
    ) -> NextOccurrence {
        if !config.frequency.is_calendar_based()
            || (config.frequency.requires_day() && config.day.is_none())
        {
            return NextOccurrence::NotScheduled;
        }
        let time = self.time_of_day(config);
        let first_day = from.date();
        for offset in 0..u64::from(self.options.lookahead_days) {
            let Some(day) = first_day.checked_add_days(Days::new(offset)) else {
                break;
            };
            if !should_schedule_on_date(config, day) {
                continue;
            }
            let at = day.and_time(time);
            if at >= from {
                return NextOccurrence::Found(at);
            }
        }
        let until = first_day
            .checked_add_days(Days::new(u64::from(self.options.lookahead_days)))
            .unwrap_or(NaiveDate::MAX);
        NextOccurrence::NoneWithin { until }
    }

    /// IDs of the checklists that fire on `today`, in input order.
    pub fn scheduled_today(
        &self,
        checklists: &[ScheduledChecklist],
        today: NaiveDate,
    ) -> Vec<String> {
        checklists
            .iter()
            .filter(|checklist| should_schedule_on_date(&checklist.schedule, today))
            .map(|checklist| checklist.checklist_id.clone())
            .collect()
    }
}
