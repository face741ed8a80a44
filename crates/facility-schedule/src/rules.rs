//! Per-frequency day selection.
//!
//! Each rule looks at the calendar date only; time of day never matters.

use chrono::{Datelike, NaiveDate};

use facility_model::{Frequency, RecurrenceConfig, Weekday};

const QUARTER_START_MONTHS: [u32; 4] = [1, 4, 7, 10];
/// `num_days_from_ce` of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// Whole weeks elapsed since 1970-01-01 for `date` at midnight UTC.
///
/// Weeks are counted in blocks of seven days from the epoch, so they
/// begin on Thursdays. Bi-weekly alternation is anchored here rather than
/// to when a checklist was created.
pub fn epoch_week_number(date: NaiveDate) -> i64 {
    let days = i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE;
    days.div_euclid(7)
}

/// Returns true if a checklist with `config` fires on `date`.
///
/// `per_patient`, `custom` and unrecognized frequencies never match, nor
/// do weekly schedules without a day.
pub fn should_schedule_on_date(config: &RecurrenceConfig, date: NaiveDate) -> bool {
    match config.frequency {
        Frequency::Daily => true,
        Frequency::Weekly => falls_on(config.day, date),
        Frequency::BiWeekly => falls_on(config.day, date) && epoch_week_number(date) % 2 == 0,
        Frequency::Monthly => date.day() == 1,
        Frequency::Quarterly => date.day() == 1 && QUARTER_START_MONTHS.contains(&date.month()),
        Frequency::PerPatient | Frequency::Custom | Frequency::Unrecognized => false,
    }
}

fn falls_on(day: Option<Weekday>, date: NaiveDate) -> bool {
    day.is_some_and(|day| day.to_chrono() == date.weekday())
}
