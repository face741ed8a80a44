//! Tests for occurrence enumeration.

use chrono::{Datelike, Days, NaiveDate, NaiveTime};
use facility_model::{Frequency, RecurrenceConfig, ScheduledChecklist, TaskStatus, Weekday};
use facility_schedule::{RecurrenceScheduler, SchedulerOptions};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn checklist(config: RecurrenceConfig) -> ScheduledChecklist {
    ScheduledChecklist::new("chk-1", "Patient room turnover", config)
}

#[test]
fn daily_emits_one_task_per_day_inclusive() {
    let scheduler = RecurrenceScheduler::default();
    let tasks = scheduler.generate_occurrences(
        &checklist(RecurrenceConfig::new(Frequency::Daily)),
        date(2024, 2, 27),
        date(2024, 3, 2),
    );
    let days: Vec<NaiveDate> = tasks.iter().map(|t| t.scheduled_for.date()).collect();
    assert_eq!(
        days,
        vec![
            date(2024, 2, 27),
            date(2024, 2, 28),
            date(2024, 2, 29),
            date(2024, 3, 1),
            date(2024, 3, 2),
        ]
    );
    assert!(tasks.iter().all(|t| t.status == TaskStatus::Pending));
    assert!(
        tasks
            .iter()
            .all(|t| t.scheduled_for.time() == NaiveTime::from_hms_opt(9, 0, 0).unwrap())
    );
}

#[test]
fn daily_uses_configured_time() {
    let scheduler = RecurrenceScheduler::default();
    let tasks = scheduler.generate_occurrences(
        &checklist(RecurrenceConfig::new(Frequency::Daily).with_time("07:15")),
        date(2024, 1, 1),
        date(2024, 1, 1),
    );
    assert_eq!(tasks.len(), 1);
    assert_eq!(
        tasks[0].scheduled_for.time(),
        NaiveTime::from_hms_opt(7, 15, 0).unwrap()
    );
}

#[test]
fn task_ids_are_unique() {
    let scheduler = RecurrenceScheduler::default();
    let tasks = scheduler.generate_occurrences(
        &checklist(RecurrenceConfig::new(Frequency::Daily)),
        date(2024, 1, 1),
        date(2024, 1, 10),
    );
    let mut ids: Vec<_> = tasks.iter().map(|t| t.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 10);
}

#[test]
fn weekly_monday_over_two_weeks() {
    let scheduler = RecurrenceScheduler::default();
    let config = RecurrenceConfig::new(Frequency::Weekly).with_day(Weekday::Monday);
    for offset in 0..7 {
        let start = date(2024, 6, 1) + Days::new(offset);
        let end = start + Days::new(13);
        let tasks = scheduler.generate_occurrences(&checklist(config.clone()), start, end);
        assert_eq!(tasks.len(), 2, "window starting {start}");
        assert!(
            tasks
                .iter()
                .all(|t| t.scheduled_for.weekday() == chrono::Weekday::Mon)
        );
    }
}

#[test]
fn bi_weekly_monday_over_four_weeks() {
    let scheduler = RecurrenceScheduler::default();
    let config = RecurrenceConfig::new(Frequency::BiWeekly).with_day(Weekday::Monday);
    for offset in 0..14 {
        let start = date(2024, 6, 1) + Days::new(offset);
        let end = start + Days::new(27);
        let tasks = scheduler.generate_occurrences(&checklist(config.clone()), start, end);
        assert!(
            (1..=2).contains(&tasks.len()),
            "window starting {start} produced {}",
            tasks.len()
        );
        if let [first, second] = tasks.as_slice() {
            assert_eq!((second.scheduled_for - first.scheduled_for).num_days(), 14);
        }
    }
}

#[test]
fn bi_weekly_alternation_is_anchored_to_epoch() {
    let scheduler = RecurrenceScheduler::default();
    let config = RecurrenceConfig::new(Frequency::BiWeekly).with_day(Weekday::Monday);
    let tasks = scheduler.generate_occurrences(
        &checklist(config),
        date(2024, 1, 1),
        date(2024, 1, 31),
    );
    // 2024-01-01 is day 19723 since the epoch, week 2817 (odd).
    let days: Vec<NaiveDate> = tasks.iter().map(|t| t.scheduled_for.date()).collect();
    assert_eq!(days, vec![date(2024, 1, 8), date(2024, 1, 22)]);
}

#[test]
fn monthly_over_one_month() {
    let scheduler = RecurrenceScheduler::default();
    let tasks = scheduler.generate_occurrences(
        &checklist(RecurrenceConfig::new(Frequency::Monthly)),
        date(2024, 2, 1),
        date(2024, 2, 29),
    );
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].scheduled_for.date(), date(2024, 2, 1));
}

#[test]
fn quarterly_over_one_year() {
    let scheduler = RecurrenceScheduler::default();
    let tasks = scheduler.generate_occurrences(
        &checklist(RecurrenceConfig::new(Frequency::Quarterly)),
        date(2024, 1, 1),
        date(2024, 12, 31),
    );
    let days: Vec<NaiveDate> = tasks.iter().map(|t| t.scheduled_for.date()).collect();
    assert_eq!(
        days,
        vec![
            date(2024, 1, 1),
            date(2024, 4, 1),
            date(2024, 7, 1),
            date(2024, 10, 1)
        ]
    );
}

#[test]
fn per_patient_and_custom_are_never_scheduled() {
    let scheduler = RecurrenceScheduler::default();
    for frequency in [Frequency::PerPatient, Frequency::Custom] {
        let tasks = scheduler.generate_occurrences(
            &checklist(RecurrenceConfig::new(frequency)),
            date(2020, 1, 1),
            date(2024, 12, 31),
        );
        assert!(tasks.is_empty());
    }
}

#[test]
fn inverted_window_is_empty() {
    let scheduler = RecurrenceScheduler::default();
    let tasks = scheduler.generate_occurrences(
        &checklist(RecurrenceConfig::new(Frequency::Daily)),
        date(2024, 1, 10),
        date(2024, 1, 1),
    );
    assert!(tasks.is_empty());
}

#[test]
fn custom_next_occurrence_is_none() {
    let scheduler = RecurrenceScheduler::default();
    let config = RecurrenceConfig::new(Frequency::Custom);
    for day in [date(2024, 1, 1), date(1999, 12, 31), date(2030, 7, 4)] {
        assert_eq!(
            scheduler.next_occurrence(&config, day.and_hms_opt(0, 0, 0).unwrap()),
            None
        );
    }
}

#[test]
fn next_quarterly_occurrence() {
    let scheduler = RecurrenceScheduler::default();
    let config = RecurrenceConfig::new(Frequency::Quarterly).with_time("06:30");
    let next = scheduler.next_occurrence(&config, date(2024, 4, 2).and_hms_opt(0, 0, 0).unwrap());
    assert_eq!(next, Some(date(2024, 7, 1).and_hms_opt(6, 30, 0).unwrap()));
}

#[test]
fn next_occurrence_respects_lookahead() {
    let scheduler = RecurrenceScheduler::new(SchedulerOptions::new().with_lookahead_days(10));
    let config = RecurrenceConfig::new(Frequency::Monthly);
    let from = date(2024, 1, 2).and_hms_opt(0, 0, 0).unwrap();
    assert_eq!(scheduler.next_occurrence(&config, from), None);
}

#[test]
fn scheduled_today_filters_in_order() {
    let scheduler = RecurrenceScheduler::default();
    let checklists = vec![
        ScheduledChecklist::new("daily", "Daily wipe-down", RecurrenceConfig::new(Frequency::Daily)),
        ScheduledChecklist::new(
            "per-patient",
            "Discharge clean",
            RecurrenceConfig::new(Frequency::PerPatient),
        ),
        ScheduledChecklist::new(
            "monday",
            "Weekly fridge check",
            RecurrenceConfig::new(Frequency::Weekly).with_day(Weekday::Monday),
        ),
        ScheduledChecklist::new("monthly", "Monthly audit", RecurrenceConfig::new(Frequency::Monthly)),
    ];
    // 2024-01-01 is a Monday and the first of the month.
    assert_eq!(
        scheduler.scheduled_today(&checklists, date(2024, 1, 1)),
        vec!["daily", "monday", "monthly"]
    );
    assert_eq!(
        scheduler.scheduled_today(&checklists, date(2024, 1, 2)),
        vec!["daily"]
    );
}

proptest! {
    #[test]
    fn daily_count_matches_window(start_offset in 0u64..20_000, len in 0u64..120) {
        let scheduler = RecurrenceScheduler::default();
        let start = date(1990, 1, 1) + Days::new(start_offset);
        let end = start + Days::new(len);
        let tasks = scheduler.generate_occurrences(
            &checklist(RecurrenceConfig::new(Frequency::Daily)),
            start,
            end,
        );
        prop_assert_eq!(tasks.len() as u64, len + 1);
        prop_assert!(tasks.windows(2).all(|pair| pair[0].scheduled_for < pair[1].scheduled_for));
    }

    #[test]
    fn bi_weekly_never_exceeds_two_in_four_weeks(start_offset in 0u64..20_000, day in 0usize..7) {
        let days = [
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
            Weekday::Saturday,
            Weekday::Sunday,
        ];
        let scheduler = RecurrenceScheduler::default();
        let start = date(1990, 1, 1) + Days::new(start_offset);
        let end = start + Days::new(27);
        let config = RecurrenceConfig::new(Frequency::BiWeekly).with_day(days[day]);
        let tasks = scheduler.generate_occurrences(&checklist(config), start, end);
        prop_assert!((1..=2).contains(&tasks.len()));
    }

    #[test]
    fn next_occurrence_is_never_before_from(start_offset in 0u64..20_000, hour in 0u32..24) {
        let scheduler = RecurrenceScheduler::default();
        let from = (date(1990, 1, 1) + Days::new(start_offset))
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        for config in [
            RecurrenceConfig::new(Frequency::Daily),
            RecurrenceConfig::new(Frequency::Weekly).with_day(Weekday::Wednesday),
            RecurrenceConfig::new(Frequency::Monthly),
            RecurrenceConfig::new(Frequency::Quarterly),
        ] {
            let next = scheduler.next_occurrence(&config, from);
            prop_assert!(next.is_some_and(|at| at >= from));
        }
    }
}
