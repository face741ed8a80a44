use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{Local, Utc};
use tracing::{info, info_span, trace, warn};

use facility_model::{CanonicalInventoryRecord, ScheduledChecklist, ScheduledTask};
use facility_schedule::{NextOccurrence, RecurrenceScheduler};
use facility_transform::{CsvImportOptions, from_csv_with, normalize_category, normalize_name, write_csv};

use crate::cli::{ExportArgs, ImportArgs, NextArgs, NormalizeKind, ScheduleArgs, TodayArgs};
use crate::summary::{print_next, print_tasks};
use facility_cli::logging::redact_value;
use facility_cli::settings::Settings;

fn load_checklists(path: &Path) -> Result<Vec<ScheduledChecklist>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let entries: Vec<serde_json::Value> = serde_json::from_str(&content)
        .with_context(|| format!("parse checklists from {}", path.display()))?;
    let mut checklists = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<ScheduledChecklist>(entry) {
            Ok(checklist) => checklists.push(checklist),
            Err(error) => warn!(index, %error, "skipping unreadable checklist"),
        }
    }
    for checklist in &checklists {
        if let Err(error) = checklist.schedule.validate() {
            warn!(
                checklist_id = %checklist.checklist_id,
                %error,
                "checklist schedule will never fire"
            );
        }
    }
    info!(count = checklists.len(), "loaded checklists");
    Ok(checklists)
}

/// Stdout unless a path is given.
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

pub fn run_schedule(args: &ScheduleArgs, settings: &Settings) -> Result<()> {
    let span = info_span!("schedule", from = %args.from, to = %args.to);
    let _guard = span.enter();
    if args.to < args.from {
        bail!("--to {} is before --from {}", args.to, args.from);
    }
    let scheduler = RecurrenceScheduler::new(settings.scheduler.to_options());
    let checklists = load_checklists(&args.checklists)?;
    let mut tasks: Vec<ScheduledTask> = checklists
        .iter()
        .flat_map(|checklist| scheduler.generate_occurrences(checklist, args.from, args.to))
        .collect();
    tasks.sort_by(|a, b| a.scheduled_for.cmp(&b.scheduled_for));
    info!(tasks = tasks.len(), "generated occurrences");

    if args.json {
        let json = serde_json::to_string_pretty(&tasks).context("serialize tasks")?;
        println!("{json}");
    } else {
        print_tasks(&tasks);
    }
    Ok(())
}

pub fn run_next(args: &NextArgs, settings: &Settings) -> Result<()> {
    let from = args.from.unwrap_or_else(|| Local::now().naive_local());
    let span = info_span!("next", %from);
    let _guard = span.enter();
    let scheduler = RecurrenceScheduler::new(settings.scheduler.to_options());
    let rows: Vec<(String, NextOccurrence)> = load_checklists(&args.checklists)?
        .into_iter()
        .map(|checklist| {
            let next = scheduler.next_occurrence_detailed(&checklist.schedule, from);
            (checklist.checklist_title, next)
        })
        .collect();
    print_next(&rows);
    Ok(())
}

pub fn run_today(args: &TodayArgs, settings: &Settings) -> Result<()> {
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let span = info_span!("today", %date);
    let _guard = span.enter();
    let scheduler = RecurrenceScheduler::new(settings.scheduler.to_options());
    let checklists = load_checklists(&args.checklists)?;
    for id in scheduler.scheduled_today(&checklists, date) {
        println!("{id}");
    }
    Ok(())
}

pub fn run_import(args: &ImportArgs, settings: &Settings) -> Result<()> {
    let span = info_span!("import", input = %args.input.display());
    let _guard = span.enter();
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("read {}", args.input.display()))?;
    let options = CsvImportOptions {
        facility_id: args
            .facility_id
            .clone()
            .or_else(|| settings.import.facility_id.clone()),
        imported_at: Some(Utc::now()),
    };
    let records = from_csv_with(&text, &options);
    for record in &records {
        trace!(id = %record.id, name = redact_value(&record.name), "imported record");
    }
    info!(records = records.len(), "imported csv");

    let mut output = open_output(args.output.as_deref())?;
    serde_json::to_writer_pretty(&mut output, &records).context("write records")?;
    writeln!(output).context("write records")?;
    output.flush().context("flush output")?;
    Ok(())
}

pub fn run_export(args: &ExportArgs) -> Result<()> {
    let span = info_span!("export", input = %args.input.display());
    let _guard = span.enter();
    let content = std::fs::read_to_string(&args.input)
        .with_context(|| format!("read {}", args.input.display()))?;
    let records: Vec<CanonicalInventoryRecord> = serde_json::from_str(&content)
        .with_context(|| format!("parse records from {}", args.input.display()))?;
    let output = open_output(args.output.as_deref())?;
    write_csv(&records, output).context("write csv")?;
    info!(records = records.len(), "exported csv");
    Ok(())
}

pub fn run_normalize(kind: NormalizeKind, value: &str) {
    let normalized = match kind {
        NormalizeKind::Name => normalize_name(value),
        NormalizeKind::Category => normalize_category(value),
    };
    println!("{normalized}");
}
