//! CLI argument definitions.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "facility",
    version,
    about = "Facility checklist scheduling and inventory record tools",
    long_about = "Expand recurring checklist schedules into concrete tasks and\n\
                  convert inventory records between CSV and JSON."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow inventory field values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Settings file (default: platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List every occurrence of each checklist within a date range.
    Schedule(ScheduleArgs),

    /// Show the next occurrence of each checklist.
    Next(NextArgs),

    /// Print the IDs of checklists due on a date.
    Today(TodayArgs),

    /// Convert an inventory CSV file into canonical JSON records.
    Import(ImportArgs),

    /// Convert canonical JSON records into an inventory CSV file.
    Export(ExportArgs),

    /// Normalize a name or category the way stored records expect.
    Normalize {
        #[arg(value_enum)]
        kind: NormalizeKind,
        value: String,
    },
}

#[derive(Parser)]
pub struct ScheduleArgs {
    /// JSON file holding an array of scheduled checklists.
    #[arg(value_name = "CHECKLISTS")]
    pub checklists: PathBuf,

    /// First day of the range (inclusive).
    #[arg(long = "from", value_name = "YYYY-MM-DD")]
    pub from: NaiveDate,

    /// Last day of the range (inclusive).
    #[arg(long = "to", value_name = "YYYY-MM-DD")]
    pub to: NaiveDate,

    /// Print tasks as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct NextArgs {
    #[arg(value_name = "CHECKLISTS")]
    pub checklists: PathBuf,

    /// Search start (default: now, local time).
    #[arg(long = "from", value_name = "YYYY-MM-DDTHH:MM:SS")]
    pub from: Option<NaiveDateTime>,
}

#[derive(Parser)]
pub struct TodayArgs {
    #[arg(value_name = "CHECKLISTS")]
    pub checklists: PathBuf,

    /// Day to check (default: today, local time).
    #[arg(long = "date", value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,
}

#[derive(Parser)]
pub struct ImportArgs {
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Facility stamped onto every record (overrides settings).
    #[arg(long = "facility-id", value_name = "ID")]
    pub facility_id: Option<String>,

    /// Output file (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// JSON file holding an array of canonical records.
    #[arg(value_name = "JSON")]
    pub input: PathBuf,

    /// Output file (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum NormalizeKind {
    Name,
    Category,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
