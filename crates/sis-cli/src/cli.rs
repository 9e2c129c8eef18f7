//! CLI argument definitions for the student registry.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "sis",
    version,
    about = "Student registry - manage enrollment records",
    long_about = "Manage student enrollment records.\n\n\
                  Creates structured enrollment numbers per cohort, imports CSV\n\
                  batches with per-line reconciliation, and exports the registry\n\
                  as CSV."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Registry snapshot file holding the student records.
    #[arg(
        long = "registry",
        value_name = "PATH",
        default_value = "students.json",
        global = true
    )]
    pub registry: PathBuf,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a student with a freshly allocated enrollment number.
    Create(CreateArgs),

    /// List all students.
    List(ListArgs),

    /// Show one student by internal id.
    Get(GetArgs),

    /// Update a student's name and date of birth.
    Update(UpdateArgs),

    /// Delete a student by internal id.
    Delete(GetArgs),

    /// Import students from a CSV file.
    Import(ImportArgs),

    /// Export all students as CSV.
    Export(ExportArgs),
}

#[derive(Parser)]
pub struct CreateArgs {
    /// Faculty code of the cohort (e.g. C).
    #[arg(long)]
    pub faculty: String,

    /// Level code of the cohort (e.g. 1).
    #[arg(long)]
    pub level: String,

    /// Program code of the cohort (e.g. 42).
    #[arg(long)]
    pub program: String,

    /// Cohort year code (e.g. 3 or 2026).
    #[arg(long)]
    pub year: String,

    /// First name (required, non-empty).
    #[arg(long = "first-name")]
    pub first_name: String,

    /// Last name (optional).
    #[arg(long = "last-name")]
    pub last_name: Option<String>,

    /// Date of birth, ISO-8601 (YYYY-MM-DD).
    #[arg(long)]
    pub dob: chrono::NaiveDate,
}

#[derive(Parser)]
pub struct ListArgs {
    /// Print records as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct GetArgs {
    /// Internal student id (UUID).
    #[arg(value_name = "ID")]
    pub id: sis_model::StudentId,
}

#[derive(Parser)]
pub struct UpdateArgs {
    /// Internal student id (UUID).
    #[arg(value_name = "ID")]
    pub id: sis_model::StudentId,

    /// New first name (required, non-empty).
    #[arg(long = "first-name")]
    pub first_name: String,

    /// New last name; omit to clear it.
    #[arg(long = "last-name")]
    pub last_name: Option<String>,

    /// New date of birth, ISO-8601 (YYYY-MM-DD).
    #[arg(long)]
    pub dob: chrono::NaiveDate,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// CSV file to import (columns: enrollment number, first name,
    /// last name, date of birth).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print the outcome as JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Exit 0 even when lines were rejected as duplicate or invalid.
    #[arg(long)]
    pub lenient: bool,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Output file (default: timestamped name in the working directory).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
