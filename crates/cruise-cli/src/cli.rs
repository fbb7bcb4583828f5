//! CLI argument definitions for the cruise publishing pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cruise",
    version,
    about = "CTD cruise publisher - join casts and export convention-ready NetCDF",
    long_about = "Join single-cast CTD profiles into one cruise dataset, fill and order\n\
                  its CF/ACDD metadata, audit completeness, and export NetCDF classic."
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
    /// Run the full pipeline: load casts, join, conventionalize, export.
    Process(ProcessArgs),

    /// Audit a written NetCDF file for metadata completeness.
    Audit(AuditArgs),

    /// Print the attribute schema (canonical order and required sets).
    Schema,
}

#[derive(Parser)]
pub struct ProcessArgs {
    /// Directory containing cast files, scanned non-recursively.
    #[arg(value_name = "CAST_DIR", required_unless_present = "files")]
    pub cast_dir: Option<PathBuf>,

    /// Explicit cast files to load instead of scanning a directory.
    #[arg(long = "file", value_name = "PATH", conflicts_with = "cast_dir")]
    pub files: Vec<PathBuf>,

    /// Output directory for the exported file (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output file name without extension (default: the dataset 'id').
    #[arg(long = "file-name", value_name = "NAME")]
    pub file_name: Option<String>,

    /// Depth-indexed variables to retain; all others are dropped.
    /// May be repeated. Omit to keep every variable.
    #[arg(long = "retain", value_name = "VAR")]
    pub retain: Vec<String>,

    /// Chlorophyll calibration slope A (output = A * input + B).
    #[arg(long = "calibrate-a", value_name = "A", requires = "calibrate_input")]
    pub calibrate_a: Option<f64>,

    /// Chlorophyll calibration offset B.
    #[arg(long = "calibrate-b", value_name = "B", requires = "calibrate_input")]
    pub calibrate_b: Option<f64>,

    /// Variable holding the uncalibrated chlorophyll readings.
    #[arg(
        long = "calibrate-input",
        value_name = "VAR",
        requires = "calibrate_a",
        requires = "calibrate_b"
    )]
    pub calibrate_input: Option<String>,

    /// Remove the uncalibrated input variable after calibrating.
    #[arg(long = "remove-uncalibrated", requires = "calibrate_input")]
    pub remove_uncalibrated: bool,

    /// Replace non-member controlled-vocabulary values with the first
    /// vocabulary option instead of reporting them.
    #[arg(long = "override-vocab")]
    pub override_vocab: bool,

    /// Re-read the written file and check convention compliance.
    #[arg(long = "convention-check")]
    pub convention_check: bool,

    /// Skip appending the creation line to the history attribute.
    #[arg(long = "no-history")]
    pub no_history: bool,
}

#[derive(Parser)]
pub struct AuditArgs {
    /// NetCDF file to audit.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Emit the report as JSON instead of text lines.
    #[arg(long = "json")]
    pub json: bool,
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
