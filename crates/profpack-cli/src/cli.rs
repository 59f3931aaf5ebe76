//! CLI argument definitions for profpack.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use profpack_model::DocKind;

#[derive(Parser)]
#[command(
    name = "profpack",
    version,
    about = "Generate personalized occupational-medicine documents from a roster workbook",
    long_about = "Generate personalized Word documents from the rows of an Excel roster.\n\n\
                  Columns are recognized by fuzzy header matching (ФИО, дата рождения, ...)\n\
                  and template fields are located by their labels and blank formatting,\n\
                  so neither file needs a fixed layout."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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
    /// Generate one document per roster row.
    Generate(GenerateArgs),

    /// Show which roster columns the workbook provides, then stop.
    Columns(ColumnsArgs),
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Path to the roster workbook (.xlsx).
    #[arg(value_name = "WORKBOOK")]
    pub workbook: PathBuf,

    /// Path to the document template (.docx).
    #[arg(value_name = "TEMPLATE")]
    pub template: PathBuf,

    /// Document kind to produce.
    #[arg(long = "mode", value_enum, default_value = "conclusion")]
    pub mode: ModeArg,

    /// Output directory for generated documents
    /// (default: generated_docs next to the workbook).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Workplace line for the conclusion form.
    #[arg(long = "workplace", default_value = "ГБОУ Школа №")]
    pub workplace: String,

    /// Worksheet to read (default: the first one).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// Also pack the generated documents into this .zip archive.
    #[arg(long = "zip", value_name = "PATH")]
    pub zip: Option<PathBuf>,

    /// Validate columns and count rows without writing any document.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Write a machine-readable run summary (JSON) to this path.
    #[arg(long = "summary-json", value_name = "PATH")]
    pub summary_json: Option<PathBuf>,

    /// Disable the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

#[derive(Parser)]
pub struct ColumnsArgs {
    /// Path to the roster workbook (.xlsx).
    #[arg(value_name = "WORKBOOK")]
    pub workbook: PathBuf,

    /// Worksheet to read (default: the first one).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// Also check the detected columns against a mode's required set;
    /// exits nonzero when any are missing.
    #[arg(long = "mode", value_enum)]
    pub mode: Option<ModeArg>,
}

/// Document kind choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Preliminary examination conclusion (whole-line replacement).
    Conclusion,
    /// Diaskintest referral (blank-run filling).
    Referral,
}

impl ModeArg {
    pub fn kind(self) -> DocKind {
        match self {
            ModeArg::Conclusion => DocKind::PreliminaryConclusion,
            ModeArg::Referral => DocKind::DiaskinReferral,
        }
    }
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
