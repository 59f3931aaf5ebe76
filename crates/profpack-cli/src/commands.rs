use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use indicatif::ProgressBar;

use profpack_cli::pipeline::{self, GenerateConfig};

use crate::cli::{ColumnsArgs, GenerateArgs};
use crate::summary::{print_columns, print_report};

pub fn run_generate(args: &GenerateArgs) -> Result<()> {
    let config = GenerateConfig {
        workbook: args.workbook.clone(),
        template: args.template.clone(),
        kind: args.mode.kind(),
        workplace: args.workplace.clone(),
        sheet: args.sheet.clone(),
        output_dir: resolve_output_dir(args),
        archive: args.zip.clone(),
        dry_run: args.dry_run,
    };

    let bar = if args.no_progress || args.dry_run {
        ProgressBar::hidden()
    } else {
        // Length is unknown until the reader exists; spin until then.
        ProgressBar::no_length()
    };
    let report = pipeline::run_generate(&config, |_| bar.inc(1))?;
    bar.finish_and_clear();

    if let Some(path) = &args.summary_json {
        let json = serde_json::to_string_pretty(&report).context("serialize run summary")?;
        fs::write(path, json).with_context(|| format!("write summary {}", path.display()))?;
    }
    print_report(&report);
    Ok(())
}

/// Returns whether every required column was present (when a mode was given).
pub fn run_columns(args: &ColumnsArgs) -> Result<bool> {
    let report = pipeline::run_columns(
        &args.workbook,
        args.sheet.as_deref(),
        args.mode.map(|m| m.kind()),
    )?;
    print_columns(&report);
    Ok(report
        .missing
        .as_ref()
        .map(|missing| missing.is_empty())
        .unwrap_or(true))
}

/// Default output directory sits next to the workbook, matching where users
/// look for results when no destination was chosen.
fn resolve_output_dir(args: &GenerateArgs) -> PathBuf {
    args.output_dir.clone().unwrap_or_else(|| {
        args.workbook
            .parent()
            .map(|dir| dir.join("generated_docs"))
            .unwrap_or_else(|| PathBuf::from("generated_docs"))
    })
}
