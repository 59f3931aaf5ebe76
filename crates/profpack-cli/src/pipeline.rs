//! Generation pipeline: workbook in, filled documents out.
//!
//! The stages mirror how a run reads from the terminal: load the worksheet,
//! detect and validate columns, extract rows, fill and save one document per
//! row, then optionally pack everything into an archive. Column validation
//! failing is the one hard stop before any document exists; after that, only
//! I/O and package-level errors abort a batch.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use profpack_fill::{
    BatchOutcome, DOC_EXTENSION, GenerateOptions, RowOutcome, generate_batch,
};
use profpack_model::{ColumnMap, DocKind, FieldLabel};
use profpack_sheet::{ExtractedRow, RowReader, SheetGrid, detect_columns, require_columns};

/// Everything one `generate` run needs, decoupled from argument parsing.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub workbook: PathBuf,
    pub template: PathBuf,
    pub kind: DocKind,
    pub workplace: String,
    /// Worksheet name; `None` takes the workbook's first sheet.
    pub sheet: Option<String>,
    pub output_dir: PathBuf,
    /// When set, pack the generated documents into this `.zip`.
    pub archive: Option<PathBuf>,
    /// Validate and count rows without writing anything.
    pub dry_run: bool,
}

/// Result of one `generate` run, also serialized for `--summary-json`.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub kind: DocKind,
    pub worksheet: String,
    pub columns: ColumnMap,
    pub output_dir: PathBuf,
    pub generated: Vec<PathBuf>,
    pub skipped: usize,
    pub archive: Option<PathBuf>,
    pub dry_run: bool,
}

impl RunReport {
    pub fn processed(&self) -> usize {
        self.generated.len() + self.skipped
    }
}

/// Result of a `columns` inspection run.
#[derive(Debug, Serialize)]
pub struct ColumnsReport {
    pub worksheet: String,
    pub columns: ColumnMap,
    /// Set when a mode was given: required labels the workbook lacks.
    pub missing: Option<Vec<FieldLabel>>,
}

/// Run the full generation pipeline. `on_row` fires after every processed
/// row and drives the caller's progress display.
pub fn run_generate<F>(config: &GenerateConfig, on_row: F) -> Result<RunReport>
where
    F: FnMut(&RowOutcome),
{
    let span = info_span!("generate", kind = %config.kind);
    let _guard = span.enter();

    let grid = SheetGrid::from_path(&config.workbook, config.sheet.as_deref())
        .with_context(|| format!("read workbook {}", config.workbook.display()))?;
    let columns = detect_columns(&grid);
    require_columns(&columns, config.kind)?;

    let template = fs::read(&config.template)
        .with_context(|| format!("read template {}", config.template.display()))?;

    let reader = RowReader::new(&grid, &columns, config.kind)?;
    let outcome = if config.dry_run {
        count_rows(reader, on_row)
    } else {
        let options = GenerateOptions {
            kind: config.kind,
            workplace: config.workplace.clone(),
        };
        generate_batch(&template, reader, &options, &config.output_dir, on_row)?
    };

    let archive = match (&config.archive, config.dry_run) {
        (Some(path), false) => {
            write_archive(&outcome.generated, path)?;
            Some(path.clone())
        }
        _ => None,
    };

    info!(
        generated = outcome.generated.len(),
        skipped = outcome.skipped,
        dry_run = config.dry_run,
        "run complete"
    );
    Ok(RunReport {
        kind: config.kind,
        worksheet: grid.name().to_string(),
        columns,
        output_dir: config.output_dir.clone(),
        generated: outcome.generated,
        skipped: outcome.skipped,
        archive,
        dry_run: config.dry_run,
    })
}

/// Inspect which roster columns a workbook offers.
pub fn run_columns(
    workbook: &Path,
    sheet: Option<&str>,
    kind: Option<DocKind>,
) -> Result<ColumnsReport> {
    let grid = SheetGrid::from_path(workbook, sheet)
        .with_context(|| format!("read workbook {}", workbook.display()))?;
    let columns = detect_columns(&grid);
    let missing = kind.map(|kind| profpack_sheet::missing_labels(&columns, kind));
    Ok(ColumnsReport {
        worksheet: grid.name().to_string(),
        columns,
        missing,
    })
}

/// Dry-run row pass: same counters as a real batch, no documents written.
fn count_rows<I, F>(rows: I, mut on_row: F) -> BatchOutcome
where
    I: IntoIterator<Item = ExtractedRow>,
    F: FnMut(&RowOutcome),
{
    let mut outcome = BatchOutcome::default();
    for row in rows {
        let result = match row {
            ExtractedRow::SkippedBlankName { row } => {
                outcome.skipped += 1;
                RowOutcome::Skipped { row }
            }
            ExtractedRow::Record(record) => {
                let file = PathBuf::from(format!("{}{DOC_EXTENSION}", record.file_stem()));
                outcome.generated.push(file.clone());
                RowOutcome::Generated {
                    file,
                    fill: Default::default(),
                }
            }
        };
        on_row(&result);
    }
    outcome
}

/// Pack the generated documents into a `.zip`, entries at the archive root.
/// Duplicate paths (filename collisions across rows) are added once.
pub fn write_archive(files: &[PathBuf], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file =
        File::create(path).with_context(|| format!("create archive {}", path.display()))?;
    let mut writer = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default();
    let mut seen: Vec<&PathBuf> = Vec::new();
    for doc in files {
        if seen.contains(&doc) {
            continue;
        }
        seen.push(doc);
        let name = doc
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("archive entry name for {}", doc.display()))?;
        writer.start_file(name, options)?;
        let mut source =
            File::open(doc).with_context(|| format!("read document {}", doc.display()))?;
        io::copy(&mut source, &mut writer)?;
    }
    writer.finish()?;
    info!(archive = %path.display(), documents = files.len(), "archive written");
    Ok(())
}
