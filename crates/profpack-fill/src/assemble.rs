//! Per-row document assembly and the batch driver.
//!
//! Each data row goes through the same short life cycle: parse a fresh
//! package from the template bytes, apply the mode's fill strategy, save
//! under the sanitized subject name. Rows with a blank name are counted and
//! skipped; locator misses degrade locally and never stop the batch. Only
//! package-level and I/O failures abort.

use std::fs;
use std::path::{Path, PathBuf};

use profpack_docx::DocxPackage;
use profpack_model::{DocKind, SubjectRecord};
use profpack_sheet::ExtractedRow;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::strategy::{FillReport, FillStrategy};

/// Document file extension, including the dot.
pub const DOC_EXTENSION: &str = ".docx";

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub kind: DocKind,
    /// Free-text workplace value composed into the conclusion form.
    pub workplace: String,
}

/// Assemble one filled document for `record` from the template bytes.
pub fn assemble_document(
    template: &[u8],
    record: &SubjectRecord,
    options: &GenerateOptions,
) -> Result<(DocxPackage, FillReport)> {
    let mut package = DocxPackage::from_bytes(template)?;
    let strategy = FillStrategy::for_record(options.kind, record, &options.workplace);
    let report = strategy.apply(package.document_mut())?;
    if !report.fields_missing.is_empty() {
        warn!(
            fields = ?report.fields_missing,
            "template has no fillable fragment for some fields"
        );
    }
    Ok((package, report))
}

/// What happened to one data row.
#[derive(Debug, Clone, Serialize)]
pub enum RowOutcome {
    Generated {
        file: PathBuf,
        fill: FillReport,
    },
    /// Blank subject name; no document for this row.
    Skipped {
        row: u32,
    },
}

/// Batch totals; `processed() = generated + skipped` always holds.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchOutcome {
    pub generated: Vec<PathBuf>,
    pub skipped: usize,
}

impl BatchOutcome {
    pub fn processed(&self) -> usize {
        self.generated.len() + self.skipped
    }
}

/// Generate one document per extracted row into `output_dir`.
///
/// Rows are handled strictly in order, one document fully written before the
/// next row starts; the caller can stop the batch at any row boundary by
/// ending the iterator. `on_row` fires after every row for progress
/// reporting. Two subjects sanitizing to the same filename silently
/// overwrite; the filename is a delivery convenience, not an identity key.
pub fn generate_batch<I, F>(
    template: &[u8],
    rows: I,
    options: &GenerateOptions,
    output_dir: &Path,
    mut on_row: F,
) -> Result<BatchOutcome>
where
    I: IntoIterator<Item = ExtractedRow>,
    F: FnMut(&RowOutcome),
{
    fs::create_dir_all(output_dir)?;
    let mut outcome = BatchOutcome::default();
    for row in rows {
        let result = match row {
            ExtractedRow::SkippedBlankName { row } => {
                outcome.skipped += 1;
                RowOutcome::Skipped { row }
            }
            ExtractedRow::Record(record) => {
                let (package, fill) = assemble_document(template, &record, options)?;
                let file = output_dir.join(format!("{}{DOC_EXTENSION}", record.file_stem()));
                package.save(&file)?;
                debug!(subject = %record.full_name, file = %file.display(), "document generated");
                outcome.generated.push(file.clone());
                RowOutcome::Generated { file, fill }
            }
        };
        on_row(&result);
    }
    info!(
        kind = %options.kind,
        generated = outcome.generated.len(),
        skipped = outcome.skipped,
        "batch complete"
    );
    Ok(outcome)
}
