use profpack_model::{ColumnMap, DocKind, FieldLabel, SubjectRecord};
use tracing::debug;

use crate::date::{cell_text, display_date};
use crate::error::{Result, SheetError};
use crate::sheet::SheetGrid;
use crate::validate::missing_labels;

/// Outcome of extracting one data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedRow {
    Record(SubjectRecord),
    /// The name cell was empty or whitespace; no document for this row.
    SkippedBlankName { row: u32 },
}

/// Lazy iterator over the data rows below the header.
///
/// Rows are visited in sheet order, one `SubjectRecord` per row with a
/// non-blank name. Only the columns the active mode needs are read; the rest
/// of a record stays empty.
pub struct RowReader<'a> {
    sheet: &'a SheetGrid,
    columns: &'a ColumnMap,
    kind: DocKind,
    next_row: u32,
    last_row: u32,
}

impl<'a> RowReader<'a> {
    /// Requires a validated column map (see `require_columns`); a map without
    /// a header row is rejected with the full missing-column diagnostic.
    pub fn new(sheet: &'a SheetGrid, columns: &'a ColumnMap, kind: DocKind) -> Result<Self> {
        let header_row = columns
            .header_row()
            .ok_or_else(|| SheetError::MissingColumns {
                kind,
                labels: missing_labels(columns, kind),
            })?;
        Ok(Self {
            sheet,
            columns,
            kind,
            next_row: header_row + 1,
            last_row: sheet.last_row(),
        })
    }

    /// Number of rows this reader will visit; drives progress reporting.
    pub fn remaining_rows(&self) -> u64 {
        u64::from(self.last_row.saturating_sub(self.next_row - 1))
    }

    fn labeled_text(&self, row: u32, label: FieldLabel) -> String {
        self.columns
            .column(label)
            .and_then(|column| self.sheet.value(row, column))
            .map(cell_text)
            .unwrap_or_default()
    }

    fn extract(&self, row: u32) -> ExtractedRow {
        let full_name = self.labeled_text(row, FieldLabel::Fio);
        if full_name.is_empty() {
            debug!(row, "row skipped: blank name");
            return ExtractedRow::SkippedBlankName { row };
        }

        let birth_date = self
            .columns
            .column(FieldLabel::Dob)
            .and_then(|column| self.sheet.value(row, column))
            .map(display_date)
            .unwrap_or_default();

        let address = self.labeled_text(row, FieldLabel::Address);

        let (position, risk, diagnosis) = match self.kind {
            DocKind::PreliminaryConclusion => (
                self.labeled_text(row, FieldLabel::Position),
                self.labeled_text(row, FieldLabel::Risk),
                self.labeled_text(row, FieldLabel::Diagnosis),
            ),
            DocKind::DiaskinReferral => Default::default(),
        };

        ExtractedRow::Record(SubjectRecord {
            full_name,
            birth_date,
            address,
            position,
            risk,
            diagnosis,
        })
    }
}

impl Iterator for RowReader<'_> {
    type Item = ExtractedRow;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_row > self.last_row {
            return None;
        }
        let row = self.next_row;
        self.next_row += 1;
        Some(self.extract(row))
    }
}
