use profpack_model::{ColumnMap, DocKind, FieldLabel};
use tracing::warn;

use crate::error::{Result, SheetError};

/// Required labels absent from `columns` for `kind`, in stable label order.
/// Empty iff every required column was detected.
pub fn missing_labels(columns: &ColumnMap, kind: DocKind) -> Vec<FieldLabel> {
    kind.required_labels()
        .iter()
        .copied()
        .filter(|label| !columns.is_assigned(*label))
        .collect()
}

/// Hard gate before any document is generated.
///
/// A detected header row is required in every mode; by construction the map
/// has one as soon as any label was assigned, so an absent header row always
/// coincides with missing labels.
pub fn require_columns(columns: &ColumnMap, kind: DocKind) -> Result<()> {
    let missing = missing_labels(columns, kind);
    if missing.is_empty() && columns.header_row().is_some() {
        return Ok(());
    }
    warn!(kind = %kind, missing = ?missing, "workbook rejected: required columns not found");
    Err(SheetError::MissingColumns {
        kind,
        labels: missing,
    })
}
