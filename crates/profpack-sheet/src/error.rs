use profpack_model::{DocKind, FieldLabel};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),
    #[error("workbook contains no worksheets")]
    NoWorksheet,
    #[error("worksheet \"{0}\" not found in workbook")]
    WorksheetNotFound(String),
    /// The workbook cannot serve the requested mode. Lists every absent
    /// required column so the caller can show them all at once.
    #[error("workbook is not usable for {kind}: missing required columns: {}", join_labels(.labels))]
    MissingColumns {
        kind: DocKind,
        labels: Vec<FieldLabel>,
    },
}

pub type Result<T> = std::result::Result<T, SheetError>;

fn join_labels(labels: &[FieldLabel]) -> String {
    labels
        .iter()
        .map(FieldLabel::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
