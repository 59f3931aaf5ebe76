use serde::{Deserialize, Serialize};

/// One subject's data extracted from a workbook row.
///
/// Constructed fresh per row and never mutated; `full_name` is guaranteed
/// non-empty after trimming (blank-name rows are skipped before construction).
/// Fields not required by the active mode stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRecord {
    pub full_name: String,
    /// Display-formatted birth date (`DD.MM.YYYY`), or the raw cell text when
    /// conversion was impossible, or empty for an empty cell.
    pub birth_date: String,
    pub address: String,
    pub position: String,
    pub risk: String,
    pub diagnosis: String,
}

impl SubjectRecord {
    /// Sanitized file stem for this subject's output document.
    pub fn file_stem(&self) -> String {
        crate::filename::safe_file_name(&self.full_name)
    }
}
