//! Bounded header scan.
//!
//! Roster workbooks come from many clinics and schools; the header texts vary
//! ("ФИО сотрудника", "Ф.И.О.", "Дата рождения", "д.р.", ...) and the header
//! line is not always row 1. The scan therefore covers a fixed top-left
//! rectangle and matches each cell against per-label substring rules on the
//! trimmed, lowercased text. The first match for a label (row-major order)
//! wins; so does the first header row.

use calamine::Data;
use profpack_model::{ColumnMap, FieldLabel};
use tracing::debug;

use crate::sheet::SheetGrid;

/// Headers are assumed to sit within the first 20 rows.
pub const MAX_HEADER_ROWS: u32 = 20;
/// Wide rosters put the recognized columns anywhere in the first 80 columns.
pub const MAX_HEADER_COLS: u32 = 80;

/// Scan the top-left rectangle of `sheet` for recognizable header cells.
///
/// Any subset of labels may end up unset; mode-specific validation is the
/// caller's job (`require_columns`).
pub fn detect_columns(sheet: &SheetGrid) -> ColumnMap {
    let mut map = ColumnMap::default();
    for row in 1..=MAX_HEADER_ROWS {
        for column in 1..=MAX_HEADER_COLS {
            let Some(Data::String(raw)) = sheet.value(row, column) else {
                continue;
            };
            let text = raw.trim().to_lowercase();
            if text.is_empty() {
                continue;
            }
            for label in FieldLabel::ALL {
                if header_matches(label, &text) {
                    debug!(label = %label, row, column, header = %raw.trim(), "header cell matched");
                    map.assign(label, column, row);
                }
            }
        }
    }
    map
}

/// Substring rules for one label against a trimmed, lowercased header text.
/// Kept free of any worksheet dependency so each rule is testable on strings.
pub fn header_matches(label: FieldLabel, text: &str) -> bool {
    match label {
        FieldLabel::Fio => text.contains("фио"),
        FieldLabel::Dob => {
            (text.contains("дата") && text.contains("рожд"))
                || text.contains("д.р")
                || text.contains("д р")
                || dotless(text) == "др"
        }
        FieldLabel::Address => text.contains("адрес"),
        FieldLabel::Position => {
            text.contains("штатная должность")
                || (text.contains("должность") && text.contains("штат"))
        }
        FieldLabel::Risk => {
            text.contains("факторы риска")
                || (text.contains("фактор") && text.contains("риска"))
        }
        FieldLabel::Diagnosis => {
            text.contains("мкб-10") || text.contains("мкб 10") || text.contains("мкб10")
        }
    }
}

fn dotless(text: &str) -> String {
    text.chars().filter(|c| *c != '.' && *c != ' ').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fio_matches_qualified_headers() {
        assert!(header_matches(FieldLabel::Fio, "фио сотрудника"));
        assert!(header_matches(FieldLabel::Fio, "фио"));
        assert!(!header_matches(FieldLabel::Fio, "имя"));
    }

    #[test]
    fn dob_matches_full_and_abbreviated_forms() {
        assert!(header_matches(FieldLabel::Dob, "дата рождения"));
        assert!(header_matches(FieldLabel::Dob, "д.р."));
        assert!(header_matches(FieldLabel::Dob, "д р"));
        assert!(header_matches(FieldLabel::Dob, "др"));
        assert!(header_matches(FieldLabel::Dob, "д. р."));
        assert!(!header_matches(FieldLabel::Dob, "дата осмотра"));
        // "др" must be the whole cell once dots and spaces are removed
        assert!(!header_matches(FieldLabel::Dob, "кадры"));
    }

    #[test]
    fn position_requires_both_stems_or_exact_phrase() {
        assert!(header_matches(FieldLabel::Position, "штатная должность"));
        assert!(header_matches(
            FieldLabel::Position,
            "должность по штатному расписанию"
        ));
        assert!(!header_matches(FieldLabel::Position, "должность"));
    }

    #[test]
    fn risk_requires_both_stems_or_exact_phrase() {
        assert!(header_matches(FieldLabel::Risk, "факторы риска"));
        assert!(header_matches(FieldLabel::Risk, "вредный фактор риска"));
        assert!(!header_matches(FieldLabel::Risk, "факторы"));
    }

    #[test]
    fn diagnosis_matches_spelling_variants() {
        assert!(header_matches(FieldLabel::Diagnosis, "код мкб-10"));
        assert!(header_matches(FieldLabel::Diagnosis, "мкб 10"));
        assert!(header_matches(FieldLabel::Diagnosis, "мкб10"));
        assert!(!header_matches(FieldLabel::Diagnosis, "диагноз"));
    }

    #[test]
    fn address_is_a_plain_substring() {
        assert!(header_matches(FieldLabel::Address, "адрес проживания"));
        assert!(!header_matches(FieldLabel::Address, "телефон"));
    }
}
