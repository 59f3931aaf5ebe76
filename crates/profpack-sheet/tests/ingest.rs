use std::path::PathBuf;

use profpack_model::{DocKind, FieldLabel};
use profpack_sheet::{
    ExtractedRow, RowReader, SheetError, SheetGrid, detect_columns, require_columns,
};
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

fn save_workbook(dir: &TempDir, name: &str, workbook: &mut Workbook) -> PathBuf {
    let path = dir.path().join(name);
    workbook.save(&path).expect("save fixture workbook");
    path
}

/// Header on row 3, full Conclusion column set, one data row with a serial date.
fn conclusion_fixture(with_diagnosis: bool) -> Workbook {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(2, 0, "ФИО").expect("write header");
    sheet.write_string(2, 1, "Дата рождения").expect("write header");
    sheet
        .write_string(2, 2, "Штатная должность")
        .expect("write header");
    sheet.write_string(2, 3, "Факторы риска").expect("write header");
    if with_diagnosis {
        sheet.write_string(2, 4, "МКБ-10").expect("write header");
    }
    sheet.write_string(3, 0, "Иванов Иван").expect("write cell");
    // Excel serial for 1990-02-01
    sheet.write_number(3, 1, 32_905.0).expect("write cell");
    sheet.write_string(3, 2, "Учитель").expect("write cell");
    sheet.write_string(3, 3, "Шум").expect("write cell");
    if with_diagnosis {
        sheet.write_string(3, 4, "J00").expect("write cell");
    }
    workbook
}

#[test]
fn detects_conclusion_columns_and_extracts_row() {
    let dir = TempDir::new().expect("tempdir");
    let path = save_workbook(&dir, "roster.xlsx", &mut conclusion_fixture(true));

    let grid = SheetGrid::from_path(&path, None).expect("open workbook");
    let columns = detect_columns(&grid);

    assert_eq!(columns.header_row(), Some(3));
    assert_eq!(columns.column(FieldLabel::Fio), Some(1));
    assert_eq!(columns.column(FieldLabel::Dob), Some(2));
    assert_eq!(columns.column(FieldLabel::Position), Some(3));
    assert_eq!(columns.column(FieldLabel::Risk), Some(4));
    assert_eq!(columns.column(FieldLabel::Diagnosis), Some(5));
    require_columns(&columns, DocKind::PreliminaryConclusion).expect("columns complete");

    let rows: Vec<ExtractedRow> =
        RowReader::new(&grid, &columns, DocKind::PreliminaryConclusion)
            .expect("row reader")
            .collect();
    assert_eq!(rows.len(), 1);
    match &rows[0] {
        ExtractedRow::Record(record) => {
            assert_eq!(record.full_name, "Иванов Иван");
            assert_eq!(record.birth_date, "01.02.1990");
            assert_eq!(record.position, "Учитель");
            assert_eq!(record.risk, "Шум");
            assert_eq!(record.diagnosis, "J00");
        }
        other => panic!("expected record, got {other:?}"),
    }
}

#[test]
fn missing_diagnosis_column_is_a_hard_stop() {
    let dir = TempDir::new().expect("tempdir");
    let path = save_workbook(&dir, "roster.xlsx", &mut conclusion_fixture(false));

    let grid = SheetGrid::from_path(&path, None).expect("open workbook");
    let columns = detect_columns(&grid);

    let error = require_columns(&columns, DocKind::PreliminaryConclusion).unwrap_err();
    match error {
        SheetError::MissingColumns { kind, labels } => {
            assert_eq!(kind, DocKind::PreliminaryConclusion);
            assert_eq!(labels, vec![FieldLabel::Diagnosis]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn duplicate_headers_resolve_to_first_occurrence() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 1, "ФИО").expect("write header");
    sheet.write_string(0, 4, "ФИО сотрудника").expect("write header");
    sheet.write_string(1, 0, "дата рождения").expect("write header");

    let dir = TempDir::new().expect("tempdir");
    let path = save_workbook(&dir, "dup.xlsx", &mut workbook);
    let grid = SheetGrid::from_path(&path, None).expect("open workbook");
    let columns = detect_columns(&grid);

    assert_eq!(columns.column(FieldLabel::Fio), Some(2));
    assert_eq!(columns.column(FieldLabel::Dob), Some(1));
    // Header row fixed by the first label found, not moved by the second row.
    assert_eq!(columns.header_row(), Some(1));
}

#[test]
fn headers_outside_the_scan_rectangle_are_not_found() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    // Row 25 (1-based) is below the 20-row scan window.
    sheet.write_string(24, 0, "ФИО").expect("write header");

    let dir = TempDir::new().expect("tempdir");
    let path = save_workbook(&dir, "deep.xlsx", &mut workbook);
    let grid = SheetGrid::from_path(&path, None).expect("open workbook");
    let columns = detect_columns(&grid);

    assert!(!columns.is_assigned(FieldLabel::Fio));
    assert_eq!(columns.header_row(), None);
}

#[test]
fn blank_name_rows_are_skipped_not_failed() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "ФИО").expect("write header");
    sheet.write_string(0, 1, "Дата рождения").expect("write header");
    sheet.write_string(0, 2, "Адрес").expect("write header");
    sheet.write_string(1, 0, "Петров П.П.").expect("write cell");
    sheet.write_string(1, 2, "г. Москва").expect("write cell");
    sheet.write_string(2, 0, "   ").expect("write cell");
    sheet.write_string(3, 0, "Сидорова А.А.").expect("write cell");

    let dir = TempDir::new().expect("tempdir");
    let path = save_workbook(&dir, "skip.xlsx", &mut workbook);
    let grid = SheetGrid::from_path(&path, None).expect("open workbook");
    let columns = detect_columns(&grid);
    require_columns(&columns, DocKind::DiaskinReferral).expect("columns complete");

    let reader = RowReader::new(&grid, &columns, DocKind::DiaskinReferral).expect("row reader");
    assert_eq!(reader.remaining_rows(), 3);
    let rows: Vec<ExtractedRow> = reader.collect();

    let skipped = rows
        .iter()
        .filter(|r| matches!(r, ExtractedRow::SkippedBlankName { .. }))
        .count();
    let records: Vec<_> = rows
        .iter()
        .filter_map(|r| match r {
            ExtractedRow::Record(record) => Some(record),
            ExtractedRow::SkippedBlankName { .. } => None,
        })
        .collect();
    assert_eq!(skipped, 1);
    assert_eq!(records.len(), 2);
    assert_eq!(rows.len(), records.len() + skipped);
    assert_eq!(records[0].full_name, "Петров П.П.");
    assert_eq!(records[0].address, "г. Москва");
    // Empty date cell renders as the empty string.
    assert_eq!(records[0].birth_date, "");
    // Referral mode leaves conclusion-only fields untouched.
    assert_eq!(records[0].position, "");
    assert_eq!(records[1].full_name, "Сидорова А.А.");
}

#[test]
fn worksheet_can_be_selected_by_name() {
    let mut workbook = Workbook::new();
    workbook
        .add_worksheet()
        .set_name("Лист1")
        .expect("name sheet");
    let second = workbook.add_worksheet();
    second.set_name("Сотрудники").expect("name sheet");
    second.write_string(0, 0, "ФИО").expect("write header");

    let dir = TempDir::new().expect("tempdir");
    let path = save_workbook(&dir, "named.xlsx", &mut workbook);

    let grid = SheetGrid::from_path(&path, Some("Сотрудники")).expect("open worksheet");
    assert_eq!(grid.name(), "Сотрудники");
    assert!(detect_columns(&grid).is_assigned(FieldLabel::Fio));

    let missing = SheetGrid::from_path(&path, Some("Нет такого")).unwrap_err();
    assert!(matches!(missing, SheetError::WorksheetNotFound(_)));
}

#[test]
fn workbooks_load_from_uploaded_bytes() {
    let dir = TempDir::new().expect("tempdir");
    let path = save_workbook(&dir, "roster.xlsx", &mut conclusion_fixture(true));
    let bytes = std::fs::read(&path).expect("read workbook bytes");

    let grid = SheetGrid::from_bytes(&bytes, None).expect("open from bytes");
    let columns = detect_columns(&grid);
    assert_eq!(columns.header_row(), Some(3));
    assert_eq!(columns.column(FieldLabel::Diagnosis), Some(5));
}
