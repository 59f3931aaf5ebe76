//! Integration tests for the generation pipeline.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use profpack_cli::pipeline::{GenerateConfig, run_columns, run_generate};
use profpack_docx::DocxPackage;
use profpack_model::{DocKind, FieldLabel};
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

fn write_roster(dir: &Path, with_diagnosis: bool) -> PathBuf {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(2, 0, "ФИО").expect("header");
    sheet.write_string(2, 1, "Дата рождения").expect("header");
    sheet.write_string(2, 2, "Штатная должность").expect("header");
    sheet.write_string(2, 3, "Факторы риска").expect("header");
    if with_diagnosis {
        sheet.write_string(2, 4, "МКБ-10").expect("header");
    }
    sheet.write_string(3, 0, "Иванов Иван").expect("cell");
    sheet.write_number(3, 1, 32_905.0).expect("cell");
    sheet.write_string(3, 2, "Учитель").expect("cell");
    sheet.write_string(3, 3, "Шум").expect("cell");
    if with_diagnosis {
        sheet.write_string(3, 4, "J00").expect("cell");
    }
    // A row without a name, then another subject.
    sheet.write_string(5, 0, "Петров Пётр").expect("cell");
    sheet.write_string(5, 2, "Повар").expect("cell");
    sheet.write_string(5, 3, "Пищеблок").expect("cell");
    if with_diagnosis {
        sheet.write_string(5, 4, "J06").expect("cell");
    }
    let path = dir.join("roster.xlsx");
    workbook.save(&path).expect("save roster");
    path
}

fn write_template(dir: &Path) -> PathBuf {
    let body = [
        "1. Ф.И.О:",
        "2. Место работы:",
        "3. Профессия (должность) (в настоящее время):",
        "Вредный производственный фактор, наименование вида работ:",
        "6. Наименование:",
    ]
    .iter()
    .map(|text| format!("<w:p><w:r><w:t xml:space=\"preserve\">{text}</w:t></w:r></w:p>"))
    .collect::<String>();
    let document = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?><w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\"><w:body>{body}</w:body></w:document>"
    );
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    writer
        .start_file("[Content_Types].xml", options)
        .expect("entry");
    writer.write_all(b"<Types/>").expect("entry bytes");
    writer
        .start_file("word/document.xml", options)
        .expect("entry");
    writer.write_all(document.as_bytes()).expect("entry bytes");
    let bytes = writer.finish().expect("finish").into_inner();
    let path = dir.join("template.docx");
    std::fs::write(&path, bytes).expect("save template");
    path
}

fn config(dir: &TempDir, with_diagnosis: bool) -> GenerateConfig {
    GenerateConfig {
        workbook: write_roster(dir.path(), with_diagnosis),
        template: write_template(dir.path()),
        kind: DocKind::PreliminaryConclusion,
        workplace: "ГБОУ Школа № 5".to_string(),
        sheet: None,
        output_dir: dir.path().join("out"),
        archive: None,
        dry_run: false,
    }
}

#[test]
fn generate_writes_documents_and_counts_rows() {
    let dir = TempDir::new().expect("tempdir");
    let config = config(&dir, true);

    let mut rows_seen = 0usize;
    let report = run_generate(&config, |_| rows_seen += 1).expect("run");

    // Rows 4..=6: subject, blank, subject.
    assert_eq!(rows_seen, 3);
    assert_eq!(report.generated.len(), 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.processed(), 3);
    assert!(report.archive.is_none());

    let first = DocxPackage::from_path(&dir.path().join("out/Иванов Иван.docx"))
        .expect("open generated document");
    let document = first.document();
    let texts: Vec<String> = document
        .fragments()
        .iter()
        .map(|id| document.fragment_text(id).expect("text"))
        .collect();
    assert_eq!(texts[0], "1. Ф.И.О: Иванов Иван 01.02.1990 г.р.");
    assert_eq!(texts[1], "2. Место работы: ГБОУ Школа № 5");
    assert_eq!(texts[4], "6. Наименование: J00");
}

#[test]
fn missing_required_column_stops_before_any_document() {
    let dir = TempDir::new().expect("tempdir");
    let config = config(&dir, false);

    let error = run_generate(&config, |_| {}).expect_err("must fail");
    let message = format!("{error:#}");
    assert!(message.contains("diagnosis"), "got: {message}");
    assert!(!config.output_dir.exists());
}

#[test]
fn dry_run_counts_without_writing() {
    let dir = TempDir::new().expect("tempdir");
    let mut config = config(&dir, true);
    config.dry_run = true;
    config.archive = Some(dir.path().join("docs.zip"));

    let report = run_generate(&config, |_| {}).expect("run");
    assert_eq!(report.generated.len(), 2);
    assert_eq!(report.skipped, 1);
    assert!(report.dry_run);
    assert!(!config.output_dir.exists());
    // Dry runs write no archive either.
    assert!(report.archive.is_none());
    assert!(!dir.path().join("docs.zip").exists());
}

#[test]
fn archive_packs_documents_at_root() {
    let dir = TempDir::new().expect("tempdir");
    let mut config = config(&dir, true);
    config.archive = Some(dir.path().join("archive/docs.zip"));

    let report = run_generate(&config, |_| {}).expect("run");
    let archive_path = report.archive.expect("archive path");
    let file = std::fs::File::open(&archive_path).expect("open archive");
    let mut archive = zip::ZipArchive::new(file).expect("read archive");
    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).expect("entry").name().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Иванов Иван.docx", "Петров Пётр.docx"]);
}

#[test]
fn columns_report_flags_missing_labels_per_mode() {
    let dir = TempDir::new().expect("tempdir");
    let workbook = write_roster(dir.path(), true);

    let report = run_columns(&workbook, None, Some(DocKind::DiaskinReferral)).expect("columns");
    assert_eq!(report.columns.header_row(), Some(3));
    assert_eq!(report.columns.column(FieldLabel::Fio), Some(1));
    // The conclusion roster has no address column, so referral mode is short.
    assert_eq!(
        report.missing.as_deref(),
        Some(&[FieldLabel::Address][..])
    );

    let unconstrained = run_columns(&workbook, None, None).expect("columns");
    assert!(unconstrained.missing.is_none());
}
