//! The two substitution strategies, selected by mode.
//!
//! The conclusion template writes each value as a whole rephrased line after
//! a fixed prefix, so filling it is prefix-keyed line replacement. The
//! referral template embeds values into formatted blanks after their labels,
//! so filling it preserves the blank runs. Keeping both behind one value
//! keeps the assembler mode-agnostic.

use profpack_docx::DocxDocument;
use profpack_model::{DocKind, SubjectRecord};
use serde::Serialize;

use crate::error::Result;
use crate::locate::{FieldFill, FillState, ReferralField, fill_referral_field};

/// One prefix-keyed whole-line replacement for the conclusion template.
#[derive(Debug, Clone)]
pub struct LineReplacement {
    /// A fragment is targeted when its trimmed text starts with this.
    pub prefix: &'static str,
    /// The fully composed line that replaces the fragment's text.
    pub line: String,
}

/// What happened while filling one document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FillReport {
    /// Conclusion: fragments recomposed by prefix match.
    pub lines_replaced: usize,
    /// Referral: fields filled into blank runs.
    pub fields_filled: usize,
    /// Referral: fields recomposed via the degraded colon fallback.
    pub fields_fallback: usize,
    /// Referral: fields with no usable fragment in the template.
    pub fields_missing: Vec<&'static str>,
}

/// Mode-specific fill behavior over one cloned document.
#[derive(Debug, Clone)]
pub enum FillStrategy {
    /// Whole-line replacement keyed on fixed prefixes.
    LinePrefix(Vec<LineReplacement>),
    /// Blank-run preserving substitution per labeled field.
    LabeledBlank(Vec<(ReferralField, String)>),
}

impl FillStrategy {
    /// Build the strategy for `kind` from one subject's values.
    pub fn for_record(kind: DocKind, record: &SubjectRecord, workplace: &str) -> Self {
        match kind {
            DocKind::PreliminaryConclusion => {
                FillStrategy::LinePrefix(conclusion_replacements(record, workplace))
            }
            DocKind::DiaskinReferral => FillStrategy::LabeledBlank(vec![
                (ReferralField::FullName, record.full_name.clone()),
                (ReferralField::BirthDate, record.birth_date.clone()),
                (ReferralField::Address, record.address.clone()),
            ]),
        }
    }

    /// Apply the strategy to a freshly cloned document.
    pub fn apply(&self, document: &mut DocxDocument) -> Result<FillReport> {
        let mut report = FillReport::default();
        match self {
            FillStrategy::LinePrefix(replacements) => {
                for id in document.fragments() {
                    let text = document.fragment_text(&id)?;
                    let trimmed = text.trim();
                    // First matching prefix wins for this fragment.
                    let Some(replacement) = replacements
                        .iter()
                        .find(|r| trimmed.starts_with(r.prefix))
                    else {
                        continue;
                    };
                    document.replace_fragment_text(&id, &replacement.line)?;
                    report.lines_replaced += 1;
                }
            }
            FillStrategy::LabeledBlank(fields) => {
                let mut state = FillState::default();
                for (field, value) in fields {
                    match fill_referral_field(document, *field, value, &mut state)? {
                        FieldFill::Filled => report.fields_filled += 1,
                        FieldFill::FilledFallback => report.fields_fallback += 1,
                        FieldFill::NotFound => report.fields_missing.push(field.as_str()),
                    }
                }
            }
        }
        Ok(report)
    }
}

/// The five fixed lines of the preliminary-conclusion form.
fn conclusion_replacements(record: &SubjectRecord, workplace: &str) -> Vec<LineReplacement> {
    vec![
        LineReplacement {
            prefix: "1. Ф.И.О",
            line: format!(
                "1. Ф.И.О: {} {} г.р.",
                record.full_name, record.birth_date
            ),
        },
        LineReplacement {
            prefix: "2. Место работы",
            line: format!("2. Место работы: {workplace}"),
        },
        LineReplacement {
            prefix: "3. Профессия (должность) (в настоящее время)",
            line: format!(
                "3. Профессия (должность) (в настоящее время): {}",
                record.position
            ),
        },
        LineReplacement {
            prefix: "Вредный производственный фактор",
            line: format!(
                "Вредный производственный фактор, наименование вида работ: {}",
                record.risk
            ),
        },
        LineReplacement {
            prefix: "6. Наименование",
            line: format!("6. Наименование: {}", record.diagnosis),
        },
    ]
}
