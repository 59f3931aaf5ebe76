use serde::{Deserialize, Serialize};
use std::fmt;

use crate::label::FieldLabel;

/// Document-generation variant.
///
/// Each mode owns its required-column subset and its template fill strategy:
/// the conclusion template is filled by recomposing whole labeled lines, the
/// referral template by writing into underlined blank runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocKind {
    /// Preliminary medical examination conclusion ("заключение предварительное").
    PreliminaryConclusion,
    /// Diaskintest referral ("направление на диаскин").
    DiaskinReferral,
}

impl DocKind {
    /// Workbook columns that must be present before any document is generated.
    /// The header row itself is required in every mode and checked separately.
    pub fn required_labels(&self) -> &'static [FieldLabel] {
        match self {
            DocKind::PreliminaryConclusion => &[
                FieldLabel::Fio,
                FieldLabel::Dob,
                FieldLabel::Position,
                FieldLabel::Risk,
                FieldLabel::Diagnosis,
            ],
            DocKind::DiaskinReferral => {
                &[FieldLabel::Fio, FieldLabel::Dob, FieldLabel::Address]
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocKind::PreliminaryConclusion => "preliminary-conclusion",
            DocKind::DiaskinReferral => "diaskin-referral",
        }
    }
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
