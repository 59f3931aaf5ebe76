//! Template-side field location for the referral strategy.
//!
//! A field's target is found by keyword rules over each fragment's visible
//! text, skipping signature/stamp/sender lines that may echo the same words.
//! Each field binds at most one fragment per document; the explicit
//! `FillState` carries the one-shot guards instead of flags scattered
//! through control flow.

use profpack_docx::{DocxDocument, is_blank_field_run};
use tracing::debug;

use crate::error::Result;

/// Fields the referral template carries, in fill order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferralField {
    FullName,
    BirthDate,
    Address,
}

impl ReferralField {
    pub const ALL: [ReferralField; 3] = [
        ReferralField::FullName,
        ReferralField::BirthDate,
        ReferralField::Address,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReferralField::FullName => "full_name",
            ReferralField::BirthDate => "birth_date",
            ReferralField::Address => "address",
        }
    }

    /// Does a fragment's visible text label this field?
    pub fn label_matches(&self, text: &str) -> bool {
        match self {
            // "Ф.И.О.:", "Ф. И. О.:", "ФИО:" — compare with spaces removed.
            ReferralField::FullName => {
                let squeezed: String = text
                    .chars()
                    .filter(|c| *c != ' ')
                    .collect::<String>()
                    .to_lowercase();
                squeezed.contains("ф.и.о.:") || squeezed.contains("фио:")
            }
            ReferralField::BirthDate => {
                let lower = text.to_lowercase();
                lower.contains("дата") && lower.contains("рожд")
            }
            // "адрес постоянного места жительства" and close variants.
            ReferralField::Address => {
                let lower = text.to_lowercase();
                lower.contains("адрес")
                    && lower.contains("постоянного")
                    && lower.contains("житель")
            }
        }
    }

    fn index(self) -> usize {
        match self {
            ReferralField::FullName => 0,
            ReferralField::BirthDate => 1,
            ReferralField::Address => 2,
        }
    }
}

/// Signature, stamp, and referring-physician lines repeat field keywords but
/// are never substitution targets.
pub fn is_excluded_line(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("подпись") || lower.contains("печать") || lower.contains("направившего")
}

/// Per-document resolution state: which fields are already bound.
#[derive(Debug, Clone, Default)]
pub struct FillState {
    bound: [bool; ReferralField::ALL.len()],
}

impl FillState {
    pub fn is_bound(&self, field: ReferralField) -> bool {
        self.bound[field.index()]
    }

    pub fn mark_bound(&mut self, field: ReferralField) {
        self.bound[field.index()] = true;
    }
}

/// How one field landed in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFill {
    /// A blank run was found and filled in place, underline preserved.
    Filled,
    /// No blank run; the whole line was recomposed after its colon. The
    /// underline decoration is lost, which beats losing the value.
    FilledFallback,
    /// No labeled fragment (or none with a fillable slot) exists.
    NotFound,
}

/// Locate and fill one referral field.
///
/// Fragments are scanned in document order; the first one matching the label
/// predicate and not excluded is the target. Within it the first blank run
/// wins. A fragment with neither a blank run nor a colon leaves the field
/// unbound so a later fragment may still claim it. Calling again for an
/// already-bound field changes nothing and reports `Filled`.
pub fn fill_referral_field(
    document: &mut DocxDocument,
    field: ReferralField,
    value: &str,
    state: &mut FillState,
) -> Result<FieldFill> {
    if state.is_bound(field) {
        return Ok(FieldFill::Filled);
    }
    for id in document.fragments() {
        let text = document.fragment_text(&id)?;
        if !field.label_matches(&text) || is_excluded_line(&text) {
            continue;
        }
        let runs = document.runs(&id)?;
        if let Some(blank) = runs
            .iter()
            .find(|run| is_blank_field_run(&run.text, run.underlined))
        {
            document.fill_blank_run(&id, blank, value)?;
            state.mark_bound(field);
            debug!(field = field.as_str(), "blank run filled");
            return Ok(FieldFill::Filled);
        }
        if let Some((prefix, _)) = text.split_once(':') {
            document.replace_fragment_text(&id, &format!("{prefix}: {value}"))?;
            state.mark_bound(field);
            debug!(field = field.as_str(), "no blank run, line recomposed");
            return Ok(FieldFill::FilledFallback);
        }
    }
    Ok(FieldFill::NotFound)
}
