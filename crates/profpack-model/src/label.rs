use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic roster columns recognized in workbook headers.
///
/// The stable lowercase names (`fio`, `dob`, ...) are what missing-column
/// diagnostics show to the end user, so they must not change between releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldLabel {
    /// Employee full name ("ФИО").
    Fio,
    /// Date of birth.
    Dob,
    /// Residential address.
    Address,
    /// Staff position.
    Position,
    /// Occupational risk factors.
    Risk,
    /// ICD-10 diagnosis code.
    Diagnosis,
}

impl FieldLabel {
    /// All labels in declaration order. Detection and diagnostics iterate this
    /// so output ordering stays deterministic.
    pub const ALL: [FieldLabel; 6] = [
        FieldLabel::Fio,
        FieldLabel::Dob,
        FieldLabel::Address,
        FieldLabel::Position,
        FieldLabel::Risk,
        FieldLabel::Diagnosis,
    ];

    /// Stable lowercase identifier used in error messages and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldLabel::Fio => "fio",
            FieldLabel::Dob => "dob",
            FieldLabel::Address => "address",
            FieldLabel::Position => "position",
            FieldLabel::Risk => "risk",
            FieldLabel::Diagnosis => "diagnosis",
        }
    }

    /// Human-readable description for the column-inspection table.
    pub fn description(&self) -> &'static str {
        match self {
            FieldLabel::Fio => "Full name (ФИО)",
            FieldLabel::Dob => "Date of birth",
            FieldLabel::Address => "Residential address",
            FieldLabel::Position => "Staff position",
            FieldLabel::Risk => "Risk factors",
            FieldLabel::Diagnosis => "ICD-10 code",
        }
    }
}

impl fmt::Display for FieldLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_names() {
        let names: Vec<&str> = FieldLabel::ALL.iter().map(FieldLabel::as_str).collect();
        assert_eq!(
            names,
            vec!["fio", "dob", "address", "position", "risk", "diagnosis"]
        );
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&FieldLabel::Diagnosis).expect("serialize label");
        assert_eq!(json, "\"diagnosis\"");
        let label: FieldLabel = serde_json::from_str("\"fio\"").expect("deserialize label");
        assert_eq!(label, FieldLabel::Fio);
    }
}
