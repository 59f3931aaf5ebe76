use serde::{Deserialize, Serialize};

use crate::label::FieldLabel;

/// Resolved mapping from semantic labels to 1-based workbook columns.
///
/// Built once by the header scan and immutable afterwards. Every slot follows
/// the first-assignment-wins rule: when the same label text appears in several
/// header cells, the occurrence found first in row-major scan order is kept.
/// `header_row` is fixed by the first label found anywhere and is never moved
/// by a later match on a different row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    fio: Option<u32>,
    dob: Option<u32>,
    address: Option<u32>,
    position: Option<u32>,
    risk: Option<u32>,
    diagnosis: Option<u32>,
    header_row: Option<u32>,
}

impl ColumnMap {
    /// Record `label` at 1-based `column` found on 1-based `row`.
    /// Earlier assignments win; a duplicate match is ignored.
    pub fn assign(&mut self, label: FieldLabel, column: u32, row: u32) {
        let slot = self.slot_mut(label);
        if slot.is_none() {
            *slot = Some(column);
        }
        if self.header_row.is_none() {
            self.header_row = Some(row);
        }
    }

    /// The 1-based column for `label`, when one was detected.
    pub fn column(&self, label: FieldLabel) -> Option<u32> {
        *self.slot(label)
    }

    pub fn is_assigned(&self, label: FieldLabel) -> bool {
        self.slot(label).is_some()
    }

    /// The 1-based row of the header line, set iff any label was found.
    pub fn header_row(&self) -> Option<u32> {
        self.header_row
    }

    /// Labels that were detected, in stable declaration order.
    pub fn assigned_labels(&self) -> Vec<FieldLabel> {
        FieldLabel::ALL
            .iter()
            .copied()
            .filter(|label| self.is_assigned(*label))
            .collect()
    }

    fn slot(&self, label: FieldLabel) -> &Option<u32> {
        match label {
            FieldLabel::Fio => &self.fio,
            FieldLabel::Dob => &self.dob,
            FieldLabel::Address => &self.address,
            FieldLabel::Position => &self.position,
            FieldLabel::Risk => &self.risk,
            FieldLabel::Diagnosis => &self.diagnosis,
        }
    }

    fn slot_mut(&mut self, label: FieldLabel) -> &mut Option<u32> {
        match label {
            FieldLabel::Fio => &mut self.fio,
            FieldLabel::Dob => &mut self.dob,
            FieldLabel::Address => &mut self.address,
            FieldLabel::Position => &mut self.position,
            FieldLabel::Risk => &mut self.risk,
            FieldLabel::Diagnosis => &mut self.diagnosis,
        }
    }
}
