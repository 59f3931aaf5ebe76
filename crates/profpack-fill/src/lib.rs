pub mod assemble;
pub mod error;
pub mod locate;
pub mod strategy;

pub use assemble::{
    BatchOutcome, DOC_EXTENSION, GenerateOptions, RowOutcome, assemble_document, generate_batch,
};
pub use error::{FillError, Result};
pub use locate::{FieldFill, FillState, ReferralField, fill_referral_field, is_excluded_line};
pub use strategy::{FillReport, FillStrategy, LineReplacement};
