//! Minimal WordprocessingML model for template filling.
//!
//! A `.docx` file is an OOXML zip package; the main document part
//! (`word/document.xml`) holds paragraphs (`w:p`) of formatted runs (`w:r`).
//! This crate round-trips the package while exposing just enough structure
//! for field filling: fragments (paragraphs, whether top-level or inside
//! table cells) in document order, per-run text and underline state, and run
//! text mutation. Every other package part is preserved byte-for-byte.

pub mod document;
pub mod error;
pub mod field;
pub mod package;
mod xml;

pub use document::{DocxDocument, FragmentId, RunView};
pub use error::{DocxError, Result};
pub use field::{FILLER, is_blank_field_run, pad_to_length};
pub use package::{DOCUMENT_PART, DocxPackage};
