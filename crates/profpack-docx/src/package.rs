//! OOXML package round-trip.
//!
//! Only `word/document.xml` is ever rewritten; every other entry (styles,
//! fonts, media, relationships) is carried through byte-for-byte in its
//! original order so a filled document stays as close as possible to the
//! uploaded template.

use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::document::DocxDocument;
use crate::error::{DocxError, Result};

pub const DOCUMENT_PART: &str = "word/document.xml";

/// A `.docx` template opened for filling.
pub struct DocxPackage {
    entries: Vec<(String, Vec<u8>)>,
    document: DocxDocument,
}

impl DocxPackage {
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_bytes(&fs::read(path)?)
    }

    /// Open a package from in-memory bytes (the uploaded template). Each
    /// generated document starts from a fresh `from_bytes` call, so one
    /// template serves any number of rows without cross-row state.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes.to_vec()))?;
        let mut entries = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            let name = entry.name().to_string();
            let mut data = Vec::new();
            entry.read_to_end(&mut data)?;
            entries.push((name, data));
        }
        let document_xml = entries
            .iter()
            .find(|(name, _)| name == DOCUMENT_PART)
            .map(|(_, data)| data)
            .ok_or(DocxError::MissingPart(DOCUMENT_PART))?;
        let document = DocxDocument::parse(std::str::from_utf8(document_xml)?)?;
        debug!(entries = entries.len(), "document package opened");
        Ok(Self { entries, document })
    }

    pub fn document(&self) -> &DocxDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut DocxDocument {
        &mut self.document
    }

    /// Serialize the package with the current document state.
    ///
    /// Media entries are stored uncompressed and everything else deflated,
    /// matching the layout Word itself produces.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let document_xml = self.document.to_xml()?.into_bytes();
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        for (name, data) in &self.entries {
            let options = if name.starts_with("word/media/") {
                stored
            } else {
                deflated
            };
            writer.start_file(name.as_str(), options)?;
            if name == DOCUMENT_PART {
                writer.write_all(&document_xml)?;
            } else {
                writer.write_all(data)?;
            }
        }
        Ok(writer.finish()?.into_inner())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_bytes()?)?;
        debug!(path = %path.display(), "document saved");
        Ok(())
    }
}
