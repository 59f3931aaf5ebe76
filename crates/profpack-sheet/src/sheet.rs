use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use tracing::debug;

use crate::error::{Result, SheetError};

/// A loaded worksheet with 1-based cell addressing.
///
/// Workbook coordinates throughout the crate are 1-based (row 1 is the first
/// spreadsheet row), matching how users read them in Excel; the translation to
/// calamine's 0-based absolute coordinates happens here and nowhere else.
#[derive(Debug)]
pub struct SheetGrid {
    name: String,
    range: Range<Data>,
}

impl SheetGrid {
    /// Load a worksheet from an `.xlsx` file. `sheet` selects a worksheet by
    /// name; `None` takes the first one in the workbook.
    pub fn from_path(path: &Path, sheet: Option<&str>) -> Result<Self> {
        let mut workbook: Xlsx<BufReader<File>> = open_workbook(path)?;
        Self::from_workbook(&mut workbook, sheet)
    }

    /// Load a worksheet from in-memory `.xlsx` bytes (an uploaded file).
    pub fn from_bytes(bytes: &[u8], sheet: Option<&str>) -> Result<Self> {
        let mut workbook = Xlsx::new(Cursor::new(bytes.to_vec()))?;
        Self::from_workbook(&mut workbook, sheet)
    }

    fn from_workbook<R: Read + Seek>(workbook: &mut Xlsx<R>, sheet: Option<&str>) -> Result<Self> {
        let name = match sheet {
            Some(requested) => {
                if !workbook.sheet_names().iter().any(|s| s == requested) {
                    return Err(SheetError::WorksheetNotFound(requested.to_string()));
                }
                requested.to_string()
            }
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or(SheetError::NoWorksheet)?,
        };
        let range = workbook.worksheet_range(&name)?;
        debug!(
            worksheet = %name,
            rows = range.height(),
            columns = range.width(),
            "worksheet loaded"
        );
        Ok(Self { name, range })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cell value at 1-based (row, column). `None` for out-of-range cells.
    pub fn value(&self, row: u32, column: u32) -> Option<&Data> {
        if row == 0 || column == 0 {
            return None;
        }
        self.range.get_value((row - 1, column - 1))
    }

    /// 1-based index of the last row holding any data; 0 for an empty sheet.
    pub fn last_row(&self) -> u32 {
        self.range.end().map(|(row, _)| row + 1).unwrap_or(0)
    }
}
