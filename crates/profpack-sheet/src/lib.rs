pub mod date;
pub mod detect;
pub mod error;
pub mod rows;
pub mod sheet;
pub mod validate;

pub use date::{display_date, serial_to_datetime};
pub use detect::{MAX_HEADER_COLS, MAX_HEADER_ROWS, detect_columns};
pub use error::{Result, SheetError};
pub use rows::{ExtractedRow, RowReader};
pub use sheet::SheetGrid;
pub use validate::{missing_labels, require_columns};
