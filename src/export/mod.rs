//! Writing matched results out to disk

mod xlsx;

pub use self::xlsx::{to_xlsx_bytes, SHEET_NAME};

use std::fs;
use std::path::Path;

use crate::error::{MatchError, Result};
use crate::model::Table;

/// Write a table to `path` as a single-sheet xlsx workbook.
pub fn write_xlsx(table: &Table, path: &Path) -> Result<()> {
    let bytes = to_xlsx_bytes(table)?;
    fs::write(path, bytes).map_err(|source| MatchError::Write {
        path: path.to_path_buf(),
        source,
    })
}
