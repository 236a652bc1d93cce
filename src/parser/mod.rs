//! Input loading: byte decoding plus CSV parsing

mod csv;

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use encoding_rs::WINDOWS_1252;

use crate::error::{MatchError, Result};
use crate::model::Table;

/// Load a table from a CSV file on disk.
pub fn load_path(path: &Path) -> Result<Table> {
    let bytes = fs::read(path).map_err(|source| MatchError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_bytes(&bytes)
}

/// Load a table from raw bytes holding comma-separated text.
pub fn load_bytes(bytes: &[u8]) -> Result<Table> {
    let text = decode_text(bytes);
    self::csv::parse_str(&text)
}

/// Decode bytes as UTF-8, falling back to Latin-1 for legacy exports.
///
/// The fallback uses windows-1252, which is what the WHATWG standard resolves
/// the `latin1` label to. Every byte maps to a character there, so the
/// fallback itself cannot fail.
fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => WINDOWS_1252.decode_without_bom_handling(bytes).0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    #[test]
    fn test_decode_utf8_borrows() {
        let text = decode_text("id,café\n".as_bytes());
        assert!(matches!(text, Cow::Borrowed(_)));
        assert_eq!(text, "id,café\n");
    }

    #[test]
    fn test_decode_latin1_fallback() {
        // "café" with the é encoded as Latin-1 0xE9, invalid as UTF-8.
        let text = decode_text(b"caf\xe9");
        assert_eq!(text, "café");
    }

    #[test]
    fn test_load_latin1_bytes() {
        let table = load_bytes(b"name,city\nRen\xe9e,Z\xfcrich\n").unwrap();
        assert_eq!(
            table.rows[0].cells[0],
            CellValue::Text("Renée".to_string())
        );
        assert_eq!(
            table.rows[0].cells[1],
            CellValue::Text("Zürich".to_string())
        );
    }
}
