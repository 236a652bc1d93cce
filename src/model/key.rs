//! Join-key coercion and lookup

use indexmap::IndexMap;

use super::table::{CellValue, Table};

/// Coerce a cell to the text form used for key comparison.
///
/// Every key column is compared through this rendering, so `Int(5)`,
/// `Float(5.0)` and `Text("5")` all match, and missing keys (all rendered
/// `NULL`) match each other.
pub fn key_text(cell: &CellValue) -> String {
    cell.display().into_owned()
}

/// Multimap from coerced key text to the row indices that bear it,
/// preserving first-seen key order and per-key row order.
pub struct KeyIndex {
    map: IndexMap<String, Vec<usize>>,
}

impl KeyIndex {
    /// Index one column of a table
    pub fn build(table: &Table, column: usize) -> Self {
        let mut map: IndexMap<String, Vec<usize>> = IndexMap::new();
        for (idx, row) in table.rows.iter().enumerate() {
            let key = match row.get(column) {
                Some(cell) => key_text(cell),
                None => key_text(&CellValue::Null),
            };
            map.entry(key).or_default().push(idx);
        }
        Self { map }
    }

    /// Row indices whose key coerces to `key`, in table order
    pub fn rows_for(&self, key: &str) -> Option<&[usize]> {
        self.map.get(key).map(Vec::as_slice)
    }

    /// Number of distinct coerced keys
    pub fn distinct_keys(&self) -> usize {
        self.map.len()
    }
}
