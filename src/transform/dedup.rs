//! Duplicate-row removal

use rustc_hash::FxHashSet;

use crate::model::{CellValue, Table};

/// Drop duplicate rows, keeping the first occurrence of each.
///
/// Row identity is the full cell sequence, compared type-sensitively, so a
/// row holding `5` and one holding `5.0` never collapse. With `enabled`
/// false the table passes through unchanged.
pub fn drop_duplicates(table: &Table, enabled: bool) -> Table {
    let mut result = Table::new(table.columns.clone());
    if !enabled {
        result.rows = table.rows.clone();
        return result;
    }

    let mut seen: FxHashSet<&[CellValue]> = FxHashSet::default();
    for row in &table.rows {
        if seen.insert(row.cells.as_slice()) {
            result.rows.push(row.clone());
        }
    }
    result
}
