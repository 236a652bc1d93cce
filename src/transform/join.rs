//! Key-based joining of two tables

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::error::{MatchError, Result};
use crate::model::{key_text, CellValue, Column, KeyIndex, Row, Table};

/// Suffix for first-table columns whose names also appear in the second table
pub const FIRST_SUFFIX: &str = "_df1";
/// Suffix for second-table columns whose names also appear in the first table
pub const SECOND_SUFFIX: &str = "_df2";

/// Which rows survive the join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinMode {
    /// Rows with a key present on both sides
    Inner,
    /// Every first-table row, matched or not
    Left,
    /// Every second-table row, matched or not
    Right,
    /// Every row from both sides
    Outer,
}

impl Default for JoinMode {
    fn default() -> Self {
        JoinMode::Inner
    }
}

impl FromStr for JoinMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inner" => Ok(JoinMode::Inner),
            "left" => Ok(JoinMode::Left),
            "right" => Ok(JoinMode::Right),
            "outer" => Ok(JoinMode::Outer),
            other => Err(format!("unknown join mode: {other}")),
        }
    }
}

impl fmt::Display for JoinMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JoinMode::Inner => "inner",
            JoinMode::Left => "left",
            JoinMode::Right => "right",
            JoinMode::Outer => "outer",
        };
        f.write_str(name)
    }
}

/// Join two tables on one key column per side.
///
/// Keys compare by display text, so `5`, `5.0`, and `"5"` all match, and
/// missing keys match each other. Duplicate keys expand to the cross product
/// of their matching rows. Output order follows the first table for inner,
/// left, and outer joins (outer appends unmatched second-table rows at the
/// end) and the second table for right joins.
pub fn join_tables(
    first: &Table,
    second: &Table,
    first_key: &str,
    second_key: &str,
    mode: JoinMode,
) -> Result<Table> {
    let first_idx =
        first
            .column_index(first_key)
            .ok_or_else(|| MatchError::KeyColumnNotFound {
                column: first_key.to_string(),
                side: "first",
            })?;
    let second_idx =
        second
            .column_index(second_key)
            .ok_or_else(|| MatchError::KeyColumnNotFound {
                column: second_key.to_string(),
                side: "second",
            })?;

    let first_width = first.column_count();
    let second_width = second.column_count();
    let mut result = Table::new(joined_columns(first, second)?);

    match mode {
        JoinMode::Inner | JoinMode::Left | JoinMode::Outer => {
            let index = KeyIndex::build(second, second_idx);
            let mut matched_second: FxHashSet<usize> = FxHashSet::default();
            for row in &first.rows {
                let key = row_key(row, first_idx);
                match index.rows_for(&key) {
                    Some(matches) => {
                        for &r in matches {
                            matched_second.insert(r);
                            result.add_row(joined_cells(
                                Some(row),
                                Some(&second.rows[r]),
                                first_width,
                                second_width,
                            ));
                        }
                    }
                    None if mode != JoinMode::Inner => {
                        result.add_row(joined_cells(Some(row), None, first_width, second_width));
                    }
                    None => {}
                }
            }
            if mode == JoinMode::Outer {
                for (r, row) in second.rows.iter().enumerate() {
                    if !matched_second.contains(&r) {
                        result.add_row(joined_cells(None, Some(row), first_width, second_width));
                    }
                }
            }
        }
        JoinMode::Right => {
            let index = KeyIndex::build(first, first_idx);
            for row in &second.rows {
                let key = row_key(row, second_idx);
                match index.rows_for(&key) {
                    Some(matches) => {
                        for &r in matches {
                            result.add_row(joined_cells(
                                Some(&first.rows[r]),
                                Some(row),
                                first_width,
                                second_width,
                            ));
                        }
                    }
                    None => {
                        result.add_row(joined_cells(None, Some(row), first_width, second_width));
                    }
                }
            }
        }
    }

    Ok(result)
}

/// Output columns: first table's then second table's, with shared names
/// suffixed on both sides. Suffixing can itself collide with an existing
/// name, which is an error rather than a silent overwrite.
fn joined_columns(first: &Table, second: &Table) -> Result<Vec<Column>> {
    let first_names: FxHashSet<&str> = first.column_names().collect();
    let second_names: FxHashSet<&str> = second.column_names().collect();

    let mut columns: Vec<Column> = Vec::with_capacity(first.column_count() + second.column_count());
    let mut seen: FxHashSet<String> = FxHashSet::default();

    for column in &first.columns {
        let name = if second_names.contains(column.name.as_str()) {
            format!("{}{FIRST_SUFFIX}", column.name)
        } else {
            column.name.clone()
        };
        if !seen.insert(name.clone()) {
            return Err(MatchError::AmbiguousColumn { name });
        }
        columns.push(Column::with_type(name, columns.len(), column.inferred_type));
    }
    for column in &second.columns {
        let name = if first_names.contains(column.name.as_str()) {
            format!("{}{SECOND_SUFFIX}", column.name)
        } else {
            column.name.clone()
        };
        if !seen.insert(name.clone()) {
            return Err(MatchError::AmbiguousColumn { name });
        }
        columns.push(Column::with_type(name, columns.len(), column.inferred_type));
    }
    Ok(columns)
}

fn row_key(row: &Row, index: usize) -> String {
    match row.get(index) {
        Some(cell) => key_text(cell),
        None => key_text(&CellValue::Null),
    }
}

/// Concatenated output cells, with the absent side padded with nulls.
fn joined_cells(
    first: Option<&Row>,
    second: Option<&Row>,
    first_width: usize,
    second_width: usize,
) -> Vec<CellValue> {
    let mut cells = Vec::with_capacity(first_width + second_width);
    for i in 0..first_width {
        cells.push(
            first
                .and_then(|row| row.get(i))
                .cloned()
                .unwrap_or(CellValue::Null),
        );
    }
    for i in 0..second_width {
        cells.push(
            second
                .and_then(|row| row.get(i))
                .cloned()
                .unwrap_or(CellValue::Null),
        );
    }
    cells
}
