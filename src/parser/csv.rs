//! CSV parsing with an explicit per-column typing pass

use csv::{ReaderBuilder, StringRecord};

use crate::error::{MatchError, Result};
use crate::model::{CellType, CellValue, Column, Table};

/// Parse decoded CSV text into a typed table.
///
/// The first record is the header; its names are trimmed, empty names become
/// `Column{n}`, and duplicates are mangled with `.1`, `.2`, … so the table's
/// unique-name invariant holds. Rows shorter than the header are padded with
/// missing markers; wider rows are a fatal parse error. Fully blank lines
/// are skipped, not read as all-missing rows; a quoted empty field still
/// makes a row.
pub(crate) fn parse_str(text: &str) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(MatchError::MissingHeader);
    }
    let names = mangle_headers(&headers);
    let width = names.len();

    // Raw pass: trim cells and map missing tokens to None. Typing happens
    // afterwards, over whole columns.
    let mut raw_rows: Vec<Vec<Option<String>>> = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() > width {
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(i as u64 + 2);
            return Err(MatchError::RowTooWide {
                line,
                expected: width,
                found: record.len(),
            });
        }

        let mut cells: Vec<Option<String>> = record
            .iter()
            .map(|field| {
                let trimmed = field.trim();
                if is_missing(trimmed) {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect();
        cells.resize(width, None);
        raw_rows.push(cells);
    }

    // Typing pass: per column, try integer, then float, then boolean, else text.
    let mut columns = Vec::with_capacity(width);
    let mut typed_columns = Vec::with_capacity(width);
    for (idx, name) in names.iter().enumerate() {
        let raw: Vec<Option<&str>> = raw_rows.iter().map(|row| row[idx].as_deref()).collect();
        let (cell_type, cells) = type_column(&raw);
        columns.push(Column::with_type(name.clone(), idx, cell_type));
        typed_columns.push(cells);
    }

    let mut rows: Vec<Vec<CellValue>> = (0..raw_rows.len())
        .map(|_| Vec::with_capacity(width))
        .collect();
    for column_cells in typed_columns {
        for (r, cell) in column_cells.into_iter().enumerate() {
            rows[r].push(cell);
        }
    }

    let mut table = Table::new(columns);
    for cells in rows {
        table.add_row(cells);
    }
    Ok(table)
}

/// Tokens treated as the missing-marker (cells are trimmed first)
fn is_missing(s: &str) -> bool {
    s.is_empty() || s.eq_ignore_ascii_case("null") || s == "NA"
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("yes") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") || s.eq_ignore_ascii_case("no") {
        Some(false)
    } else {
        None
    }
}

/// Infer one column's type and materialize its cells.
fn type_column(values: &[Option<&str>]) -> (CellType, Vec<CellValue>) {
    if values.iter().all(Option::is_none) {
        return (CellType::Null, vec![CellValue::Null; values.len()]);
    }
    if let Some(cells) = try_parse_all(values, |s| s.parse::<i64>().ok().map(CellValue::Int)) {
        return (CellType::Int, cells);
    }
    if let Some(cells) = try_parse_all(values, |s| s.parse::<f64>().ok().map(CellValue::Float)) {
        return (CellType::Float, cells);
    }
    if let Some(cells) = try_parse_all(values, |s| parse_bool(s).map(CellValue::Bool)) {
        return (CellType::Bool, cells);
    }
    let cells = values
        .iter()
        .map(|value| match value {
            Some(s) => CellValue::Text((*s).to_string()),
            None => CellValue::Null,
        })
        .collect();
    (CellType::Text, cells)
}

/// Parse every non-missing value with `parse`, or bail with None on the
/// first value that refuses.
fn try_parse_all(
    values: &[Option<&str>],
    parse: impl Fn(&str) -> Option<CellValue>,
) -> Option<Vec<CellValue>> {
    let mut cells = Vec::with_capacity(values.len());
    for value in values {
        match value {
            None => cells.push(CellValue::Null),
            Some(s) => cells.push(parse(s)?),
        }
    }
    Some(cells)
}

/// Unique column names from a raw header record
fn mangle_headers(raw: &StringRecord) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(raw.len());
    for (i, field) in raw.iter().enumerate() {
        let trimmed = field.trim();
        let base = if trimmed.is_empty() {
            format!("Column{}", i + 1)
        } else {
            trimmed.to_string()
        };
        let mut name = base.clone();
        let mut n = 1;
        while names.iter().any(|existing| existing == &name) {
            name = format!("{base}.{n}");
            n += 1;
        }
        names.push(name);
    }
    names
}
