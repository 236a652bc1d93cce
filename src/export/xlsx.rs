//! Excel workbook rendering

use rust_xlsxwriter::{Workbook, Worksheet};

use crate::error::{MatchError, Result};
use crate::model::{CellValue, Table};

/// Worksheet name the matched data lands on
pub const SHEET_NAME: &str = "Sheet1";

// Hard limits of the xlsx format; the header row counts against the cap.
const MAX_ROWS: usize = 1_048_576;
const MAX_COLUMNS: usize = 16_384;

/// Render a table into the bytes of a single-sheet xlsx workbook.
///
/// Row 0 holds the column names; each table row follows in order. Integers
/// and floats become numbers, booleans become booleans, text becomes text.
/// Nulls and NaN leave their cell empty, since xlsx has no encoding for
/// either; infinities are written as text.
pub fn to_xlsx_bytes(table: &Table) -> Result<Vec<u8>> {
    let rows = table.row_count() + 1;
    let columns = table.column_count();
    if rows > MAX_ROWS || columns > MAX_COLUMNS {
        return Err(MatchError::SheetLimit { rows, columns });
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (c, column) in table.columns.iter().enumerate() {
        worksheet.write_string(0, c as u16, &column.name)?;
    }
    for (r, row) in table.rows.iter().enumerate() {
        for (c, cell) in row.cells.iter().enumerate() {
            write_cell(worksheet, (r + 1) as u32, c as u16, cell)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, cell: &CellValue) -> Result<()> {
    match cell {
        CellValue::Null => {}
        CellValue::Int(v) => {
            sheet.write_number(row, col, *v as f64)?;
        }
        CellValue::Float(v) if v.is_nan() => {}
        CellValue::Float(v) if v.is_infinite() => {
            sheet.write_string(row, col, if *v > 0.0 { "inf" } else { "-inf" })?;
        }
        CellValue::Float(v) => {
            sheet.write_number(row, col, *v)?;
        }
        CellValue::Bool(v) => {
            sheet.write_boolean(row, col, *v)?;
        }
        CellValue::Text(v) => {
            sheet.write_string(row, col, v.as_str())?;
        }
    }
    Ok(())
}
