//! JSON summary format

use anyhow::Result;
use serde::Serialize;
use termcolor::WriteColor;

use crate::model::{CellValue, Row, Table};
use crate::transform::MatchReport;

use super::{MatchView, SummaryFormatter};

/// Machine-readable summary: one JSON object on stdout
pub struct JsonSummary {
    preview_rows: usize,
    pretty: bool,
}

impl JsonSummary {
    pub fn new(preview_rows: usize) -> Self {
        Self {
            preview_rows,
            pretty: true,
        }
    }

    pub fn compact(preview_rows: usize) -> Self {
        Self {
            preview_rows,
            pretty: false,
        }
    }
}

#[derive(Serialize)]
struct JsonSummaryOutput<'a> {
    first_file: String,
    second_file: String,
    output_file: String,
    report: &'a MatchReport,
    columns: Vec<JsonColumn>,
    preview: Vec<serde_json::Value>,
}

#[derive(Serialize)]
struct JsonColumn {
    name: String,
    dtype: String,
}

fn cell_to_json(cell: &CellValue) -> serde_json::Value {
    match cell {
        CellValue::Null => serde_json::Value::Null,
        CellValue::Int(v) => serde_json::json!(*v),
        // Non-finite floats have no JSON number form and become null.
        CellValue::Float(v) => serde_json::json!(*v),
        CellValue::Bool(v) => serde_json::Value::Bool(*v),
        CellValue::Text(v) => serde_json::Value::String(v.clone()),
    }
}

fn row_to_json(table: &Table, row: &Row) -> serde_json::Value {
    let mut object = serde_json::Map::new();
    for (column, cell) in table.columns.iter().zip(&row.cells) {
        object.insert(column.name.clone(), cell_to_json(cell));
    }
    serde_json::Value::Object(object)
}

impl SummaryFormatter for JsonSummary {
    fn render(&self, view: &MatchView<'_>, writer: &mut dyn WriteColor) -> Result<()> {
        let matched = &view.outcome.matched;
        let columns = matched
            .columns
            .iter()
            .map(|column| JsonColumn {
                name: column.name.clone(),
                dtype: column.inferred_type.to_string(),
            })
            .collect();
        let preview = matched
            .head(self.preview_rows)
            .iter()
            .map(|row| row_to_json(matched, row))
            .collect();

        let output = JsonSummaryOutput {
            first_file: view.first_path.display().to_string(),
            second_file: view.second_path.display().to_string(),
            output_file: view.output_path.display().to_string(),
            report: &view.outcome.report,
            columns,
            preview,
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &output)?;
        } else {
            serde_json::to_writer(&mut *writer, &output)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
