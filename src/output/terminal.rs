//! Colored terminal summary

use std::path::Path;

use anyhow::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::model::Table;
use crate::transform::Shape;

use super::{MatchView, SummaryFormatter};

/// Human-readable summary with shape lines and table previews
pub struct TerminalSummary {
    preview_rows: usize,
}

impl TerminalSummary {
    pub fn new(preview_rows: usize) -> Self {
        Self { preview_rows }
    }

    fn write_header(&self, view: &MatchView<'_>, writer: &mut dyn WriteColor) -> Result<()> {
        writeln!(writer, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(
            writer,
            " datamatch: {} + {}",
            view.first_path.display(),
            view.second_path.display()
        )?;
        writeln!(writer, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(writer)?;
        Ok(())
    }

    fn write_section(&self, title: &str, writer: &mut dyn WriteColor) -> Result<()> {
        writer.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(writer, "{title}:")?;
        writer.reset()?;
        Ok(())
    }

    fn write_input(
        &self,
        path: &Path,
        raw: Shape,
        clean: &Table,
        deduped: bool,
        writer: &mut dyn WriteColor,
    ) -> Result<()> {
        writeln!(writer, "  {}: {}", path.display(), shape_line(raw))?;
        if deduped {
            writeln!(
                writer,
                "  after removing duplicates: {}",
                shape_line(Shape::of(clean))
            )?;
        }
        self.write_preview(clean, writer)?;
        Ok(())
    }

    fn write_preview(&self, table: &Table, writer: &mut dyn WriteColor) -> Result<()> {
        if self.preview_rows == 0 || table.row_count() == 0 {
            return Ok(());
        }
        let mut builder = Builder::default();
        builder.push_record(table.column_names());
        for row in table.head(self.preview_rows) {
            builder.push_record(row.cells.iter().map(|cell| cell.display().into_owned()));
        }
        let mut preview = builder.build();
        preview.with(Style::sharp());
        writeln!(writer, "{preview}")?;
        Ok(())
    }

    fn write_status(&self, view: &MatchView<'_>, writer: &mut dyn WriteColor) -> Result<()> {
        let report = &view.outcome.report;
        if report.has_matches() {
            writer.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            writeln!(
                writer,
                "Wrote {} ({} rows)",
                view.output_path.display(),
                report.matched.rows
            )?;
        } else {
            writer.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
            writeln!(
                writer,
                "No rows matched; wrote header-only workbook to {}",
                view.output_path.display()
            )?;
        }
        writer.reset()?;
        Ok(())
    }
}

impl Default for TerminalSummary {
    fn default() -> Self {
        Self::new(5)
    }
}

impl SummaryFormatter for TerminalSummary {
    fn render(&self, view: &MatchView<'_>, writer: &mut dyn WriteColor) -> Result<()> {
        let report = &view.outcome.report;
        self.write_header(view, writer)?;

        self.write_section("Inputs", writer)?;
        self.write_input(
            view.first_path,
            report.first,
            &view.outcome.first_clean,
            report.remove_duplicates,
            writer,
        )?;
        self.write_input(
            view.second_path,
            report.second,
            &view.outcome.second_clean,
            report.remove_duplicates,
            writer,
        )?;
        writeln!(writer)?;

        self.write_section("Matched Result", writer)?;
        writeln!(
            writer,
            "  {} join on {} = {}",
            report.join_mode, report.first_key, report.second_key
        )?;
        writeln!(writer, "  {}", shape_line(report.matched))?;
        self.write_preview(&view.outcome.matched, writer)?;
        writeln!(writer)?;

        self.write_status(view, writer)
    }
}

fn shape_line(shape: Shape) -> String {
    format!("{} rows x {} columns", shape.rows, shape.columns)
}
