//! Summary output for match runs

mod json;
mod terminal;

use std::path::Path;

use anyhow::Result;
use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::config::{Config, SummaryFormat};
use crate::transform::MatchOutcome;

pub use json::JsonSummary;
pub use terminal::TerminalSummary;

/// Everything a summary formatter needs to describe one run.
pub struct MatchView<'a> {
    pub outcome: &'a MatchOutcome,
    pub first_path: &'a Path,
    pub second_path: &'a Path,
    pub output_path: &'a Path,
}

/// Trait for summary formatters
pub trait SummaryFormatter {
    /// Render the run summary to a writer
    fn render(&self, view: &MatchView<'_>, writer: &mut dyn WriteColor) -> Result<()>;
}

/// Factory for creating summary formatters
pub struct SummaryFactory;

impl SummaryFactory {
    /// Create a summary formatter based on the configured format
    pub fn create(config: &Config) -> Box<dyn SummaryFormatter> {
        let preview_rows = if config.stats_only {
            0
        } else {
            config.preview_rows
        };
        match config.summary_format {
            SummaryFormat::Terminal => Box::new(TerminalSummary::new(preview_rows)),
            SummaryFormat::Json => Box::new(JsonSummary::new(preview_rows)),
        }
    }
}

/// Render the run summary to stdout
pub fn render_to_stdout(view: &MatchView<'_>, config: &Config) -> Result<()> {
    let formatter = SummaryFactory::create(config);
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    formatter.render(view, &mut stdout)
}
