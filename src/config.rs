//! Runtime configuration for a match run

use std::path::PathBuf;
use std::str::FromStr;

use crate::transform::JoinMode;

/// Default path the matched workbook is written to
pub const DEFAULT_OUTPUT: &str = "matched_data.xlsx";

/// How the run summary is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryFormat {
    Terminal,
    Json,
}

impl Default for SummaryFormat {
    fn default() -> Self {
        SummaryFormat::Terminal
    }
}

impl FromStr for SummaryFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "terminal" | "text" => Ok(SummaryFormat::Terminal),
            "json" => Ok(SummaryFormat::Json),
            other => Err(format!("unknown summary format: {other}")),
        }
    }
}

/// Settings for one run of the pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// First input file
    pub first_file: PathBuf,
    /// Second input file
    pub second_file: PathBuf,
    /// Key column in the first table (defaults to its first column)
    pub first_key: Option<String>,
    /// Key column in the second table (defaults to its first column)
    pub second_key: Option<String>,
    /// Which rows survive the join
    pub join_mode: JoinMode,
    /// Drop duplicate rows from both inputs before joining
    pub remove_duplicates: bool,
    /// Where the matched workbook is written
    pub output: PathBuf,
    /// Summary style on stdout
    pub summary_format: SummaryFormat,
    /// Rows shown per preview block
    pub preview_rows: usize,
    /// Print counts only, no preview tables
    pub stats_only: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            first_file: PathBuf::new(),
            second_file: PathBuf::new(),
            first_key: None,
            second_key: None,
            join_mode: JoinMode::default(),
            remove_duplicates: true,
            output: PathBuf::from(DEFAULT_OUTPUT),
            summary_format: SummaryFormat::default(),
            preview_rows: 5,
            stats_only: false,
        }
    }
}

impl Config {
    pub fn new(first_file: impl Into<PathBuf>, second_file: impl Into<PathBuf>) -> Self {
        Config {
            first_file: first_file.into(),
            second_file: second_file.into(),
            ..Config::default()
        }
    }

    /// Set both key columns at once.
    pub fn with_keys(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.first_key = Some(first.into());
        self.second_key = Some(second.into());
        self
    }

    pub fn with_join_mode(mut self, mode: JoinMode) -> Self {
        self.join_mode = mode;
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }
}
