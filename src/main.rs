//! datamatch - Match two CSV files on key columns and export the result to Excel

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use datamatch::config::{Config, SummaryFormat, DEFAULT_OUTPUT};
use datamatch::output::{render_to_stdout, MatchView};
use datamatch::transform::{match_tables, JoinMode};
use datamatch::{export, parser};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliJoinMode {
    Inner,
    Left,
    Right,
    Outer,
}

impl From<CliJoinMode> for JoinMode {
    fn from(mode: CliJoinMode) -> Self {
        match mode {
            CliJoinMode::Inner => JoinMode::Inner,
            CliJoinMode::Left => JoinMode::Left,
            CliJoinMode::Right => JoinMode::Right,
            CliJoinMode::Outer => JoinMode::Outer,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliSummaryFormat {
    Terminal,
    Json,
}

impl From<CliSummaryFormat> for SummaryFormat {
    fn from(format: CliSummaryFormat) -> Self {
        match format {
            CliSummaryFormat::Terminal => SummaryFormat::Terminal,
            CliSummaryFormat::Json => SummaryFormat::Json,
        }
    }
}

/// Match two CSV files on key columns and export the result to Excel
#[derive(Parser, Debug)]
#[command(name = "datamatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// First file to match
    first_file: PathBuf,

    /// Second file to match
    second_file: PathBuf,

    /// Key column for both files (each file's first column when unset)
    #[arg(short, long, conflicts_with_all = ["key1", "key2"])]
    key: Option<String>,

    /// Key column in the first file
    #[arg(long)]
    key1: Option<String>,

    /// Key column in the second file
    #[arg(long)]
    key2: Option<String>,

    /// Join mode
    #[arg(short, long, value_enum, default_value = "inner")]
    join: CliJoinMode,

    /// Keep duplicate rows instead of dropping them before the join
    #[arg(long)]
    keep_duplicates: bool,

    /// Where to write the matched workbook
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Summary format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: CliSummaryFormat,

    /// Rows shown per preview table
    #[arg(long, default_value_t = 5)]
    preview: usize,

    /// Only show shapes and counts, not preview tables
    #[arg(long)]
    stats_only: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(has_matches) => {
            if has_matches {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1) // Nothing matched
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();

    let config = Config {
        first_file: cli.first_file,
        second_file: cli.second_file,
        first_key: cli.key.clone().or(cli.key1),
        second_key: cli.key.or(cli.key2),
        join_mode: cli.join.into(),
        remove_duplicates: !cli.keep_duplicates,
        output: cli.output,
        summary_format: cli.format.into(),
        preview_rows: cli.preview,
        stats_only: cli.stats_only,
    };

    let first = parser::load_path(&config.first_file).with_context(|| {
        format!("Failed to parse first file: {}", config.first_file.display())
    })?;
    let second = parser::load_path(&config.second_file).with_context(|| {
        format!(
            "Failed to parse second file: {}",
            config.second_file.display()
        )
    })?;

    let outcome = match_tables(&first, &second, &config).context("Failed to match datasets")?;

    export::write_xlsx(&outcome.matched, &config.output)?;

    let view = MatchView {
        outcome: &outcome,
        first_path: &config.first_file,
        second_path: &config.second_file,
        output_path: &config.output,
    };
    render_to_stdout(&view, &config)?;

    Ok(outcome.report.has_matches())
}
