//! Error taxonomy for the match pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by loading, joining, or exporting tables.
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input has no header row")]
    MissingHeader,

    #[error("malformed row at line {line}: expected {expected} fields, found {found}")]
    RowTooWide {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{side} table has no columns")]
    EmptyTable { side: &'static str },

    #[error("key column '{column}' not found in {side} table")]
    KeyColumnNotFound { column: String, side: &'static str },

    #[error("joined column name '{name}' is ambiguous after suffixing")]
    AmbiguousColumn { name: String },

    #[error("result exceeds worksheet limits: {rows} rows x {columns} columns")]
    SheetLimit { rows: usize, columns: usize },

    #[error("failed to build workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, MatchError>;
