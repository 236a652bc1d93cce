//! datamatch - Match two CSV files on key columns and export the result to Excel
//!
//! A library for loading delimiter-separated data with a Latin-1 fallback,
//! removing duplicate rows, joining two tables on one key column per side,
//! and writing the matched result as a single-sheet xlsx workbook.

pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod output;
pub mod parser;
pub mod transform;

pub use config::Config;
pub use error::{MatchError, Result};
pub use model::Table;
pub use transform::{match_tables, JoinMode, MatchOutcome, MatchReport};
