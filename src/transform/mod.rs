//! The match pipeline: dedup both tables, then join them on their keys

mod dedup;
mod join;

pub use self::dedup::drop_duplicates;
pub use self::join::{join_tables, JoinMode, FIRST_SUFFIX, SECOND_SUFFIX};

use serde::Serialize;

use crate::config::Config;
use crate::error::{MatchError, Result};
use crate::model::Table;

/// Row and column counts of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shape {
    pub rows: usize,
    pub columns: usize,
}

impl Shape {
    pub fn of(table: &Table) -> Self {
        let (rows, columns) = table.shape();
        Shape { rows, columns }
    }
}

/// Serializable summary of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub first: Shape,
    pub first_clean: Shape,
    pub second: Shape,
    pub second_clean: Shape,
    pub matched: Shape,
    pub remove_duplicates: bool,
    pub join_mode: JoinMode,
    pub first_key: String,
    pub second_key: String,
}

impl MatchReport {
    /// True when the join produced at least one row.
    pub fn has_matches(&self) -> bool {
        self.matched.rows > 0
    }
}

/// Everything a run produces: the cleaned inputs, the joined table, and the
/// shape report describing them.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub first_clean: Table,
    pub second_clean: Table,
    pub matched: Table,
    pub report: MatchReport,
}

/// Run the full pipeline over two loaded tables.
///
/// Keys left unset fall back to each table's first column. Deduplication
/// happens before the join, so duplicate input rows never inflate the match.
pub fn match_tables(first: &Table, second: &Table, config: &Config) -> Result<MatchOutcome> {
    let first_key = resolve_key(first, config.first_key.as_deref(), "first")?;
    let second_key = resolve_key(second, config.second_key.as_deref(), "second")?;

    let first_clean = drop_duplicates(first, config.remove_duplicates);
    let second_clean = drop_duplicates(second, config.remove_duplicates);

    let matched = join_tables(
        &first_clean,
        &second_clean,
        &first_key,
        &second_key,
        config.join_mode,
    )?;

    let report = MatchReport {
        first: Shape::of(first),
        first_clean: Shape::of(&first_clean),
        second: Shape::of(second),
        second_clean: Shape::of(&second_clean),
        matched: Shape::of(&matched),
        remove_duplicates: config.remove_duplicates,
        join_mode: config.join_mode,
        first_key,
        second_key,
    };

    Ok(MatchOutcome {
        first_clean,
        second_clean,
        matched,
        report,
    })
}

fn resolve_key(table: &Table, requested: Option<&str>, side: &'static str) -> Result<String> {
    match requested {
        Some(name) => Ok(name.to_string()),
        None => table
            .columns
            .first()
            .map(|column| column.name.clone())
            .ok_or(MatchError::EmptyTable { side }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellValue, Column};

    fn table(names: &[&str], rows: Vec<Vec<CellValue>>) -> Table {
        let columns = names
            .iter()
            .enumerate()
            .map(|(i, name)| Column::new(*name, i))
            .collect();
        let mut table = Table::new(columns);
        for cells in rows {
            table.add_row(cells);
        }
        table
    }

    fn first_fixture() -> Table {
        table(
            &["id", "name"],
            vec![
                vec![CellValue::Int(1), CellValue::Text("a".into())],
                vec![CellValue::Int(2), CellValue::Text("b".into())],
                vec![CellValue::Int(2), CellValue::Text("b".into())],
            ],
        )
    }

    fn second_fixture() -> Table {
        table(
            &["id", "val"],
            vec![
                vec![CellValue::Int(2), CellValue::Text("x".into())],
                vec![CellValue::Int(3), CellValue::Text("y".into())],
            ],
        )
    }

    #[test]
    fn test_default_run_dedups_then_joins_on_first_columns() {
        let outcome =
            match_tables(&first_fixture(), &second_fixture(), &Config::default()).unwrap();

        assert_eq!(outcome.report.first, Shape { rows: 3, columns: 2 });
        assert_eq!(outcome.report.first_clean, Shape { rows: 2, columns: 2 });
        assert_eq!(outcome.report.second_clean, Shape { rows: 2, columns: 2 });
        assert_eq!(outcome.report.matched, Shape { rows: 1, columns: 4 });
        assert_eq!(outcome.report.first_key, "id");
        assert_eq!(outcome.report.second_key, "id");
        assert!(outcome.report.has_matches());

        assert_eq!(
            outcome.matched.rows[0].cells,
            vec![
                CellValue::Int(2),
                CellValue::Text("b".into()),
                CellValue::Int(2),
                CellValue::Text("x".into()),
            ]
        );
    }

    #[test]
    fn test_keeping_duplicates_inflates_the_match() {
        let config = Config {
            remove_duplicates: false,
            ..Config::default()
        };
        let outcome = match_tables(&first_fixture(), &second_fixture(), &config).unwrap();
        assert_eq!(outcome.report.first_clean.rows, 3);
        assert_eq!(outcome.report.matched.rows, 2);
    }

    #[test]
    fn test_explicit_keys_override_the_default() {
        let config = Config {
            first_key: Some("name".into()),
            second_key: Some("val".into()),
            join_mode: JoinMode::Left,
            ..Config::default()
        };
        let outcome = match_tables(&first_fixture(), &second_fixture(), &config).unwrap();
        assert_eq!(outcome.report.first_key, "name");
        assert_eq!(outcome.report.second_key, "val");
        // No name ever equals a val, so every left row survives unmatched.
        assert_eq!(outcome.report.matched.rows, 2);
    }

    #[test]
    fn test_empty_table_has_no_default_key() {
        let empty = Table::new(Vec::new());
        let err = match_tables(&empty, &second_fixture(), &Config::default()).unwrap_err();
        match err {
            MatchError::EmptyTable { side } => assert_eq!(side, "first"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_no_matches_reported() {
        let first = table(&["id"], vec![vec![CellValue::Int(1)]]);
        let second = table(&["id"], vec![vec![CellValue::Int(9)]]);
        let outcome = match_tables(&first, &second, &Config::default()).unwrap();
        assert!(!outcome.report.has_matches());
        assert_eq!(outcome.matched.column_count(), 2);
    }
}
