//! End-to-end pipeline tests over the library API

use calamine::{open_workbook_auto, Data, Reader};

use datamatch::config::Config;
use datamatch::model::CellValue;
use datamatch::transform::{match_tables, JoinMode};
use datamatch::{export, parser, Table};

fn load(text: &str) -> Table {
    parser::load_bytes(text.as_bytes()).unwrap()
}

const FIRST: &str = "id,name\n1,a\n2,b\n2,b\n";
const SECOND: &str = "id,val\n2,x\n3,y\n";

#[test]
fn test_inner_match_scenario() {
    let first = load(FIRST);
    let second = load(SECOND);
    let outcome = match_tables(&first, &second, &Config::default()).unwrap();

    assert_eq!(outcome.report.first.rows, 3);
    assert_eq!(outcome.report.first_clean.rows, 2);
    assert_eq!(outcome.report.second_clean.rows, 2);
    assert_eq!(outcome.matched.shape(), (1, 4));

    let names: Vec<&str> = outcome.matched.column_names().collect();
    assert_eq!(names, vec!["id_df1", "name", "id_df2", "val"]);
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
fn test_left_join_scenario() {
    let first = load(FIRST);
    let second = load(SECOND);
    let config = Config::default().with_join_mode(JoinMode::Left);
    let outcome = match_tables(&first, &second, &config).unwrap();

    assert_eq!(outcome.matched.shape(), (2, 4));
    // The unmatched id=1 row comes first and carries nulls on the right.
    assert_eq!(outcome.matched.rows[0].cells[0], CellValue::Int(1));
    assert_eq!(outcome.matched.rows[0].cells[2], CellValue::Null);
    assert_eq!(outcome.matched.rows[0].cells[3], CellValue::Null);
}

#[test]
fn test_inner_count_is_key_multiplicity_product() {
    // Keys: first has 1 twice and 2, 3 once; second has 1 once, 2 twice, 5 once.
    let first = load("k,p\n1,a\n1,b\n2,c\n3,d\n");
    let second = load("k,q\n1,w\n2,x\n2,y\n5,z\n");
    let outcome = match_tables(&first, &second, &Config::default()).unwrap();
    // 2*1 (k=1) + 1*2 (k=2) + 1*0 + 0*1 = 4
    assert_eq!(outcome.matched.row_count(), 4);
}

#[test]
fn test_outer_equals_left_plus_right_minus_inner() {
    let first = load("k,p\n1,a\n1,b\n2,c\n3,d\n");
    let second = load("k,q\n1,w\n2,x\n2,y\n5,z\n");

    let count = |mode: JoinMode| {
        let config = Config::default().with_join_mode(mode);
        match_tables(&first, &second, &config)
            .unwrap()
            .matched
            .row_count()
    };

    let inner = count(JoinMode::Inner);
    let left = count(JoinMode::Left);
    let right = count(JoinMode::Right);
    let outer = count(JoinMode::Outer);

    assert_eq!(left, inner + 1);
    assert_eq!(right, inner + 1);
    assert_eq!(outer, left + right - inner);
}

#[test]
fn test_keeping_duplicates_doubles_the_scenario_match() {
    let first = load(FIRST);
    let second = load(SECOND);
    let config = Config {
        remove_duplicates: false,
        ..Config::default()
    };
    let outcome = match_tables(&first, &second, &config).unwrap();
    assert_eq!(outcome.matched.row_count(), 2);
}

#[test]
fn test_keys_match_across_numeric_and_text_columns() {
    // First file's key column types as Int, the second's as Text.
    let first = load("id,name\n5,a\n");
    let second = load("code,val\n5,m\nx,n\n");
    let config = Config::default().with_keys("id", "code");
    let outcome = match_tables(&first, &second, &config).unwrap();
    assert_eq!(outcome.matched.row_count(), 1);
    assert_eq!(outcome.matched.rows[0].cells[3], CellValue::Text("m".into()));
}

#[test]
fn test_latin1_file_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.csv");
    std::fs::write(&path, b"name,city\nRen\xe9e,Z\xfcrich\nNo\xebl,Lyon\n").unwrap();

    let table = parser::load_path(&path).unwrap();
    assert_eq!(table.shape(), (2, 2));
    assert_eq!(table.rows[0].cells[0], CellValue::Text("Renée".into()));
    assert_eq!(table.rows[1].cells[0], CellValue::Text("Noël".into()));
}

#[test]
fn test_xlsx_round_trip() {
    let first = load(FIRST);
    let second = load(SECOND);
    let outcome = match_tables(&first, &second, &Config::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("matched.xlsx");
    export::write_xlsx(&outcome.matched, &path).unwrap();

    let mut workbook = open_workbook_auto(&path).unwrap();
    let range = workbook.worksheet_range("Sheet1").unwrap();
    assert_eq!(range.get_size(), (2, 4));
    assert_eq!(
        range.get_value((0, 0)),
        Some(&Data::String("id_df1".into()))
    );
    assert_eq!(range.get_value((0, 3)), Some(&Data::String("val".into())));
    // Spreadsheet numbers come back as floats.
    assert_eq!(range.get_value((1, 0)), Some(&Data::Float(2.0)));
    assert_eq!(range.get_value((1, 1)), Some(&Data::String("b".into())));
    assert_eq!(range.get_value((1, 3)), Some(&Data::String("x".into())));
}

#[test]
fn test_round_trip_preserves_count_and_names_for_every_mode() {
    let first = load("k,p\n1,a\n2,b\n");
    let second = load("k,q\n2,x\n3,y\n");
    let dir = tempfile::tempdir().unwrap();

    for mode in [
        JoinMode::Inner,
        JoinMode::Left,
        JoinMode::Right,
        JoinMode::Outer,
    ] {
        let config = Config::default().with_join_mode(mode);
        let outcome = match_tables(&first, &second, &config).unwrap();
        let path = dir.path().join(format!("{mode}.xlsx"));
        export::write_xlsx(&outcome.matched, &path).unwrap();

        let mut workbook = open_workbook_auto(&path).unwrap();
        let range = workbook.worksheet_range("Sheet1").unwrap();
        assert_eq!(range.get_size().0, outcome.matched.row_count() + 1);

        let header: Vec<String> = (0..range.get_size().1)
            .map(|c| range.get_value((0, c as u32)).unwrap().to_string())
            .collect();
        let names: Vec<String> = outcome
            .matched
            .column_names()
            .map(str::to_string)
            .collect();
        assert_eq!(header, names);
    }
}
