//! End-to-end pipeline scenarios: fixture directory in, CSV file out.

use std::fs;
use std::path::Path;

use csv::StringRecord;
use tempfile::TempDir;

use scoutmerge::{run, MergeConfig, MergeError};

const SCHEMA: &str = "match_number,team_alliance,team_position,team_number,timestamp\n";

fn write_file(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("Failed to write fixture");
}

fn read_output(path: &Path) -> (StringRecord, Vec<StringRecord>) {
    let mut reader = csv::Reader::from_path(path).expect("Failed to open output");
    let headers = reader.headers().expect("Failed to read headers").clone();
    let rows = reader
        .records()
        .map(|r| r.expect("Failed to read record"))
        .collect();
    (headers, rows)
}

#[test]
fn distinct_timestamps_in_one_group_all_survive() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("input");
    fs::create_dir(&input).unwrap();

    // Two submissions for the same match slot with different timestamps,
    // plus one for another match. Nothing shares a dedup tuple, so no
    // row is dropped.
    write_file(
        &input,
        "a.csv",
        &format!("{SCHEMA}1,red,1,254,100\n1,red,1,254,200\n"),
    );
    write_file(&input, "b.csv", &format!("{SCHEMA}2,blue,1,118,150\n"));

    let output = temp.path().join("merged.csv");
    run(&MergeConfig::new(&input, &output)).expect("pipeline should succeed");

    let (headers, rows) = read_output(&output);
    assert_eq!(
        headers,
        StringRecord::from(vec![
            "match_number",
            "team_alliance",
            "team_position",
            "team_number",
            "timestamp"
        ])
    );
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][4], "100");
    assert_eq!(&rows[1][4], "200");
    assert_eq!(&rows[2][4], "150");
}

#[test]
fn duplicate_timestamps_collapse_to_the_first_row() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("input");
    fs::create_dir(&input).unwrap();

    write_file(
        &input,
        "a.csv",
        &format!("{SCHEMA}1,red,1,254,100\n1,red,1,254,100\n"),
    );
    write_file(&input, "b.csv", &format!("{SCHEMA}2,blue,1,118,150\n"));

    let output = temp.path().join("merged.csv");
    run(&MergeConfig::new(&input, &output)).unwrap();

    let (_, rows) = read_output(&output);
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "1");
    assert_eq!(&rows[0][4], "100");
    assert_eq!(&rows[1][0], "2");
    assert_eq!(&rows[1][4], "150");
}

#[test]
fn custom_group_and_dedup_keys() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("input");
    fs::create_dir(&input).unwrap();

    write_file(
        &input,
        "a.csv",
        &format!("{SCHEMA}1,red,1,254,100\n1,red,2,971,100\n1,blue,1,118,300\n"),
    );

    let output = temp.path().join("merged.csv");
    let config = MergeConfig::new(&input, &output)
        .group_keys(vec!["match_number".into()])
        .dedup_keys(vec!["timestamp".into()]);
    run(&config).unwrap();

    // One group (match 1); the two timestamp=100 rows collapse.
    let (_, rows) = read_output(&output);
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][3], "254");
    assert_eq!(&rows[1][3], "118");
}

#[test]
fn empty_directory_yields_an_empty_output_file() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("input");
    fs::create_dir(&input).unwrap();

    let output = temp.path().join("merged.csv");
    run(&MergeConfig::new(&input, &output)).expect("pipeline should succeed");

    assert!(output.exists());
    assert!(fs::read_to_string(&output).unwrap().is_empty());
}

#[test]
fn nested_output_directories_are_created() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("input");
    fs::create_dir(&input).unwrap();
    write_file(&input, "a.csv", &format!("{SCHEMA}1,red,1,254,100\n"));

    let output = temp.path().join("out").join("results").join("final.csv");
    run(&MergeConfig::new(&input, &output)).unwrap();

    let (_, rows) = read_output(&output);
    assert_eq!(rows.len(), 1);
}

#[test]
fn schema_mismatch_aborts_without_output() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("input");
    fs::create_dir(&input).unwrap();
    write_file(&input, "a.csv", &format!("{SCHEMA}1,red,1,254,100\n"));
    write_file(&input, "b.csv", "totally,different,columns\n1,2,3\n");

    let output = temp.path().join("merged.csv");
    let err = run(&MergeConfig::new(&input, &output)).unwrap_err();

    assert!(matches!(err, MergeError::SchemaMismatch { .. }));
    assert!(!output.exists(), "no partial output should be written");
}

#[test]
fn missing_key_columns_abort_without_output() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("input");
    fs::create_dir(&input).unwrap();
    write_file(&input, "a.csv", "some,other,schema\n1,2,3\n");

    let output = temp.path().join("merged.csv");
    let err = run(&MergeConfig::new(&input, &output)).unwrap_err();

    match err {
        MergeError::MissingColumns(names) => {
            // Every default key is absent and every one is reported.
            assert_eq!(names.len(), 5);
            assert!(names.contains(&"match_number".to_string()));
            assert!(names.contains(&"timestamp".to_string()));
        }
        other => panic!("expected MissingColumns, got {other:?}"),
    }
    assert!(!output.exists());
}

#[test]
fn missing_input_directory_is_reported() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("does-not-exist");
    let output = temp.path().join("merged.csv");

    let err = run(&MergeConfig::new(&input, &output)).unwrap_err();
    assert!(matches!(err, MergeError::DirectoryNotFound { .. }));
}

#[test]
fn rerunning_on_the_output_is_a_no_op() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("input");
    fs::create_dir(&input).unwrap();
    write_file(
        &input,
        "a.csv",
        &format!("{SCHEMA}1,red,1,254,100\n1,red,1,254,100\n2,blue,1,118,150\n"),
    );

    let first = temp.path().join("first.csv");
    run(&MergeConfig::new(&input, &first)).unwrap();

    // Feed the first output back through the pipeline.
    let second_input = temp.path().join("second_input");
    fs::create_dir(&second_input).unwrap();
    fs::copy(&first, second_input.join("merged.csv")).unwrap();

    let second = temp.path().join("second.csv");
    run(&MergeConfig::new(&second_input, &second)).unwrap();

    assert_eq!(
        fs::read_to_string(&first).unwrap(),
        fs::read_to_string(&second).unwrap()
    );
}
