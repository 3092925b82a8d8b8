use std::fs::File;
use std::io::Write;

use profiler_config::{load_shot_log_csv, parse_shot_log_csv};
use rstest::rstest;
use tempfile::tempdir;

const HEADER: &str =
    "time_ms,weight,weight_flow,smoothed_pump_flow,pump_flow,pressure,temperature,shot_weight,water_pumped";

#[rstest]
fn parses_rows_in_order() {
    let text = format!(
        "{HEADER}\n0,0,0,0,0,0,93,0,0\n250,0.1,0,2.5,2.6,1.2,93.1,0,0.6\n"
    );
    let rows = parse_shot_log_csv(text.as_bytes()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].time_ms, 250);
    assert_eq!(rows[1].smoothed_pump_flow, 2.5);
    assert_eq!(rows[1].temperature, 93.1);
}

#[rstest]
fn rejects_wrong_headers() {
    let err = parse_shot_log_csv("time,weight\n0,0\n".as_bytes()).unwrap_err();
    assert!(format!("{err}").contains("must have headers"));
}

#[rstest]
fn reports_bad_row_number() {
    let text = format!("{HEADER}\n0,0,0,0,0,0,93,0,0\n-5,0,0,0,0,0,93,0,0\n");
    let err = parse_shot_log_csv(text.as_bytes()).unwrap_err();
    assert!(format!("{err}").contains("row 3"), "{err}");
}

#[rstest]
fn loads_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shot.csv");
    let mut f = File::create(&path).unwrap();
    writeln!(f, "{HEADER}").unwrap();
    writeln!(f, "0,0,0,0,0,0,93,0,0").unwrap();
    drop(f);
    let rows = load_shot_log_csv(&path).unwrap();
    assert_eq!(rows.len(), 1);
}

#[rstest]
fn missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let err = load_shot_log_csv(&dir.path().join("nope.csv")).unwrap_err();
    assert!(format!("{err}").contains("open shot log CSV"));
}
