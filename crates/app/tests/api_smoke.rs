use std::fs;

use cdr_app::{AppError, AppState};
use cdr_core::UsageRecord;
use tempfile::tempdir;

fn setup_state(dir: &std::path::Path) -> AppState {
    let app_state = AppState::new(dir.join("app.sqlite"));
    assert!(app_state.is_fresh_db());
    app_state.setup_db().expect("setup db");
    assert!(!app_state.is_fresh_db());
    app_state
}

#[test]
fn upload_then_query_records() {
    let dir = tempdir().expect("temp dir");
    let app_state = setup_state(dir.path());

    let stats = app_state
        .services
        .ingest
        .upload(
            "sample.cdr",
            b"9991,2935\n4,0d39f,0,495594,214\n16,be833279000000c063e5e63d\nbad\n",
        )
        .expect("upload");
    assert_eq!(stats.records_processed, 4);
    assert_eq!(stats.records_stored, 3);

    let records = app_state.services.records.list().expect("list");
    assert_eq!(records.len(), 3);
    let record = app_state.services.records.get(16).expect("get");
    assert_eq!(record.ip.as_deref(), Some("99.229.230.61"));

    let summary = app_state.services.records.summary().expect("summary");
    assert_eq!(summary.total_records, 3);
    assert_eq!((summary.basic, summary.extended, summary.hex), (1, 1, 1));

    let runs = app_state.services.records.runs(None).expect("runs");
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].source, "sample.cdr");

    let db = app_state.open_db().expect("open db");
    assert_eq!(db.count_usage_records().expect("count"), 3);
    assert_eq!(
        db.get_usage_record(9991).expect("get"),
        Some(UsageRecord::basic(9991, 2935))
    );
}

#[test]
fn missing_record_is_not_found() {
    let dir = tempdir().expect("temp dir");
    let app_state = setup_state(dir.path());
    let err = app_state.services.records.get(404).expect_err("missing");
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(err.to_string(), "record with id 404 not found");
}

#[test]
fn upload_rejects_non_utf8_contents() {
    let dir = tempdir().expect("temp dir");
    let app_state = setup_state(dir.path());
    let err = app_state
        .services
        .ingest
        .upload("binary.cdr", &[0x31, 0x2c, 0xff, 0xfe])
        .expect_err("invalid");
    assert!(matches!(err, AppError::InvalidInput(_)));
    assert_eq!(app_state.services.records.count().expect("count"), 0);
}

#[test]
fn run_path_ingests_directory() {
    let dir = tempdir().expect("temp dir");
    let app_state = setup_state(dir.path());
    let cdr_dir = dir.path().join("incoming");
    fs::create_dir_all(&cdr_dir).expect("create dir");
    fs::write(cdr_dir.join("day1.cdr"), "1,10\n2,20\n").expect("write");

    let stats = app_state.services.ingest.run_path(&cdr_dir).expect("ingest");
    assert_eq!(stats.records_stored, 2);
    assert_eq!(
        app_state.services.records.get(2).expect("get"),
        UsageRecord::basic(2, 20)
    );
}

#[test]
fn run_reader_labels_source() {
    let dir = tempdir().expect("temp dir");
    let app_state = setup_state(dir.path());
    app_state
        .services
        .ingest
        .run_reader("6,0001000200000003c0a80001\n".as_bytes(), "-")
        .expect("ingest");
    let runs = app_state.services.records.runs(Some(1)).expect("runs");
    assert_eq!(runs[0].source, "-");
}
