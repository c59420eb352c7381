mod support;

use cdr_db::NewIngestRun;
use support::setup_db;

fn make_run(source: &str, processed: u64, stored: u64) -> NewIngestRun {
    NewIngestRun {
        source: source.to_string(),
        started_at: "2025-01-01T00:00:00+00:00".to_string(),
        records_processed: processed,
        records_stored: stored,
        issue_count: processed - stored,
    }
}

#[test]
fn ingest_runs_are_listed_newest_first() {
    let test_db = setup_db();
    let db = &test_db.db;
    let first = db.insert_ingest_run(&make_run("a.cdr", 5, 4)).expect("first");
    let second = db.insert_ingest_run(&make_run("b.cdr", 3, 3)).expect("second");
    assert!(second.id > first.id);

    let runs = db.list_ingest_runs(10).expect("runs");
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0], second);
    assert_eq!(runs[1].source, "a.cdr");
    assert_eq!(runs[1].records_processed, 5);
    assert_eq!(runs[1].records_stored, 4);
    assert_eq!(runs[1].issue_count, 1);
}

#[test]
fn ingest_run_limit_is_applied() {
    let test_db = setup_db();
    for idx in 0..5 {
        test_db
            .db
            .insert_ingest_run(&make_run(&format!("{idx}.cdr"), 1, 1))
            .expect("insert");
    }
    let runs = test_db.db.list_ingest_runs(2).expect("runs");
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].source, "4.cdr");
}
