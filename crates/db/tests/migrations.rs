use rusqlite::Connection;

#[test]
fn migrate_is_idempotent() {
    let dir = tempfile::tempdir().expect("temp dir");
    let db_path = dir.path().join("migrate.sqlite");
    let mut db = cdr_db::Db::open(&db_path).expect("open db");
    db.migrate().expect("first migrate");
    db.upsert_usage_records(&[cdr_core::UsageRecord::basic(1, 2)])
        .expect("upsert");
    db.migrate().expect("second migrate");
    assert_eq!(db.count_usage_records().expect("count"), 1);
}

#[test]
fn usage_record_columns_are_nullable_except_bytes_used() {
    let dir = tempfile::tempdir().expect("temp dir");
    let db_path = dir.path().join("schema.sqlite");
    {
        let mut db = cdr_db::Db::open(&db_path).expect("open db");
        db.migrate().expect("migrate");
    }

    let conn = Connection::open(&db_path).expect("open conn");
    let mut stmt = conn
        .prepare("PRAGMA table_info(usage_record)")
        .expect("table info");
    let columns = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(1)?,
                row.get::<_, i64>(3)? != 0,
                row.get::<_, i64>(5)? != 0,
            ))
        })
        .expect("query")
        .collect::<Result<Vec<_>, _>>()
        .expect("columns");

    let expected = vec![
        ("id".to_string(), false, true),
        ("mnc".to_string(), false, false),
        ("bytes_used".to_string(), true, false),
        ("dmcc".to_string(), false, false),
        ("cellid".to_string(), false, false),
        ("ip".to_string(), false, false),
    ];
    assert_eq!(columns, expected);
}

#[test]
fn in_memory_db_migrates() {
    let mut db = cdr_db::Db::open_in_memory().expect("open");
    db.migrate().expect("migrate");
    assert_eq!(db.count_usage_records().expect("count"), 0);
    assert!(db.list_ingest_runs(10).expect("runs").is_empty());
}
