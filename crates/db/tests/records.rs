mod support;

use cdr_core::UsageRecord;
use cdr_db::DbError;
use rusqlite::Connection;
use support::{insert_records, make_extended, make_hex, setup_db};

#[test]
fn upsert_inserts_new_ids() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    insert_records(
        db,
        vec![
            UsageRecord::basic(9991, 2935),
            make_extended(4, "0d39f"),
            make_hex(16, "99.229.230.61"),
        ],
    );

    assert_eq!(db.count_usage_records().expect("count"), 3);
    let records = db.list_usage_records().expect("list");
    let ids = records.iter().map(|record| record.id).collect::<Vec<_>>();
    assert_eq!(ids, vec![4, 16, 9991]);
    assert_eq!(records[1].ip.as_deref(), Some("99.229.230.61"));
    assert_eq!(records[0].dmcc.as_deref(), Some("0d39f"));
}

#[test]
fn upsert_overwrites_every_column() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    insert_records(db, vec![make_hex(26, "10.0.0.1")]);
    insert_records(db, vec![UsageRecord::basic(26, 7)]);

    let record = db.get_usage_record(26).expect("get").expect("record");
    assert_eq!(record, UsageRecord::basic(26, 7));
    assert_eq!(db.count_usage_records().expect("count"), 1);
}

#[test]
fn later_duplicate_in_batch_wins() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    let applied = db
        .upsert_usage_records(&[
            UsageRecord::basic(1, 100),
            make_extended(14, "first"),
            UsageRecord::basic(1, 200),
            make_extended(14, "second"),
        ])
        .expect("upsert");
    assert_eq!(applied, 4);

    assert_eq!(
        db.get_usage_record(1).expect("get").expect("record").bytes_used,
        200
    );
    assert_eq!(
        db.get_usage_record(14)
            .expect("get")
            .expect("record")
            .dmcc
            .as_deref(),
        Some("second")
    );
}

#[test]
fn get_missing_record_returns_none() {
    let test_db = setup_db();
    assert!(test_db.db.get_usage_record(42).expect("get").is_none());
    assert!(test_db.db.get_usage_record(u64::MAX).expect("get").is_none());
}

#[test]
fn upsert_rejects_ids_outside_sqlite_range() {
    let mut test_db = setup_db();
    let err = test_db
        .db
        .upsert_usage_records(&[UsageRecord::basic(u64::MAX, 1)])
        .expect_err("out of range");
    assert!(matches!(err, cdr_db::DbError::IdOutOfRange(id) if id == u64::MAX));
    assert_eq!(test_db.db.count_usage_records().expect("count"), 0);
}

#[test]
fn records_survive_reopen() {
    let mut test_db = setup_db();
    insert_records(&mut test_db.db, vec![make_hex(6, "1.2.3.4")]);
    let reopened = cdr_db::Db::open(&test_db.path).expect("reopen");
    let record = reopened.get_usage_record(6).expect("get").expect("record");
    assert_eq!(record, make_hex(6, "1.2.3.4"));
}

#[test]
fn negative_stored_id_is_a_conversion_error() {
    let test_db = setup_db();
    let conn = Connection::open(&test_db.path).expect("open raw connection");
    conn.execute("INSERT INTO usage_record (id, bytes_used) VALUES (-1, 5)", [])
        .expect("insert negative id");

    let err = test_db.db.list_usage_records().expect_err("negative id");
    assert!(matches!(
        err,
        DbError::Sqlite(rusqlite::Error::FromSqlConversionFailure(0, _, _))
    ));
}
