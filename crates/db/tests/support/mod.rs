#![allow(dead_code)]

use std::path::PathBuf;

use cdr_core::UsageRecord;
use cdr_db::Db;
use tempfile::TempDir;

pub struct TestDb {
    pub _dir: TempDir,
    pub db: Db,
    pub path: PathBuf,
}

pub fn setup_db() -> TestDb {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("test.sqlite");
    let mut db = Db::open(&path).expect("open db");
    db.migrate().expect("migrate db");
    TestDb {
        _dir: dir,
        db,
        path,
    }
}

pub fn insert_records(db: &mut Db, records: Vec<UsageRecord>) {
    db.upsert_usage_records(&records).expect("upsert records");
}

pub fn make_extended(id: u64, dmcc: &str) -> UsageRecord {
    UsageRecord::extended(id, dmcc.to_string(), 10, 1_000, 50)
}

pub fn make_hex(id: u64, ip: &str) -> UsageRecord {
    UsageRecord::hex(id, 48771, 12921, 192, ip.to_string())
}
