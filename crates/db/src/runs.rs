use cdr_core::IngestRun;
use chrono::Utc;
use rusqlite::params;

use crate::Db;
use crate::error::Result;
use crate::helpers::row_to_ingest_run;
use crate::types::NewIngestRun;

impl Db {
    pub fn insert_ingest_run(&self, run: &NewIngestRun) -> Result<IngestRun> {
        let finished_at = Utc::now().to_rfc3339();
        self.conn.execute(
            r#"
            INSERT INTO ingest_run (
              source, started_at, finished_at, records_processed, records_stored, issue_count
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                run.source,
                run.started_at,
                finished_at,
                run.records_processed as i64,
                run.records_stored as i64,
                run.issue_count as i64,
            ],
        )?;
        Ok(IngestRun {
            id: self.conn.last_insert_rowid(),
            source: run.source.clone(),
            started_at: run.started_at.clone(),
            finished_at,
            records_processed: run.records_processed,
            records_stored: run.records_stored,
            issue_count: run.issue_count,
        })
    }

    /// Most recent runs first.
    pub fn list_ingest_runs(&self, limit: u32) -> Result<Vec<IngestRun>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, source, started_at, finished_at, records_processed, records_stored, issue_count
            FROM ingest_run
            ORDER BY id DESC
            LIMIT ?1
            "#,
        )?;
        let rows = stmt
            .query_map(params![limit], row_to_ingest_run)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
