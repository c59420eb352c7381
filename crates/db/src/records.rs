use cdr_core::UsageRecord;
use rusqlite::{OptionalExtension, params};

use crate::Db;
use crate::error::{DbError, Result};
use crate::helpers::{row_to_usage_record, sql_id};

impl Db {
    /// Inserts each record, or replaces every column of the row sharing its
    /// id. Records are applied in slice order inside one transaction, so a
    /// later duplicate id wins.
    pub fn upsert_usage_records(&mut self, records: &[UsageRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }
        let tx = self.conn.transaction()?;
        let mut applied = 0usize;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO usage_record (id, mnc, bytes_used, dmcc, cellid, ip)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ON CONFLICT(id) DO UPDATE SET
                  mnc = excluded.mnc,
                  bytes_used = excluded.bytes_used,
                  dmcc = excluded.dmcc,
                  cellid = excluded.cellid,
                  ip = excluded.ip
                "#,
            )?;
            for record in records {
                stmt.execute(params![
                    sql_id(record.id)?,
                    record.mnc,
                    record.bytes_used,
                    record.dmcc,
                    record.cellid,
                    record.ip,
                ])?;
                applied += 1;
            }
        }
        tx.commit()?;
        Ok(applied)
    }

    pub fn get_usage_record(&self, id: u64) -> Result<Option<UsageRecord>> {
        let Ok(id) = i64::try_from(id) else {
            return Ok(None);
        };
        self.conn
            .query_row(
                r#"
                SELECT id, mnc, bytes_used, dmcc, cellid, ip
                FROM usage_record
                WHERE id = ?1
                "#,
                params![id],
                row_to_usage_record,
            )
            .optional()
            .map_err(DbError::from)
    }

    pub fn list_usage_records(&self) -> Result<Vec<UsageRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, mnc, bytes_used, dmcc, cellid, ip
            FROM usage_record
            ORDER BY id ASC
            "#,
        )?;
        let rows = stmt
            .query_map([], row_to_usage_record)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn count_usage_records(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM usage_record", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }
}
