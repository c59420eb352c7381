use cdr_core::{IngestRun, UsageRecord};
use rusqlite::Row;
use rusqlite::types::Type;

use crate::error::{DbError, Result};

pub(crate) fn sql_id(id: u64) -> Result<i64> {
    i64::try_from(id).map_err(|_| DbError::IdOutOfRange(id))
}

pub(crate) fn row_to_usage_record(
    row: &Row<'_>,
) -> std::result::Result<UsageRecord, rusqlite::Error> {
    let id: i64 = row.get(0)?;
    let id = u64::try_from(id).map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(0, Type::Integer, Box::new(err))
    })?;
    Ok(UsageRecord {
        id,
        mnc: row.get(1)?,
        bytes_used: row.get(2)?,
        dmcc: row.get(3)?,
        cellid: row.get(4)?,
        ip: row.get(5)?,
    })
}

pub(crate) fn row_to_ingest_run(row: &Row<'_>) -> std::result::Result<IngestRun, rusqlite::Error> {
    Ok(IngestRun {
        id: row.get(0)?,
        source: row.get(1)?,
        started_at: row.get(2)?,
        finished_at: row.get(3)?,
        records_processed: row.get::<_, i64>(4)?.max(0) as u64,
        records_stored: row.get::<_, i64>(5)?.max(0) as u64,
        issue_count: row.get::<_, i64>(6)?.max(0) as u64,
    })
}
