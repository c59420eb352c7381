use cdr_core::{IngestRun, UsageRecord};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::services::{SharedConfig, open_db};
use cdr_db::Db;

const DEFAULT_RUN_LIMIT: u32 = 20;

/// Store totals reported by the `records` view.
#[derive(Debug, Clone, Serialize)]
pub struct RecordSummary {
    pub total_records: u64,
    pub basic: u64,
    pub extended: u64,
    pub hex: u64,
}

#[derive(Clone)]
pub struct RecordsService {
    config: SharedConfig,
}

impl RecordsService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    pub fn list(&self) -> Result<Vec<UsageRecord>> {
        Ok(self.db()?.list_usage_records()?)
    }

    pub fn get(&self, id: u64) -> Result<UsageRecord> {
        self.db()?
            .get_usage_record(id)?
            .ok_or_else(|| AppError::NotFound(format!("record with id {id} not found")))
    }

    pub fn count(&self) -> Result<u64> {
        Ok(self.db()?.count_usage_records()?)
    }

    pub fn summary(&self) -> Result<RecordSummary> {
        let records = self.list()?;
        let mut summary = RecordSummary {
            total_records: records.len() as u64,
            basic: 0,
            extended: 0,
            hex: 0,
        };
        for record in &records {
            match record.format() {
                cdr_core::CdrFormat::Basic => summary.basic += 1,
                cdr_core::CdrFormat::Extended => summary.extended += 1,
                cdr_core::CdrFormat::Hex => summary.hex += 1,
            }
        }
        Ok(summary)
    }

    pub fn runs(&self, limit: Option<u32>) -> Result<Vec<IngestRun>> {
        Ok(self
            .db()?
            .list_ingest_runs(limit.unwrap_or(DEFAULT_RUN_LIMIT))?)
    }
}
