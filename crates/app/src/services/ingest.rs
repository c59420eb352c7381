use std::io::BufRead;
use std::path::Path;

use crate::error::{AppError, Result};
use crate::services::{SharedConfig, open_db};
use ingest::IngestStats;
use cdr_db::Db;

#[derive(Clone)]
pub struct IngestService {
    config: SharedConfig,
}

impl IngestService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    /// Ingests a CDR file or a directory of CDR files.
    pub fn run_path(&self, path: &Path) -> Result<IngestStats> {
        let mut db = self.db()?;
        Ok(ingest::ingest_path(&mut db, path)?)
    }

    /// Ingests an in-memory upload. The upload must be UTF-8 text.
    pub fn upload(&self, file_name: &str, contents: &[u8]) -> Result<IngestStats> {
        if file_name.trim().is_empty() {
            return Err(AppError::InvalidInput("upload file name is empty".to_string()));
        }
        if std::str::from_utf8(contents).is_err() {
            return Err(AppError::InvalidInput(format!(
                "{file_name} is not valid UTF-8 text"
            )));
        }
        let mut db = self.db()?;
        let stats = ingest::ingest_bytes(&mut db, file_name, contents)?;
        tracing::info!(
            file_name,
            processed = stats.records_processed,
            stored = stats.records_stored,
            "upload processed"
        );
        Ok(stats)
    }

    /// Ingests from an arbitrary reader, labelled with `source`.
    pub fn run_reader<R: BufRead>(&self, reader: R, source: &str) -> Result<IngestStats> {
        let mut db = self.db()?;
        Ok(ingest::ingest_reader(&mut db, reader, source)?)
    }
}
