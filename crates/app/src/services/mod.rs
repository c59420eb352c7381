mod ingest;
mod records;

use std::sync::Arc;

use crate::app::AppConfig;
use crate::error::Result;
use cdr_db::Db;

pub use ingest::IngestService;
pub use records::{RecordSummary, RecordsService};

type SharedConfig = Arc<AppConfig>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub ingest: IngestService,
    pub records: RecordsService,
}

impl AppServices {
    pub fn new(config: &AppConfig) -> Self {
        let shared = Arc::new(config.clone());
        Self {
            ingest: IngestService::new(shared.clone()),
            records: RecordsService::new(shared),
        }
    }
}

fn open_db(config: &SharedConfig) -> Result<Db> {
    Ok(Db::open(&config.db_path)?)
}
