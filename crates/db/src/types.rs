/// Counters for an ingest batch, written to `ingest_run` once the batch commits.
#[derive(Debug, Clone)]
pub struct NewIngestRun {
    pub source: String,
    pub started_at: String,
    pub records_processed: u64,
    pub records_stored: u64,
    pub issue_count: u64,
}
