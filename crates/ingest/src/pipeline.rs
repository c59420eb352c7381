use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};
use std::time::{Duration as StdDuration, Instant};

use cdr_core::UsageRecord;
use cdr_db::{Db, NewIngestRun};
use chrono::Utc;
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::parser::records_from_reader;
use crate::types::{IngestIssue, IngestStats, ParsedBatch, Result};

fn is_cdr_path(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|value| value.to_str()),
        Some("cdr") | Some("csv") | Some("txt")
    )
}

struct FileTask {
    path: PathBuf,
    source: String,
}

struct ParsedFile {
    source: String,
    batch: Option<ParsedBatch>,
    issues: Vec<IngestIssue>,
    parse_duration: StdDuration,
}

fn parse_file(task: FileTask) -> ParsedFile {
    let file_start = Instant::now();
    let file = match File::open(&task.path) {
        Ok(file) => file,
        Err(err) => {
            return ParsedFile {
                issues: vec![IngestIssue {
                    source: task.source.clone(),
                    line_number: None,
                    line: None,
                    message: err.to_string(),
                }],
                source: task.source,
                batch: None,
                parse_duration: file_start.elapsed(),
            };
        }
    };
    let batch = records_from_reader(BufReader::new(file));
    ParsedFile {
        source: task.source,
        batch: Some(batch),
        issues: Vec::new(),
        parse_duration: file_start.elapsed(),
    }
}

/// Splits a parsed batch into records to store, logging and recording every
/// line that failed.
fn collect_batch(
    source: &str,
    batch: ParsedBatch,
    stats: &mut IngestStats,
    records: &mut Vec<UsageRecord>,
) {
    stats.bytes_read = stats.bytes_read.saturating_add(batch.bytes_read);
    stats.records_processed += batch.lines.len();
    for parsed in batch.lines {
        match parsed.result {
            Ok(record) => records.push(record),
            Err(failure) => {
                tracing::warn!(
                    source,
                    line_number = parsed.line_number,
                    error = %failure,
                    "skipping unparseable cdr line"
                );
                stats.issues.push(IngestIssue {
                    source: source.to_string(),
                    line_number: Some(parsed.line_number),
                    line: failure.line().map(str::to_string),
                    message: failure.to_string(),
                });
            }
        }
    }
    if let Some(err) = batch.read_error {
        tracing::warn!(source, error = %err, "stopped reading cdr input");
        stats.issues.push(IngestIssue {
            source: source.to_string(),
            line_number: None,
            line: None,
            message: err.to_string(),
        });
    }
}

fn store_batch(
    db: &mut Db,
    source: &str,
    started_at: String,
    records: &[UsageRecord],
    stats: &mut IngestStats,
) -> Result<()> {
    let db_start = Instant::now();
    stats.records_stored = db.upsert_usage_records(records)?;
    db.insert_ingest_run(&NewIngestRun {
        source: source.to_string(),
        started_at,
        records_processed: stats.records_processed as u64,
        records_stored: stats.records_stored as u64,
        issue_count: stats.issues.len() as u64,
    })?;
    tracing::info!(
        source,
        processed = stats.records_processed,
        stored = stats.records_stored,
        issues = stats.issues.len(),
        db_ms = db_start.elapsed().as_millis() as u64,
        "cdr ingest finished"
    );
    Ok(())
}

/// Parses newline-delimited CDR text from `reader` and upserts every record
/// that decodes. Lines that fail are logged and reported in the stats.
pub fn ingest_reader<R: BufRead>(db: &mut Db, reader: R, source: &str) -> Result<IngestStats> {
    let started_at = Utc::now().to_rfc3339();
    let mut stats = IngestStats {
        files_scanned: 1,
        ..IngestStats::default()
    };
    let mut records = Vec::new();
    collect_batch(source, records_from_reader(reader), &mut stats, &mut records);
    store_batch(db, source, started_at, &records, &mut stats)?;
    Ok(stats)
}

/// Ingests an uploaded file held in memory.
pub fn ingest_bytes(db: &mut Db, source: &str, bytes: &[u8]) -> Result<IngestStats> {
    ingest_reader(db, Cursor::new(bytes), source)
}

/// Ingests a single file, or every `.cdr`/`.csv`/`.txt` file below a
/// directory. Files are parsed in parallel and applied in path order.
pub fn ingest_path(db: &mut Db, path: &Path) -> Result<IngestStats> {
    let started_at = Utc::now().to_rfc3339();
    let ingest_start = Instant::now();
    let source = path.to_string_lossy().to_string();
    let mut stats = IngestStats::default();

    let metadata = std::fs::metadata(path)?;
    let mut tasks = Vec::new();
    if metadata.is_dir() {
        for entry in WalkDir::new(path).follow_links(false).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let file_path = err
                        .path()
                        .map(|path| path.to_string_lossy().to_string())
                        .unwrap_or_else(|| "<unknown>".to_string());
                    stats.issues.push(IngestIssue {
                        source: file_path,
                        line_number: None,
                        line: None,
                        message: err.to_string(),
                    });
                    continue;
                }
            };
            let entry_path = entry.path();
            if !entry.file_type().is_file() || !is_cdr_path(entry_path) {
                continue;
            }
            tasks.push(FileTask {
                path: entry_path.to_path_buf(),
                source: entry_path.to_string_lossy().to_string(),
            });
        }
    } else {
        tasks.push(FileTask {
            path: path.to_path_buf(),
            source: source.clone(),
        });
    }
    stats.files_scanned = tasks.len();

    let parsed_files = tasks.into_par_iter().map(parse_file).collect::<Vec<_>>();

    let mut parse_total = StdDuration::ZERO;
    let mut records = Vec::new();
    for parsed in parsed_files {
        parse_total += parsed.parse_duration;
        stats.issues.extend(parsed.issues);
        let Some(batch) = parsed.batch else {
            stats.files_skipped += 1;
            continue;
        };
        tracing::debug!(
            source = parsed.source.as_str(),
            lines = batch.lines.len(),
            bytes = batch.bytes_read,
            "parsed cdr file"
        );
        collect_batch(&parsed.source, batch, &mut stats, &mut records);
    }

    store_batch(db, &source, started_at, &records, &mut stats)?;
    tracing::debug!(
        files = stats.files_scanned,
        skipped = stats.files_skipped,
        parse_ms = parse_total.as_millis() as u64,
        total_ms = ingest_start.elapsed().as_millis() as u64,
        "cdr path ingest timing"
    );
    Ok(stats)
}
