use std::io;
use std::num::ParseIntError;
use std::str::Utf8Error;

use cdr_core::UsageRecord;
use serde::Serialize;
use thiserror::Error;

/// Why a single CDR line produced no record.
#[derive(Debug, Error)]
pub enum ParseFailure {
    /// Blank or whitespace-only line. Callers skip these silently.
    #[error("empty line")]
    Empty,
    #[error("expected at least 2 comma-separated fields, found {found}: {line:?}")]
    TooFewFields { line: String, found: usize },
    #[error("invalid record id ({reason}): {line:?}")]
    InvalidId { line: String, reason: String },
    #[error("malformed fields ({cause}): {line:?}")]
    MalformedFields { line: String, cause: FieldError },
    /// `line` holds a lossy decode with replacement characters.
    #[error("line is not valid UTF-8 ({source}): {line:?}")]
    InvalidUtf8 {
        line: String,
        #[source]
        source: Utf8Error,
    },
}

impl ParseFailure {
    /// The trimmed line that failed, if there was one.
    pub fn line(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::TooFewFields { line, .. }
            | Self::InvalidId { line, .. }
            | Self::MalformedFields { line, .. }
            | Self::InvalidUtf8 { line, .. } => Some(line.as_str()),
        }
    }
}

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("field {index} is missing")]
    Missing { index: usize },
    #[error("field {index} is not an integer: {source}")]
    InvalidInteger {
        index: usize,
        #[source]
        source: ParseIntError,
    },
    #[error("field {index} is not a 24-character hex payload: {source}")]
    InvalidHex {
        index: usize,
        #[source]
        source: hex::FromHexError,
    },
}

/// Parse outcome for one non-blank input line.
#[derive(Debug)]
pub struct ParsedLine {
    /// 1-based, counting blank lines.
    pub line_number: usize,
    pub result: std::result::Result<UsageRecord, ParseFailure>,
}

/// Output of scanning a reader without storing anything.
#[derive(Debug, Default)]
pub struct ParsedBatch {
    pub lines: Vec<ParsedLine>,
    pub bytes_read: u64,
    pub read_error: Option<io::Error>,
}

/// Ingest summary returned after a batch is stored.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestStats {
    pub files_scanned: usize,
    pub files_skipped: usize,
    /// Non-blank lines seen, including ones that failed to parse.
    pub records_processed: usize,
    /// Records upserted into the store.
    pub records_stored: usize,
    pub bytes_read: u64,
    pub issues: Vec<IngestIssue>,
}

/// Non-fatal issues encountered during ingest.
#[derive(Debug, Clone, Serialize)]
pub struct IngestIssue {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
    pub message: String,
}

/// Errors that abort an ingest call.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("db error: {0}")]
    Db(#[from] cdr_db::DbError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
