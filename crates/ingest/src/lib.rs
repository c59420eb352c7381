mod parser;
mod pipeline;
mod types;

pub use parser::{format_for_id, parse_line, record_from_hex_bytes, records_from_reader};
pub use pipeline::{ingest_bytes, ingest_path, ingest_reader};
pub use types::{
    FieldError, IngestError, IngestIssue, IngestStats, ParseFailure, ParsedBatch, ParsedLine,
    Result,
};
