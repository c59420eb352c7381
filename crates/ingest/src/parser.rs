use std::io::BufRead;
use std::net::Ipv4Addr;
use std::num::ParseIntError;

use cdr_core::{CdrFormat, UsageRecord};

use crate::types::{FieldError, ParseFailure, ParsedBatch, ParsedLine};

const FIELD_SEPARATOR: char = ',';

/// Decoder chosen for each value of `id % 10`.
const FORMAT_BY_REMAINDER: [CdrFormat; 10] = [
    CdrFormat::Basic,
    CdrFormat::Basic,
    CdrFormat::Basic,
    CdrFormat::Basic,
    CdrFormat::Extended,
    CdrFormat::Basic,
    CdrFormat::Hex,
    CdrFormat::Basic,
    CdrFormat::Basic,
    CdrFormat::Basic,
];

/// Packed hex payload: mnc(2) bytes_used(2) cellid(4) ip(4).
const HEX_PAYLOAD_BYTES: usize = 12;

type DecodeResult = std::result::Result<UsageRecord, FieldError>;

pub fn format_for_id(id: u64) -> CdrFormat {
    FORMAT_BY_REMAINDER[(id % 10) as usize]
}

/// Decodes one raw CDR line into a normalized record.
pub fn parse_line(raw: &str) -> Result<UsageRecord, ParseFailure> {
    let line = raw.trim();
    if line.is_empty() {
        return Err(ParseFailure::Empty);
    }

    let fields = line.split(FIELD_SEPARATOR).collect::<Vec<_>>();
    if fields.len() < 2 {
        return Err(ParseFailure::TooFewFields {
            line: line.to_string(),
            found: fields.len(),
        });
    }

    let id = parse_id(fields[0]).map_err(|reason| ParseFailure::InvalidId {
        line: line.to_string(),
        reason,
    })?;

    decode(format_for_id(id), id, &fields).map_err(|cause| ParseFailure::MalformedFields {
        line: line.to_string(),
        cause,
    })
}

fn decode(format: CdrFormat, id: u64, fields: &[&str]) -> DecodeResult {
    match format {
        CdrFormat::Basic => decode_basic(id, fields),
        CdrFormat::Extended => decode_extended(id, fields),
        CdrFormat::Hex => decode_hex(id, fields),
    }
}

fn parse_id(raw: &str) -> Result<u64, String> {
    let value = raw
        .trim()
        .parse::<i64>()
        .map_err(|err| format!("{raw:?}: {err}"))?;
    u64::try_from(value).map_err(|_| format!("{value} is negative"))
}

fn field<'a>(fields: &[&'a str], index: usize) -> Result<&'a str, FieldError> {
    fields
        .get(index)
        .copied()
        .ok_or(FieldError::Missing { index })
}

fn int_field(fields: &[&str], index: usize) -> Result<i64, FieldError> {
    field(fields, index)?
        .trim()
        .parse::<i64>()
        .map_err(|source: ParseIntError| FieldError::InvalidInteger { index, source })
}

fn decode_basic(id: u64, fields: &[&str]) -> DecodeResult {
    Ok(UsageRecord::basic(id, int_field(fields, 1)?))
}

fn decode_extended(id: u64, fields: &[&str]) -> DecodeResult {
    let dmcc = field(fields, 1)?;
    let mnc = int_field(fields, 2)?;
    let bytes_used = int_field(fields, 3)?;
    let cellid = int_field(fields, 4)?;
    Ok(UsageRecord::extended(
        id,
        dmcc.to_string(),
        mnc,
        bytes_used,
        cellid,
    ))
}

fn decode_hex(id: u64, fields: &[&str]) -> DecodeResult {
    let payload = field(fields, 1)?.trim();
    let mut bytes = [0u8; HEX_PAYLOAD_BYTES];
    hex::decode_to_slice(payload, &mut bytes).map_err(|source| FieldError::InvalidHex {
        index: 1,
        source,
    })?;
    Ok(record_from_hex_bytes(id, &bytes))
}

/// Builds a hex-format record from the 12 packed payload bytes (big-endian).
pub fn record_from_hex_bytes(id: u64, bytes: &[u8; HEX_PAYLOAD_BYTES]) -> UsageRecord {
    let mnc = u16::from_be_bytes([bytes[0], bytes[1]]);
    let bytes_used = u16::from_be_bytes([bytes[2], bytes[3]]);
    let cellid = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    let ip = Ipv4Addr::new(bytes[8], bytes[9], bytes[10], bytes[11]);
    UsageRecord::hex(
        id,
        i64::from(mnc),
        i64::from(bytes_used),
        i64::from(cellid),
        ip.to_string(),
    )
}

/// Parses every line of `reader` without touching storage.
///
/// Blank lines are skipped and do not count as processed. A line that is not
/// valid UTF-8 fails on its own and scanning continues. An I/O error stops
/// the scan and is returned alongside whatever was parsed before it.
pub fn records_from_reader<R: BufRead>(mut reader: R) -> ParsedBatch {
    let mut batch = ParsedBatch::default();
    let mut buf = Vec::new();
    let mut line_number = 0usize;
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(bytes) => {
                line_number += 1;
                batch.bytes_read = batch.bytes_read.saturating_add(bytes as u64);
                match parse_raw_line(&buf) {
                    Err(ParseFailure::Empty) => {}
                    result => {
                        batch.lines.push(ParsedLine {
                            line_number,
                            result,
                        });
                    }
                }
            }
            Err(err) => {
                batch.read_error = Some(err);
                break;
            }
        }
    }
    batch
}

fn parse_raw_line(raw: &[u8]) -> Result<UsageRecord, ParseFailure> {
    match std::str::from_utf8(raw) {
        Ok(text) => parse_line(text),
        Err(source) => Err(ParseFailure::InvalidUtf8 {
            line: String::from_utf8_lossy(raw).trim().to_string(),
            source,
        }),
    }
}
