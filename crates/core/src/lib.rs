use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire layout a CDR line was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CdrFormat {
    /// `<id>,<bytes_used>`
    Basic,
    /// `<id>,<dmcc>,<mnc>,<bytes_used>,<cellid>`
    Extended,
    /// `<id>,<24 hex chars>`
    Hex,
}

impl fmt::Display for CdrFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
            Self::Extended => write!(f, "extended"),
            Self::Hex => write!(f, "hex"),
        }
    }
}

/// Normalized usage record produced from a single CDR line.
///
/// Fields that do not apply to the source layout are `None`. A record never
/// carries both `dmcc` and `ip`; use the format constructors to build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub id: u64,
    pub mnc: Option<i64>,
    pub bytes_used: i64,
    pub dmcc: Option<String>,
    pub cellid: Option<i64>,
    pub ip: Option<String>,
}

impl UsageRecord {
    pub fn basic(id: u64, bytes_used: i64) -> Self {
        Self {
            id,
            mnc: None,
            bytes_used,
            dmcc: None,
            cellid: None,
            ip: None,
        }
    }

    pub fn extended(id: u64, dmcc: String, mnc: i64, bytes_used: i64, cellid: i64) -> Self {
        Self {
            id,
            mnc: Some(mnc),
            bytes_used,
            dmcc: Some(dmcc),
            cellid: Some(cellid),
            ip: None,
        }
    }

    pub fn hex(id: u64, mnc: i64, bytes_used: i64, cellid: i64, ip: String) -> Self {
        Self {
            id,
            mnc: Some(mnc),
            bytes_used,
            dmcc: None,
            cellid: Some(cellid),
            ip: Some(ip),
        }
    }

    /// Layout implied by which optional fields are populated.
    pub fn format(&self) -> CdrFormat {
        match (&self.dmcc, &self.ip) {
            (Some(_), _) => CdrFormat::Extended,
            (None, Some(_)) => CdrFormat::Hex,
            (None, None) => CdrFormat::Basic,
        }
    }
}

/// Summary row for one completed ingest batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestRun {
    pub id: i64,
    pub source: String,
    pub started_at: String,
    pub finished_at: String,
    pub records_processed: u64,
    pub records_stored: u64,
    pub issue_count: u64,
}
