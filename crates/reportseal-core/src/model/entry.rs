use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::digest::ReportDigest;

/// Caller identity presented to the ledger (e.g. an account address)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One immutable ledger record, keyed by `job_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub job_id: String,
    pub report_hash: ReportDigest,
    pub product_name: String,
    pub username: String,
    /// Ledger-observed Unix timestamp in seconds
    pub timestamp: i64,
    /// Identity that wrote the entry
    pub uploaded_by: Identity,
}

impl LedgerEntry {
    /// Timestamp as a UTC datetime, if it is in range
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

/// Durable-write acknowledgment returned by a successful store
///
/// An entry is only considered durable once one of these has been returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteReceipt {
    /// Unique receipt identifier (UUIDv7)
    pub receipt_id: String,
    pub job_id: String,
    pub report_hash: ReportDigest,
    /// Same ledger-observed timestamp recorded on the entry
    pub committed_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_serializes_as_plain_string() {
        let id = Identity::new("0xOwner");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"0xOwner\"");
    }

    #[test]
    fn test_recorded_at() {
        let entry = LedgerEntry {
            job_id: "JOB123".to_string(),
            report_hash: ReportDigest::from_bytes([7u8; 32]),
            product_name: "GRAIN_ANALYSIS".to_string(),
            username: "operator01".to_string(),
            timestamp: 1_700_000_000,
            uploaded_by: Identity::new("owner"),
        };
        let at = entry.recorded_at().unwrap();
        assert_eq!(at.timestamp(), 1_700_000_000);
    }
}
