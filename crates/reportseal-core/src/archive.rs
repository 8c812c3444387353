//! Best-effort archival snapshot of a report and its datasets.
//!
//! Embeds the raw text of every dataset that could be fetched into a copy of
//! the report, under [`ARCHIVE_FIELD`], keyed by the reference's file name.
//! Datasets that fail to fetch are skipped and reported in
//! [`ArchiveSnapshot::failures`].
//!
//! A snapshot may be incomplete, so it carries no digest and is never an
//! input to [`crate::canonical`].

use serde_json::{Map, Value};

use crate::canonical::DatasetFetcher;
use crate::errors::{Result, SealError};
use crate::model::Report;

/// Field added to the report holding the fetched dataset texts
pub const ARCHIVE_FIELD: &str = "fetched_csv_data";

/// A dataset that was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveFailure {
    pub field: &'static str,
    pub reference: String,
    pub message: String,
}

/// Report document with embedded dataset texts
#[derive(Debug, Clone)]
pub struct ArchiveSnapshot {
    /// Original report document (key order preserved) plus [`ARCHIVE_FIELD`]
    pub document: Value,
    pub failures: Vec<ArchiveFailure>,
}

impl ArchiveSnapshot {
    /// File names that made it into the archive
    pub fn archived_files(&self) -> Vec<&str> {
        self.document
            .get(ARCHIVE_FIELD)
            .and_then(Value::as_object)
            .map(|m| m.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// True if every discovered dataset was archived
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Pretty-printed JSON with two-space indentation
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if encoding fails.
    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.document).map_err(|e| SealError::Serialization {
            message: e.to_string(),
        })
    }
}

/// Build an archival snapshot, tolerating individual fetch failures.
///
/// Dataset texts are stored raw, without normalization. If two references
/// share a file name, the later one wins.
///
/// # Errors
///
/// Only report-level problems fail the call: invalid JSON, a non-object
/// document, or a non-string dataset location.
pub fn archive_snapshot(report_text: &str, fetcher: &dyn DatasetFetcher) -> Result<ArchiveSnapshot> {
    let report = Report::parse(report_text)?;
    let mut document = report.document().clone();
    let Value::Object(root) = &mut document else {
        return Err(SealError::MalformedReport {
            reason: "report must be a JSON object".to_string(),
        });
    };

    let mut fetched = Map::new();
    let mut failures = Vec::new();
    for dataset in report.datasets() {
        match fetcher.fetch(&dataset.reference) {
            Ok(text) => {
                fetched.insert(dataset.file_name().to_string(), Value::String(text));
            }
            Err(e) => {
                tracing::warn!(
                    field = dataset.field,
                    reference = %dataset.reference,
                    error = %e,
                    "Skipping dataset in archive snapshot"
                );
                failures.push(ArchiveFailure {
                    field: dataset.field,
                    reference: dataset.reference.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    root.insert(ARCHIVE_FIELD.to_string(), Value::Object(fetched));
    Ok(ArchiveSnapshot { document, failures })
}
