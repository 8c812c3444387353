use std::path::Path;

use serde_json::Value;

use crate::canonical::text::trim_whitespace;
use crate::errors::{Result, SealError};

/// Fields under `results` that may name a linked dataset, in canonical order
pub const DATASET_FIELDS: [&str; 3] = [
    "cumulative_analysis_csv",
    "particle_distribution_csv",
    "rejection_analysis_display_csv",
];

/// Product name recorded when the report names none
pub const UNKNOWN_PRODUCT: &str = "UnknownProduct";

/// A dataset reference discovered in a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRef {
    /// Field under `results` the reference was read from
    pub field: &'static str,
    /// Reference text (a URL) exactly as written in the report
    pub reference: String,
}

impl DatasetRef {
    /// Last path segment of the reference, used as the archive key
    pub fn file_name(&self) -> &str {
        self.reference
            .rsplit('/')
            .next()
            .unwrap_or(self.reference.as_str())
    }
}

/// Ledger metadata carried by a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMetadata {
    pub job_id: String,
    pub product_name: String,
    pub username: String,
}

/// A generated analysis report
///
/// Holds the trimmed raw text (the bytes that get hashed) alongside the
/// parsed document, which is consulted only to find dataset references and
/// ledger metadata. The document is never re-serialized for hashing.
#[derive(Debug, Clone)]
pub struct Report {
    text: String,
    document: Value,
    datasets: Vec<DatasetRef>,
}

impl Report {
    /// Parse report text
    ///
    /// # Errors
    ///
    /// - `MalformedReport` if the trimmed text is not valid JSON
    /// - `InvalidDatasetReference` if a dataset location holds a non-string
    pub fn parse(raw: &str) -> Result<Self> {
        let text = trim_whitespace(raw).to_string();
        let document: Value =
            serde_json::from_str(&text).map_err(|e| SealError::MalformedReport {
                reason: e.to_string(),
            })?;
        let datasets = discover_datasets(&document)?;
        Ok(Self {
            text,
            document,
            datasets,
        })
    }

    /// Read and parse a report file
    ///
    /// # Errors
    ///
    /// - `ReportNotFound` if nothing exists at `path`
    /// - `ReportUnreadable` if the file cannot be read as UTF-8
    /// - anything `Report::parse` returns
    pub fn load(path: &Path) -> Result<Self> {
        Self::parse(&read_report_text(path)?)
    }

    /// Trimmed report text
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Dataset references in canonical order
    pub fn datasets(&self) -> &[DatasetRef] {
        &self.datasets
    }

    /// Resolve the ledger metadata fields
    ///
    /// `productName` falls back to `product_name`, then to
    /// [`UNKNOWN_PRODUCT`]; `username` falls back to an empty string. An
    /// empty `jobId` is returned as-is so the ledger can reject it.
    ///
    /// # Errors
    ///
    /// Returns `MissingJobId` if `jobId` is absent or not a string.
    pub fn metadata(&self) -> Result<ReportMetadata> {
        let job_id = self
            .document
            .get("jobId")
            .and_then(Value::as_str)
            .ok_or(SealError::MissingJobId)?
            .to_string();

        let product_name = ["productName", "product_name"]
            .iter()
            .filter_map(|key| self.document.get(*key).and_then(Value::as_str))
            .find(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_PRODUCT)
            .to_string();

        let username = self
            .document
            .get("username")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(ReportMetadata {
            job_id,
            product_name,
            username,
        })
    }
}

/// Read report text from disk without interpreting it
///
/// # Errors
///
/// Returns `ReportNotFound` or `ReportUnreadable`.
pub fn read_report_text(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(SealError::ReportNotFound {
            path: path.display().to_string(),
        });
    }
    std::fs::read_to_string(path).map_err(|e| SealError::ReportUnreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Collect dataset references from `results`, skipping absent or empty ones
///
/// # Errors
///
/// Returns `InvalidDatasetReference` for a location holding a non-string value.
pub fn discover_datasets(document: &Value) -> Result<Vec<DatasetRef>> {
    let Some(results) = document.get("results") else {
        return Ok(Vec::new());
    };

    let mut refs = Vec::new();
    for field in DATASET_FIELDS {
        match results.get(field) {
            None | Some(Value::Null) => {}
            Some(Value::String(reference)) if reference.is_empty() => {}
            Some(Value::String(reference)) => refs.push(DatasetRef {
                field,
                reference: reference.clone(),
            }),
            Some(_) => {
                return Err(SealError::InvalidDatasetReference {
                    field: field.to_string(),
                })
            }
        }
    }
    Ok(refs)
}
