//! Canonical report hashing.
//!
//! Turns a report plus the datasets it links into one SHA-256 digest.
//!
//! ## Canonical text
//!
//! ```text
//! <trimmed report text>
//! \n\n# Source: <reference 1>\n<normalized dataset 1>
//! \n\n# Source: <reference 2>\n<normalized dataset 2>
//! ...
//! ```
//!
//! The assembled text gets one final CRLF→LF pass and trim, then its UTF-8
//! bytes are hashed.
//!
//! ## Guarantees
//!
//! - Same report text + same dataset bytes → same digest
//! - Dataset order is part of the canonical form: reordering references
//!   changes the digest
//! - Any fetch failure aborts the computation; there is no partial digest

pub mod fetch;
pub mod text;

use std::path::Path;
use std::time::Instant;

use sha2::{Digest, Sha256};

use crate::errors::{Result, SealError};
use crate::model::report::read_report_text;
use crate::model::{DatasetRef, Report, ReportDigest, DIGEST_HEX_LEN};
use crate::{log_op_end, log_op_error, log_op_start};

pub use fetch::{DatasetFetcher, MapFetcher};

/// Header line introducing each dataset block
pub const SOURCE_HEADER: &str = "# Source: ";

/// Digest plus the exact text it was computed over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalDigest {
    pub digest: ReportDigest,
    pub canonical_text: String,
}

/// Compute the digest of raw report text and its linked datasets.
///
/// ## Errors
///
/// - `MalformedReport` / `InvalidDatasetReference` for bad report content
/// - `FetchFailed` / `FetchTimedOut` naming the first reference that failed
/// - `InvalidDigestLength` if the encoded digest is not 66 characters
pub fn compute_digest(report_text: &str, fetcher: &dyn DatasetFetcher) -> Result<CanonicalDigest> {
    let report = Report::parse(report_text)?;
    digest_report(&report, fetcher)
}

/// Read a report file and compute its digest.
///
/// ## Errors
///
/// `ReportNotFound` / `ReportUnreadable` for file problems, otherwise as
/// [`compute_digest`].
pub fn hash_report_file(path: &Path, fetcher: &dyn DatasetFetcher) -> Result<CanonicalDigest> {
    compute_digest(&read_report_text(path)?, fetcher)
}

/// Compute the digest of an already parsed report.
///
/// ## Errors
///
/// As [`compute_digest`], minus the parse errors.
pub fn digest_report(report: &Report, fetcher: &dyn DatasetFetcher) -> Result<CanonicalDigest> {
    let started = Instant::now();
    log_op_start!("compute_digest", dataset_count = report.datasets().len());

    let result = fetch_datasets(report.datasets(), fetcher).and_then(|datasets| {
        let canonical_text = assemble_canonical_text(report.text(), &datasets);
        let digest = digest_canonical_text(&canonical_text)?;
        Ok(CanonicalDigest {
            digest,
            canonical_text,
        })
    });

    let duration_ms = started.elapsed().as_millis() as u64;
    match &result {
        Ok(c) => {
            log_op_end!("compute_digest", duration_ms = duration_ms, digest = %c.digest);
        }
        Err(e) => {
            log_op_error!("compute_digest", e.clone(), duration_ms = duration_ms);
        }
    }
    result
}

/// Fetch every reference strictly in order; the first failure aborts.
fn fetch_datasets<'a>(
    refs: &'a [DatasetRef],
    fetcher: &dyn DatasetFetcher,
) -> Result<Vec<(&'a str, String)>> {
    let mut fetched = Vec::with_capacity(refs.len());
    for dataset in refs {
        tracing::debug!(
            reference = %dataset.reference,
            field = dataset.field,
            "Fetching dataset"
        );
        let raw = fetcher.fetch(&dataset.reference)?;
        fetched.push((dataset.reference.as_str(), text::normalize_dataset(&raw)));
    }
    Ok(fetched)
}

/// Build the canonical text from trimmed report text and normalized datasets.
///
/// `datasets` pairs each reference with its already normalized text, in
/// fetch order.
pub fn assemble_canonical_text(report_text: &str, datasets: &[(&str, String)]) -> String {
    let mut combined = String::from(report_text);
    for (reference, body) in datasets {
        combined.push_str("\n\n");
        combined.push_str(SOURCE_HEADER);
        combined.push_str(reference);
        combined.push('\n');
        combined.push_str(body);
    }
    text::trim_whitespace(&text::normalize_line_endings(&combined)).to_string()
}

/// SHA-256 of the canonical text's UTF-8 bytes as a [`ReportDigest`].
///
/// ## Errors
///
/// Returns `InvalidDigestLength` if the hex encoding is not 66 characters,
/// which can only happen if the hash algorithm is swapped out.
pub fn digest_canonical_text(canonical_text: &str) -> Result<ReportDigest> {
    let mut hasher = Sha256::new();
    hasher.update(canonical_text.as_bytes());
    let hex_form = format!("0x{}", hex::encode(hasher.finalize()));

    if hex_form.len() != DIGEST_HEX_LEN {
        return Err(SealError::InvalidDigestLength {
            length: hex_form.len(),
        });
    }
    ReportDigest::from_hex(&hex_form)
}
