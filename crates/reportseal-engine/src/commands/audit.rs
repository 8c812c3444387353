//! Audit flow: recompute a report's digest and compare it with the ledger.
//!
//! An audit always ends in exactly one [`Verdict`]. Only a missing ledger
//! entry is folded into a verdict; every other failure (fetch, input,
//! ledger unavailable) is returned as an error.

#![allow(clippy::result_large_err)]

use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use reportseal_core::canonical::{digest_report, DatasetFetcher};
use reportseal_core::errors::{ExError, ExErrorKind};
use reportseal_core::{log_op_end, log_op_error, log_op_start};
use reportseal_core::{LedgerEntry, Report, ReportDigest, ReportLedger};
use reportseal_core_types::RequestContext;
use reportseal_store::errors::Result;

use super::in_context;

/// How the local digest is checked against the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuditStrategy {
    /// Read the stored entry and compare digests locally
    #[default]
    CompareEntry,
    /// Ask the ledger to compare
    LedgerVerify,
}

impl FromStr for AuditStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "compare-entry" => Ok(AuditStrategy::CompareEntry),
            "ledger-verify" => Ok(AuditStrategy::LedgerVerify),
            other => Err(format!(
                "unknown audit strategy '{}' (expected compare-entry or ledger-verify)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Match,
    Mismatch,
    NotFound,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Match => "match",
            Verdict::Mismatch => "mismatch",
            Verdict::NotFound => "not_found",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one audit
#[derive(Debug, Clone)]
pub struct AuditReport {
    pub job_id: String,
    pub local_digest: ReportDigest,
    /// Stored entry, when the strategy read one and it exists
    pub stored: Option<LedgerEntry>,
    pub verdict: Verdict,
}

/// Audit an already parsed report.
///
/// ## Errors
///
/// `InvalidInput`, `Fetch`, `Timeout`, `LedgerUnavailable` or backend
/// failures. A missing entry is `Verdict::NotFound`, not an error.
pub fn audit_report(
    report: &Report,
    fetcher: &dyn DatasetFetcher,
    ledger: &dyn ReportLedger,
    strategy: AuditStrategy,
    ctx: &RequestContext,
) -> Result<AuditReport> {
    let started = Instant::now();
    log_op_start!("audit", request_id = %ctx.request_id);

    let result = run_audit(report, fetcher, ledger, strategy, ctx);

    let duration_ms = started.elapsed().as_millis() as u64;
    match &result {
        Ok(audit) => {
            log_op_end!(
                "audit",
                duration_ms = duration_ms,
                request_id = %ctx.request_id,
                job_id = %audit.job_id,
                verdict = audit.verdict.as_str()
            );
        }
        Err(e) => {
            log_op_error!(
                "audit",
                e.clone(),
                duration_ms = duration_ms,
                request_id = %ctx.request_id
            );
        }
    }
    result
}

/// Read a report file and audit it.
///
/// ## Errors
///
/// As [`audit_report`], plus `InvalidInput` for a missing or unreadable file.
pub fn audit_report_file(
    path: &Path,
    fetcher: &dyn DatasetFetcher,
    ledger: &dyn ReportLedger,
    strategy: AuditStrategy,
    ctx: &RequestContext,
) -> Result<AuditReport> {
    let report = Report::load(path).map_err(|e| in_context(ExError::from(e), ctx))?;
    audit_report(&report, fetcher, ledger, strategy, ctx)
}

fn run_audit(
    report: &Report,
    fetcher: &dyn DatasetFetcher,
    ledger: &dyn ReportLedger,
    strategy: AuditStrategy,
    ctx: &RequestContext,
) -> Result<AuditReport> {
    let canonical = digest_report(report, fetcher).map_err(|e| in_context(e.into(), ctx))?;
    let job_id = report
        .metadata()
        .map_err(|e| in_context(e.into(), ctx))?
        .job_id;
    let ctx = ctx.clone().for_job(job_id.clone());
    let local_digest = canonical.digest;

    let (stored, verdict) = match strategy {
        AuditStrategy::CompareEntry => match ledger.get_report(&job_id) {
            Ok(entry) => {
                let verdict = if entry.report_hash == local_digest {
                    Verdict::Match
                } else {
                    Verdict::Mismatch
                };
                (Some(entry), verdict)
            }
            Err(e) if e.kind() == ExErrorKind::NotFound => (None, Verdict::NotFound),
            Err(e) => return Err(in_context(e, &ctx)),
        },
        AuditStrategy::LedgerVerify => match ledger.verify_report_hash(&job_id, &local_digest) {
            Ok(true) => (None, Verdict::Match),
            Ok(false) => (None, Verdict::Mismatch),
            Err(e) if e.kind() == ExErrorKind::NotFound => (None, Verdict::NotFound),
            Err(e) => return Err(in_context(e, &ctx)),
        },
    };

    Ok(AuditReport {
        job_id,
        local_digest,
        stored,
        verdict,
    })
}
