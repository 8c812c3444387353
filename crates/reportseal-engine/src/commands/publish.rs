//! Publish flow: digest a report and record it in the ledger.
//!
//! 1. Compute the canonical digest (fetching every linked dataset)
//! 2. Resolve `jobId`, product name and username from the report
//! 3. Store the digest as the signer
//! 4. Read the entry back from the ledger

#![allow(clippy::result_large_err)]

use std::path::Path;
use std::time::Instant;

use reportseal_core::canonical::{digest_report, DatasetFetcher};
use reportseal_core::errors::ExError;
use reportseal_core::model::ReportMetadata;
use reportseal_core::{log_op_end, log_op_error, log_op_start};
use reportseal_core::{Identity, LedgerEntry, Report, ReportDigest, ReportLedger, WriteReceipt};
use reportseal_core_types::RequestContext;
use reportseal_store::errors::Result;

use super::in_context;

/// Everything a successful publish produced
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    pub digest: ReportDigest,
    pub metadata: ReportMetadata,
    pub receipt: WriteReceipt,
    /// The ledger's read-back of the stored entry
    pub entry: LedgerEntry,
}

/// Publish an already parsed report.
///
/// ## Errors
///
/// - `InvalidInput` for a missing `jobId`
/// - `Fetch` / `Timeout` naming the first dataset that failed
/// - any ledger guard failure (`Unauthorised`, `EmptyJobId`, `EmptyHash`,
///   `AlreadyExists`) or backend failure
///
/// Nothing is written unless the digest was computed in full.
pub fn publish_report(
    report: &Report,
    fetcher: &dyn DatasetFetcher,
    ledger: &mut dyn ReportLedger,
    signer: &Identity,
    ctx: &RequestContext,
) -> Result<PublishOutcome> {
    let started = Instant::now();
    log_op_start!("publish", request_id = %ctx.request_id);

    let result = run_publish(report, fetcher, ledger, signer, ctx);

    let duration_ms = started.elapsed().as_millis() as u64;
    match &result {
        Ok(outcome) => {
            log_op_end!(
                "publish",
                duration_ms = duration_ms,
                request_id = %ctx.request_id,
                job_id = %outcome.metadata.job_id,
                digest = %outcome.digest
            );
        }
        Err(e) => {
            log_op_error!(
                "publish",
                e.clone(),
                duration_ms = duration_ms,
                request_id = %ctx.request_id
            );
        }
    }
    result
}

/// Read a report file and publish it.
///
/// ## Errors
///
/// `InvalidInput` if the file is missing or unreadable, otherwise as
/// [`publish_report`].
pub fn publish_report_file(
    path: &Path,
    fetcher: &dyn DatasetFetcher,
    ledger: &mut dyn ReportLedger,
    signer: &Identity,
    ctx: &RequestContext,
) -> Result<PublishOutcome> {
    let report = Report::load(path).map_err(|e| in_context(ExError::from(e), ctx))?;
    publish_report(&report, fetcher, ledger, signer, ctx)
}

fn run_publish(
    report: &Report,
    fetcher: &dyn DatasetFetcher,
    ledger: &mut dyn ReportLedger,
    signer: &Identity,
    ctx: &RequestContext,
) -> Result<PublishOutcome> {
    let canonical = digest_report(report, fetcher).map_err(|e| in_context(e.into(), ctx))?;
    let metadata = report
        .metadata()
        .map_err(|e| in_context(e.into(), ctx))?;
    let ctx = ctx.clone().for_job(metadata.job_id.clone());

    tracing::info!(
        job_id = %metadata.job_id,
        digest = %canonical.digest,
        "Storing report digest"
    );
    let receipt = ledger
        .store_report(
            signer,
            &metadata.job_id,
            &canonical.digest,
            &metadata.product_name,
            &metadata.username,
        )
        .map_err(|e| in_context(e, &ctx))?;

    let entry = ledger
        .get_report(&metadata.job_id)
        .map_err(|e| in_context(e, &ctx))?;

    Ok(PublishOutcome {
        digest: canonical.digest,
        metadata,
        receipt,
        entry,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reportseal_core::{ExErrorKind, MapFetcher, MemoryLedger};

    #[test]
    fn test_missing_job_id_writes_nothing() {
        let report = Report::parse(r#"{"productName":"P"}"#).unwrap();
        let owner = Identity::new("owner");
        let mut ledger = MemoryLedger::new(owner.clone());
        let ctx = RequestContext::new();

        let err = publish_report(&report, &MapFetcher::new(), &mut ledger, &owner, &ctx)
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert_eq!(err.request_id(), Some(&ctx.request_id));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_empty_job_id_reaches_ledger_guard() {
        let report = Report::parse(r#"{"jobId":""}"#).unwrap();
        let owner = Identity::new("owner");
        let mut ledger = MemoryLedger::new(owner.clone());

        let err = publish_report(
            &report,
            &MapFetcher::new(),
            &mut ledger,
            &owner,
            &RequestContext::new(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::EmptyJobId);
    }
}
