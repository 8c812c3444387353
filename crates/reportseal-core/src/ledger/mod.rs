//! Report ledger contract.
//!
//! The ledger is keyed by job id, append-only and owner-gated. Per job id
//! the only state transition is `absent → stored`, made by one successful
//! [`ReportLedger::store_report`]; there is no update or delete.
//!
//! Every implementation runs the same [`guards::check_store`] sequence so
//! that error precedence is identical across backends.

pub mod guards;
pub mod memory;

use crate::errors::ExError;
use crate::model::{Identity, LedgerEntry, ReportDigest, WriteReceipt};

pub use memory::MemoryLedger;

/// Authoritative store of report digests
#[allow(clippy::result_large_err)]
pub trait ReportLedger {
    /// The single identity allowed to write
    ///
    /// # Errors
    ///
    /// Returns `LedgerUnavailable` or `Persistence` if the backend cannot say.
    fn owner(&self) -> Result<Identity, ExError>;

    /// Record a report digest for `job_id`
    ///
    /// # Errors
    ///
    /// In this precedence: `Unauthorised` (caller is not the owner),
    /// `EmptyJobId`, `EmptyHash` (all-zero digest), `AlreadyExists`
    /// (job id already stored). Backend failures surface as `Persistence`
    /// or `Timeout`.
    fn store_report(
        &mut self,
        caller: &Identity,
        job_id: &str,
        report_hash: &ReportDigest,
        product_name: &str,
        username: &str,
    ) -> Result<WriteReceipt, ExError>;

    /// Fetch the stored entry for `job_id`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no entry exists.
    fn get_report(&self, job_id: &str) -> Result<LedgerEntry, ExError>;

    /// Compare `candidate` against the stored digest
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no entry exists.
    fn verify_report_hash(&self, job_id: &str, candidate: &ReportDigest) -> Result<bool, ExError> {
        let entry = self.get_report(job_id)?;
        Ok(entry.report_hash == *candidate)
    }
}
