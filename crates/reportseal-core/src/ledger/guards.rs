//! Store preconditions, checked in a fixed order.

use crate::errors::{ExError, SealError};
use crate::model::{Identity, ReportDigest};

/// Run the store guard sequence.
///
/// 1. caller must be the owner
/// 2. job id must be non-empty
/// 3. digest must not be all zeros
/// 4. job id must not already be stored
///
/// `job_exists` is only consulted once the first three checks pass, so a
/// backend lookup never masks an authorization or validation failure.
///
/// # Errors
///
/// The first failing check's error; `job_exists` errors pass through.
#[allow(clippy::result_large_err)]
pub fn check_store<F>(
    owner: &Identity,
    caller: &Identity,
    job_id: &str,
    report_hash: &ReportDigest,
    job_exists: F,
) -> Result<(), ExError>
where
    F: FnOnce() -> Result<bool, ExError>,
{
    if caller != owner {
        return Err(SealError::NotOwner {
            caller: caller.to_string(),
        }
        .into());
    }
    if job_id.is_empty() {
        return Err(SealError::EmptyJobId.into());
    }
    if report_hash.is_zero() {
        return Err(ExError::from(SealError::EmptyHash).with_job_id(job_id));
    }
    if job_exists()? {
        return Err(SealError::JobAlreadyExists {
            job_id: job_id.to_string(),
        }
        .into());
    }
    Ok(())
}
