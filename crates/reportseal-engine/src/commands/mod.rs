//! Command orchestration layer.
//!
//! Provides the publish and audit flows plus the command dispatcher that
//! the CLI drives.

pub mod audit;
pub mod engine_command;
pub mod publish;

use reportseal_core::errors::ExError;
use reportseal_core_types::RequestContext;

/// Stamp an error with the invocation's request id and, if the error does
/// not already name one, its job id
fn in_context(err: ExError, ctx: &RequestContext) -> ExError {
    let err = err.with_request_id(ctx.request_id.clone());
    match (&ctx.job_id, err.job_id()) {
        (Some(job_id), None) => err.with_job_id(job_id.clone()),
        _ => err,
    }
}
