//! Engine-level commands that touch the ledger and the network.

#![allow(clippy::result_large_err)]

use std::path::PathBuf;

use reportseal_core::canonical::DatasetFetcher;
use reportseal_core::{Identity, ReportLedger};
use reportseal_core_types::RequestContext;
use reportseal_store::errors::Result;

use crate::commands::audit::{audit_report_file, AuditReport, AuditStrategy};
use crate::commands::publish::{publish_report_file, PublishOutcome};

/// Engine-level commands that require I/O (ledger, dataset fetches).
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Digest a report file and store it as `signer`.
    Publish {
        report_path: PathBuf,
        signer: Identity,
    },
    /// Recompute a report file's digest and compare it with the ledger.
    Audit {
        report_path: PathBuf,
        strategy: AuditStrategy,
    },
}

/// Result of applying an engine command.
#[derive(Debug, Clone)]
pub enum EngineCommandResult {
    Published(PublishOutcome),
    Audited(AuditReport),
}

/// Apply an engine command against a ledger and fetcher.
pub fn apply_engine_command(
    cmd: EngineCommand,
    ledger: &mut dyn ReportLedger,
    fetcher: &dyn DatasetFetcher,
    ctx: &RequestContext,
) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::Publish {
            report_path,
            signer,
        } => {
            let outcome = publish_report_file(&report_path, fetcher, ledger, &signer, ctx)?;
            Ok(EngineCommandResult::Published(outcome))
        }
        EngineCommand::Audit {
            report_path,
            strategy,
        } => {
            let report = audit_report_file(&report_path, fetcher, ledger, strategy, ctx)?;
            Ok(EngineCommandResult::Audited(report))
        }
    }
}
