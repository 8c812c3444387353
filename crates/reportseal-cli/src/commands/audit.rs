//! Audit command
//!
//! Exit status: 0 match, 2 mismatch, 3 no entry for the job, 1 any error.

use std::path::PathBuf;

use clap::Args;
use reportseal_core_types::RequestContext;
use reportseal_engine::{
    apply_engine_command, AuditStrategy, ClientConfig, EngineCommand, EngineCommandResult,
    HttpFetcher, Verdict,
};
use reportseal_store::SqliteLedger;

use super::{EXIT_MATCH, EXIT_MISMATCH, EXIT_NOT_FOUND};
use crate::settings::CliResult;

#[derive(Debug, Args)]
pub struct AuditArgs {
    /// Report JSON file
    pub report: PathBuf,

    /// compare-entry (read the entry, compare locally) or ledger-verify
    #[arg(long, default_value = "compare-entry")]
    pub strategy: AuditStrategy,
}

pub fn execute(args: AuditArgs, config: &ClientConfig) -> CliResult<i32> {
    let mut ledger = SqliteLedger::open(&config.ledger)?;
    let fetcher = HttpFetcher::new(&config.fetch)?;
    let ctx = RequestContext::new();

    let cmd = EngineCommand::Audit {
        report_path: args.report,
        strategy: args.strategy,
    };
    let EngineCommandResult::Audited(audit) =
        apply_engine_command(cmd, &mut ledger, &fetcher, &ctx)?
    else {
        return Err("audit returned an unexpected result".into());
    };

    println!("job_id: {}", audit.job_id);
    println!("local hash:  {}", audit.local_digest);
    if let Some(entry) = &audit.stored {
        println!("ledger hash: {}", entry.report_hash);
    }

    Ok(match audit.verdict {
        Verdict::Match => {
            println!("verdict: match (report matches the ledger record)");
            EXIT_MATCH
        }
        Verdict::Mismatch => {
            println!("verdict: mismatch (report or datasets differ from the ledger record)");
            EXIT_MISMATCH
        }
        Verdict::NotFound => {
            println!("verdict: not_found (no ledger record for this job)");
            EXIT_NOT_FOUND
        }
    })
}
