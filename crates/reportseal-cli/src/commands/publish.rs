//! Publish command

use std::path::PathBuf;

use clap::Args;
use reportseal_core_types::RequestContext;
use reportseal_engine::{
    apply_engine_command, ClientConfig, EngineCommand, EngineCommandResult, HttpFetcher,
};
use reportseal_store::SqliteLedger;

use super::print_entry;
use crate::settings::CliResult;

#[derive(Debug, Args)]
pub struct PublishArgs {
    /// Report JSON file
    pub report: PathBuf,
}

pub fn execute(args: PublishArgs, config: &ClientConfig) -> CliResult<i32> {
    let signer = config.signer()?.clone();
    let mut ledger = SqliteLedger::open(&config.ledger)?;
    let fetcher = HttpFetcher::new(&config.fetch)?;
    let ctx = RequestContext::new();

    let cmd = EngineCommand::Publish {
        report_path: args.report,
        signer,
    };
    let EngineCommandResult::Published(outcome) =
        apply_engine_command(cmd, &mut ledger, &fetcher, &ctx)?
    else {
        return Err("publish returned an unexpected result".into());
    };

    println!("Report published:");
    println!("  digest: {}", outcome.digest);
    println!("  receipt_id: {}", outcome.receipt.receipt_id);
    println!("Stored entry:");
    print_entry(&outcome.entry);
    Ok(0)
}
