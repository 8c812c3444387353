//! Ledger administration and read commands

use clap::{Args, Subcommand};
use reportseal_core::{ExErrorKind, Identity, ReportDigest, ReportLedger};
use reportseal_engine::ClientConfig;
use reportseal_store::SqliteLedger;

use super::{print_entry, EXIT_MATCH, EXIT_MISMATCH, EXIT_NOT_FOUND};
use crate::settings::CliResult;

#[derive(Debug, Args)]
pub struct LedgerArgs {
    #[command(subcommand)]
    pub command: LedgerCommand,
}

#[derive(Debug, Subcommand)]
pub enum LedgerCommand {
    /// Create the ledger database and record its owner
    Init(InitArgs),
}

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Owner identity (defaults to the configured signer)
    #[arg(long)]
    pub owner: Option<String>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub job_id: String,
}

#[derive(Debug, Args)]
pub struct VerifyHashArgs {
    pub job_id: String,
    /// Candidate digest, 0x followed by 64 hex digits
    pub digest: String,
}

pub fn execute(args: LedgerArgs, config: &ClientConfig) -> CliResult<i32> {
    match args.command {
        LedgerCommand::Init(init_args) => execute_init(init_args, config),
    }
}

fn execute_init(args: InitArgs, config: &ClientConfig) -> CliResult<i32> {
    let owner = match args.owner {
        Some(owner) => Identity::new(owner),
        None => config.signer()?.clone(),
    };
    let ledger = SqliteLedger::initialize(&config.ledger, &owner)?;

    println!("Ledger initialised:");
    println!("  path: {}", ledger.config().path.display());
    println!("  owner: {}", ledger.owner()?);
    println!("  entries: {}", ledger.entry_count()?);
    Ok(0)
}

pub fn execute_show(args: ShowArgs, config: &ClientConfig) -> CliResult<i32> {
    let ledger = SqliteLedger::open(&config.ledger)?;
    let entry = ledger.get_report(&args.job_id)?;

    println!("Ledger entry:");
    print_entry(&entry);
    Ok(0)
}

pub fn execute_verify_hash(args: VerifyHashArgs, config: &ClientConfig) -> CliResult<i32> {
    let candidate: ReportDigest = args.digest.parse()?;
    let ledger = SqliteLedger::open(&config.ledger)?;

    match ledger.verify_report_hash(&args.job_id, &candidate) {
        Ok(true) => {
            println!("true");
            Ok(EXIT_MATCH)
        }
        Ok(false) => {
            println!("false");
            Ok(EXIT_MISMATCH)
        }
        Err(e) if e.kind() == ExErrorKind::NotFound => {
            eprintln!("Error: {}", e);
            Ok(EXIT_NOT_FOUND)
        }
        Err(e) => Err(e.into()),
    }
}
