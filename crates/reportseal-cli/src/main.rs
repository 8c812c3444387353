//! ReportSeal CLI
//!
//! Command-line interface for hashing, publishing and auditing reports

use clap::{Parser, Subcommand};
use reportseal_core::logging_facility::{init, Profile};

mod commands;
mod settings;

#[derive(Debug, Parser)]
#[command(name = "reportseal")]
#[command(about = "ReportSeal - tamper-evident analysis report ledger", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: settings::GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute a report's canonical digest
    Hash(commands::hash::HashArgs),
    /// Digest a report and record it in the ledger
    Publish(commands::publish::PublishArgs),
    /// Recompute a report's digest and compare it with the ledger
    Audit(commands::audit::AuditArgs),
    /// Print the ledger entry for a job
    Show(commands::ledger::ShowArgs),
    /// Ask the ledger whether a digest matches a job's entry
    VerifyHash(commands::ledger::VerifyHashArgs),
    /// Write a copy of a report with its datasets embedded (best effort)
    Archive(commands::archive::ArchiveArgs),
    /// Ledger administration
    Ledger(commands::ledger::LedgerArgs),
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init(if cli.global.log_json {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = settings::load(&cli.global).and_then(|config| match cli.command {
        Commands::Hash(args) => commands::hash::execute(args, &config),
        Commands::Publish(args) => commands::publish::execute(args, &config),
        Commands::Audit(args) => commands::audit::execute(args, &config),
        Commands::Show(args) => commands::ledger::execute_show(args, &config),
        Commands::VerifyHash(args) => commands::ledger::execute_verify_hash(args, &config),
        Commands::Archive(args) => commands::archive::execute(args, &config),
        Commands::Ledger(args) => commands::ledger::execute(args, &config),
    });

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
