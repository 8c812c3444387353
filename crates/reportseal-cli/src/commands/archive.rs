//! Archive command

use std::path::PathBuf;

use clap::Args;
use reportseal_core::archive::archive_snapshot;
use reportseal_core::model::report::read_report_text;
use reportseal_engine::{ClientConfig, HttpFetcher};
use reportseal_store::{default_archive_path, write_archive};

use crate::settings::CliResult;

#[derive(Debug, Args)]
pub struct ArchiveArgs {
    /// Report JSON file
    pub report: PathBuf,

    /// Output file (default: report_with_csv_data.json next to the report)
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

pub fn execute(args: ArchiveArgs, config: &ClientConfig) -> CliResult<i32> {
    let fetcher = HttpFetcher::new(&config.fetch)?;
    let text = read_report_text(&args.report)?;
    let snapshot = archive_snapshot(&text, &fetcher)?;

    let out = args
        .out
        .unwrap_or_else(|| default_archive_path(&args.report));
    write_archive(&out, &snapshot)?;

    for failure in &snapshot.failures {
        eprintln!(
            "Skipped {} ({}): {}",
            failure.field, failure.reference, failure.message
        );
    }
    println!("Archive written: {}", out.display());
    println!("  datasets embedded: {}", snapshot.archived_files().len());
    println!("  datasets skipped: {}", snapshot.failures.len());
    Ok(0)
}
