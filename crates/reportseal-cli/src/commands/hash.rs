//! Hash command

use std::path::PathBuf;

use clap::Args;
use reportseal_core::canonical::hash_report_file;
use reportseal_engine::{ClientConfig, HttpFetcher};

use crate::settings::CliResult;

#[derive(Debug, Args)]
pub struct HashArgs {
    /// Report JSON file
    pub report: PathBuf,

    /// Also print the exact text that was hashed
    #[arg(long)]
    pub show_canonical: bool,
}

pub fn execute(args: HashArgs, config: &ClientConfig) -> CliResult<i32> {
    let fetcher = HttpFetcher::new(&config.fetch)?;
    let result = hash_report_file(&args.report, &fetcher)?;

    println!("{}", result.digest);
    if args.show_canonical {
        println!("--- canonical text ---");
        println!("{}", result.canonical_text);
    }
    Ok(0)
}
