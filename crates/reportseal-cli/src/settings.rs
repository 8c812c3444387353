//! Configuration assembly
//!
//! Layers, lowest precedence first: built-in defaults, the TOML file
//! (`--config`, or `reportseal.toml` in the working directory if present),
//! `REPORTSEAL_*` environment variables, then command-line flags.
//! Nested keys use a double underscore, e.g. `REPORTSEAL_LEDGER__PATH`.

use std::path::PathBuf;

use clap::Args;
use config::{Config, Environment, File};
use reportseal_engine::ClientConfig;

pub const DEFAULT_LEDGER_PATH: &str = ".reportseal/ledger.db";

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Ledger database path
    #[arg(long, global = true)]
    pub ledger: Option<String>,

    /// Signer identity used for ledger writes
    #[arg(long, global = true)]
    pub signer: Option<String>,

    /// Emit JSON logs on stderr
    #[arg(long, global = true)]
    pub log_json: bool,
}

pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

pub fn load(args: &GlobalArgs) -> CliResult<ClientConfig> {
    let file = match &args.config {
        Some(path) => File::from(path.as_path()).required(true),
        None => File::with_name("reportseal").required(false),
    };

    let settings = Config::builder()
        .set_default("ledger.path", DEFAULT_LEDGER_PATH)?
        .add_source(file)
        .add_source(
            Environment::with_prefix("REPORTSEAL")
                .prefix_separator("_")
                .separator("__"),
        )
        .set_override_option("ledger.path", args.ledger.clone())?
        .set_override_option("signer", args.signer.clone())?
        .build()?;

    let config: ClientConfig = settings.try_deserialize()?;
    tracing::debug!(
        ledger = %config.ledger.path.display(),
        fetch_timeout_ms = config.fetch.timeout_ms,
        "Loaded configuration"
    );
    Ok(config)
}
