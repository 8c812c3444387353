//! Client configuration.
//!
//! Assembled by the caller (the CLI layers a TOML file with environment
//! variables) and passed in explicitly; nothing in the library reads the
//! environment.

#![allow(clippy::result_large_err)]

use std::time::Duration;

use reportseal_core::errors::{ExError, ExErrorKind};
use reportseal_core::Identity;
use reportseal_store::LedgerConfig;
use serde::{Deserialize, Serialize};

/// Default per-request fetch timeout
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 30_000;

fn default_fetch_timeout_ms() -> u64 {
    DEFAULT_FETCH_TIMEOUT_MS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_fetch_timeout_ms")]
    pub timeout_ms: u64,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
        }
    }
}

/// Everything a publish or audit invocation needs to reach its collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub ledger: LedgerConfig,
    /// Identity used for ledger writes; audits do not need one
    #[serde(default)]
    pub signer: Option<Identity>,
    #[serde(default)]
    pub fetch: FetchConfig,
}

impl ClientConfig {
    pub fn new(ledger: LedgerConfig) -> Self {
        Self {
            ledger,
            signer: None,
            fetch: FetchConfig::default(),
        }
    }

    pub fn with_signer(mut self, signer: Identity) -> Self {
        self.signer = Some(signer);
        self
    }

    /// The configured signer
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if no signer is configured or it is empty.
    pub fn signer(&self) -> Result<&Identity, ExError> {
        match &self.signer {
            Some(signer) if !signer.as_str().is_empty() => Ok(signer),
            _ => Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("load_config")
                .with_message("No signer identity configured")),
        }
    }
}
