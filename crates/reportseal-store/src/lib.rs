//! ReportSeal Store - durable ledger and archive persistence
//!
//! Provides:
//! - SQLite ledger implementing the report ledger contract
//! - Schema migrations with checksums
//! - Atomic archive snapshot writes

pub mod archive;
pub mod config;
pub mod db;
pub mod errors;
pub mod ledger;
pub mod migrations;

// Re-export key types
pub use archive::{default_archive_path, write_archive};
pub use config::LedgerConfig;
pub use errors::Result;
pub use ledger::SqliteLedger;
