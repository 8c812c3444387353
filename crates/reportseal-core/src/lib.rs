//! ReportSeal Core - canonical report hashing and the report ledger contract
//!
//! This crate provides:
//! - The canonical hasher: report text + linked datasets → one SHA-256 digest
//! - The `ReportLedger` trait, its fixed store guard sequence and an
//!   in-memory implementation
//! - A best-effort archival snapshot, kept apart from hashing
//! - The error facility (`SealError`, `ExError`) and logging facility

pub mod archive;
pub mod canonical;
pub mod errors;
pub mod ledger;
pub mod logging_facility;
pub mod model;

#[doc(hidden)]
pub use reportseal_core_types;

// Re-export commonly used types
pub use archive::{archive_snapshot, ArchiveSnapshot};
pub use canonical::{compute_digest, CanonicalDigest, DatasetFetcher, MapFetcher};
pub use errors::{ExError, ExErrorKind, Result, SealError};
pub use ledger::{MemoryLedger, ReportLedger};
pub use model::{Identity, LedgerEntry, Report, ReportDigest, WriteReceipt};
