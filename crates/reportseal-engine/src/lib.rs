//! ReportSeal Engine - Orchestration layer
//!
//! Provides the publish and audit flows that coordinate canonical hashing,
//! dataset fetching and the ledger.

pub mod commands;
pub mod config;
pub mod fetch;

pub use commands::audit::{audit_report, AuditReport, AuditStrategy, Verdict};
pub use commands::engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
pub use commands::publish::{publish_report, PublishOutcome};
pub use config::{ClientConfig, FetchConfig};
pub use fetch::HttpFetcher;
