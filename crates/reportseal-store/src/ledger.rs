//! SQLite-backed report ledger.
//!
//! The durable implementation of [`ReportLedger`]. One database file holds
//! one ledger: a single owner row in `ledger_meta` and the append-only
//! `report_entries` table. Triggers in the schema reject any `UPDATE` or
//! `DELETE`, so the only way a row ever changes is that it comes into
//! existence.
//!
//! ## Write path
//!
//! `store_report` opens an immediate transaction, runs the shared guard
//! sequence against the owner and entry visible inside that transaction,
//! inserts, and commits. A receipt is only returned after the commit, so a
//! receipt always means the entry is durable.

#![allow(clippy::result_large_err)]

use std::time::Instant;

use reportseal_core::errors::{ExError, ExErrorKind, SealError};
use reportseal_core::ledger::{guards, ReportLedger};
use reportseal_core::model::{Identity, LedgerEntry, ReportDigest, WriteReceipt};
use reportseal_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::{Connection, OptionalExtension, TransactionBehavior};
use uuid::Uuid;

use crate::config::LedgerConfig;
use crate::db;
use crate::errors::{from_rusqlite, io_error, is_unique_violation, ledger_unavailable, Result};
use crate::migrations::apply_migrations;

/// Durable ledger stored in a SQLite database file
pub struct SqliteLedger {
    conn: Connection,
    config: LedgerConfig,
}

impl std::fmt::Debug for SqliteLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteLedger")
            .field("path", &self.config.path)
            .finish()
    }
}

impl SqliteLedger {
    /// Create (or re-open) a ledger owned by `owner`
    ///
    /// Creates the database file and parent directories if needed, applies
    /// migrations and records the owner. Calling this again with the same
    /// owner is a no-op.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `owner` is empty
    /// - `AlreadyExists` if the ledger is already owned by someone else
    /// - `Io` / `Persistence` / `Timeout` for file or database failures
    pub fn initialize(config: &LedgerConfig, owner: &Identity) -> Result<Self> {
        let started = Instant::now();
        log_op_start!("initialize_ledger");

        let result = Self::create(config, owner);

        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => {
                log_op_end!("initialize_ledger", duration_ms = duration_ms, owner = %owner);
            }
            Err(e) => {
                log_op_error!("initialize_ledger", e.clone(), duration_ms = duration_ms);
            }
        }
        result
    }

    fn create(config: &LedgerConfig, owner: &Identity) -> Result<Self> {
        if owner.as_str().is_empty() {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("initialize_ledger")
                .with_message("Ledger owner identity must not be empty"));
        }

        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| io_error("create_ledger_dir", e))?;
            }
        }

        let mut conn = db::open_configured(config)?;
        apply_migrations(&mut conn)?;

        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(from_rusqlite)?;
        match read_owner(&tx)? {
            None => {
                tx.execute(
                    "INSERT INTO ledger_meta (id, owner, initialized_at) VALUES (1, ?1, ?2)",
                    rusqlite::params![owner.as_str(), chrono::Utc::now().timestamp()],
                )
                .map_err(from_rusqlite)?;
            }
            Some(existing) if existing == *owner => {}
            Some(existing) => {
                return Err(SealError::LedgerAlreadyOwned {
                    owner: existing.to_string(),
                }
                .into());
            }
        }
        tx.commit().map_err(from_rusqlite)?;

        Ok(Self {
            conn,
            config: config.clone(),
        })
    }

    /// Open an existing, initialised ledger
    ///
    /// # Errors
    ///
    /// `LedgerUnavailable` if the file does not exist or has no owner yet.
    pub fn open(config: &LedgerConfig) -> Result<Self> {
        let path = config.path.display().to_string();
        if !config.path.exists() {
            return Err(ledger_unavailable(&path, "no ledger file"));
        }

        let mut conn = db::open_configured(config)?;
        apply_migrations(&mut conn)?;
        if read_owner(&conn)?.is_none() {
            return Err(ledger_unavailable(&path, "ledger has not been initialised"));
        }

        tracing::debug!(path = %path, "Opened ledger");
        Ok(Self {
            conn,
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Number of stored entries
    ///
    /// # Errors
    ///
    /// Returns `Persistence` or `Timeout` if the count query fails.
    pub fn entry_count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM report_entries", [], |row| row.get(0))
            .map_err(from_rusqlite)?;
        Ok(count.max(0) as u64)
    }

    fn insert_entry(
        &mut self,
        caller: &Identity,
        job_id: &str,
        report_hash: &ReportDigest,
        product_name: &str,
        username: &str,
    ) -> Result<WriteReceipt> {
        let path = self.config.path.display().to_string();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| from_rusqlite(e).with_op("store_report").with_job_id(job_id))?;

        let owner = read_owner(&tx)?
            .ok_or_else(|| ledger_unavailable(&path, "ledger has not been initialised"))?;
        guards::check_store(&owner, caller, job_id, report_hash, || {
            job_exists(&tx, job_id)
        })?;

        let timestamp = chrono::Utc::now().timestamp();
        let receipt_id = Uuid::now_v7().to_string();
        tx.execute(
            r#"
            INSERT INTO report_entries (
                job_id,
                report_hash,
                product_name,
                username,
                timestamp,
                uploaded_by,
                receipt_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            rusqlite::params![
                job_id,
                report_hash.as_bytes().as_slice(),
                product_name,
                username,
                timestamp,
                caller.as_str(),
                receipt_id,
            ],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                ExError::from(SealError::JobAlreadyExists {
                    job_id: job_id.to_string(),
                })
            } else {
                from_rusqlite(e).with_op("store_report").with_job_id(job_id)
            }
        })?;

        tx.commit()
            .map_err(|e| from_rusqlite(e).with_op("store_report").with_job_id(job_id))?;

        Ok(WriteReceipt {
            receipt_id,
            job_id: job_id.to_string(),
            report_hash: *report_hash,
            committed_at: timestamp,
        })
    }
}

impl ReportLedger for SqliteLedger {
    fn owner(&self) -> Result<Identity> {
        let path = self.config.path.display().to_string();
        read_owner(&self.conn)?
            .ok_or_else(|| ledger_unavailable(&path, "ledger has not been initialised"))
    }

    fn store_report(
        &mut self,
        caller: &Identity,
        job_id: &str,
        report_hash: &ReportDigest,
        product_name: &str,
        username: &str,
    ) -> Result<WriteReceipt> {
        let started = Instant::now();
        log_op_start!("store_report", job_id = job_id);

        let result = self.insert_entry(caller, job_id, report_hash, product_name, username);

        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(receipt) => {
                log_op_end!(
                    "store_report",
                    duration_ms = duration_ms,
                    job_id = job_id,
                    digest = %receipt.report_hash
                );
            }
            Err(e) => {
                log_op_error!(
                    "store_report",
                    e.clone(),
                    duration_ms = duration_ms,
                    job_id = job_id
                );
            }
        }
        result
    }

    fn get_report(&self, job_id: &str) -> Result<LedgerEntry> {
        let row = self
            .conn
            .query_row(
                r#"
                SELECT job_id, report_hash, product_name, username, timestamp, uploaded_by
                FROM report_entries
                WHERE job_id = ?1
                "#,
                [job_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, Vec<u8>>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, i64>(4)?,
                        row.get::<_, String>(5)?,
                    ))
                },
            )
            .optional()
            .map_err(|e| from_rusqlite(e).with_op("get_report").with_job_id(job_id))?;

        let Some((stored_job_id, hash, product_name, username, timestamp, uploaded_by)) = row
        else {
            return Err(ExError::from(SealError::JobNotFound {
                job_id: job_id.to_string(),
            })
            .with_op("get_report"));
        };

        let report_hash = ReportDigest::from_slice(&hash)
            .map_err(|e| ExError::from(e).with_op("get_report").with_job_id(job_id))?;

        Ok(LedgerEntry {
            job_id: stored_job_id,
            report_hash,
            product_name,
            username,
            timestamp,
            uploaded_by: Identity::new(uploaded_by),
        })
    }
}

fn read_owner(conn: &Connection) -> Result<Option<Identity>> {
    conn.query_row("SELECT owner FROM ledger_meta WHERE id = 1", [], |row| {
        row.get::<_, String>(0)
    })
    .optional()
    .map(|owner| owner.map(Identity::new))
    .map_err(from_rusqlite)
}

fn job_exists(conn: &Connection, job_id: &str) -> Result<bool> {
    conn.query_row(
        "SELECT 1 FROM report_entries WHERE job_id = ?1",
        [job_id],
        |_| Ok(()),
    )
    .optional()
    .map(|found| found.is_some())
    .map_err(|e| from_rusqlite(e).with_op("store_report").with_job_id(job_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> LedgerConfig {
        LedgerConfig::new(dir.path().join("ledger.db"))
    }

    #[test]
    fn test_open_missing_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let err = SqliteLedger::open(&config(&dir)).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::LedgerUnavailable);
        assert!(!dir.path().join("ledger.db").exists());
    }

    #[test]
    fn test_initialize_is_idempotent_for_same_owner() {
        let dir = TempDir::new().unwrap();
        let owner = Identity::new("owner");
        SqliteLedger::initialize(&config(&dir), &owner).unwrap();
        let again = SqliteLedger::initialize(&config(&dir), &owner).unwrap();
        assert_eq!(again.owner().unwrap(), owner);
    }

    #[test]
    fn test_initialize_rejects_empty_owner() {
        let dir = TempDir::new().unwrap();
        let err = SqliteLedger::initialize(&config(&dir), &Identity::new("")).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    }

    #[test]
    fn test_corrupt_hash_blob_is_integrity_error() {
        let dir = TempDir::new().unwrap();
        let ledger = SqliteLedger::initialize(&config(&dir), &Identity::new("owner")).unwrap();
        // Bypass the length CHECK to simulate a damaged row
        ledger
            .conn
            .execute_batch(
                "PRAGMA ignore_check_constraints = ON;
                 INSERT INTO report_entries VALUES ('J', x'0102', 'P', 'u', 1, 'owner', 'r1');",
            )
            .unwrap();

        let err = ledger.get_report("J").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Integrity);
        assert_eq!(err.job_id(), Some("J"));
    }
}
