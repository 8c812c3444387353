use std::collections::HashMap;
use std::time::Instant;

use uuid::Uuid;

use super::{guards, ReportLedger};
use crate::errors::{ExError, SealError};
use crate::model::{Identity, LedgerEntry, ReportDigest, WriteReceipt};
use crate::{log_op_end, log_op_error, log_op_start};

/// In-memory ledger
///
/// HashMap-backed implementation of the ledger contract. Used for dry runs
/// and tests; nothing survives the process. Not thread-safe by itself, the
/// caller owns it exclusively.
#[derive(Debug, Clone)]
pub struct MemoryLedger {
    owner: Identity,
    entries: HashMap<String, LedgerEntry>,
}

impl MemoryLedger {
    /// Create an empty ledger owned by `owner`
    pub fn new(owner: Identity) -> Self {
        Self {
            owner,
            entries: HashMap::new(),
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ReportLedger for MemoryLedger {
    fn owner(&self) -> Result<Identity, ExError> {
        Ok(self.owner.clone())
    }

    fn store_report(
        &mut self,
        caller: &Identity,
        job_id: &str,
        report_hash: &ReportDigest,
        product_name: &str,
        username: &str,
    ) -> Result<WriteReceipt, ExError> {
        let started = Instant::now();
        log_op_start!("store_report", job_id = job_id);

        let checked = guards::check_store(&self.owner, caller, job_id, report_hash, || {
            Ok(self.entries.contains_key(job_id))
        });
        if let Err(e) = checked {
            log_op_error!(
                "store_report",
                e.clone(),
                duration_ms = started.elapsed().as_millis() as u64,
                job_id = job_id
            );
            return Err(e);
        }

        let timestamp = chrono::Utc::now().timestamp();
        let entry = LedgerEntry {
            job_id: job_id.to_string(),
            report_hash: *report_hash,
            product_name: product_name.to_string(),
            username: username.to_string(),
            timestamp,
            uploaded_by: caller.clone(),
        };
        self.entries.insert(job_id.to_string(), entry);

        log_op_end!(
            "store_report",
            duration_ms = started.elapsed().as_millis() as u64,
            job_id = job_id
        );
        Ok(WriteReceipt {
            receipt_id: Uuid::now_v7().to_string(),
            job_id: job_id.to_string(),
            report_hash: *report_hash,
            committed_at: timestamp,
        })
    }

    fn get_report(&self, job_id: &str) -> Result<LedgerEntry, ExError> {
        self.entries.get(job_id).cloned().ok_or_else(|| {
            ExError::from(SealError::JobNotFound {
                job_id: job_id.to_string(),
            })
            .with_op("get_report")
        })
    }
}
