#![allow(clippy::unwrap_used, clippy::expect_used)]

// Ledger contract tests against the in-memory backend
// Covers the owner gate, guard precedence, append-only uniqueness and
// digest verification.

use reportseal_core::{ExErrorKind, Identity, MemoryLedger, ReportDigest, ReportLedger};

fn owner() -> Identity {
    Identity::new("0xA11CE")
}

fn digest(byte: u8) -> ReportDigest {
    ReportDigest::from_bytes([byte; 32])
}

fn ledger_with_job123() -> MemoryLedger {
    let mut ledger = MemoryLedger::new(owner());
    ledger
        .store_report(&owner(), "JOB123", &digest(0xab), "GRAIN_ANALYSIS", "operator01")
        .unwrap();
    ledger
}

#[test]
fn test_owner_store_then_get_returns_fields() {
    let ledger = ledger_with_job123();

    let entry = ledger.get_report("JOB123").unwrap();
    assert_eq!(entry.job_id, "JOB123");
    assert_eq!(entry.report_hash, digest(0xab));
    assert_eq!(entry.product_name, "GRAIN_ANALYSIS");
    assert_eq!(entry.username, "operator01");
    assert_eq!(entry.uploaded_by, owner());
    assert!(entry.timestamp > 0);
}

#[test]
fn test_receipts_are_unique() {
    let mut ledger = MemoryLedger::new(owner());
    let a = ledger
        .store_report(&owner(), "JOB-A", &digest(1), "P", "u")
        .unwrap();
    let b = ledger
        .store_report(&owner(), "JOB-B", &digest(2), "P", "u")
        .unwrap();
    assert_ne!(a.receipt_id, b.receipt_id);
    assert_eq!(a.report_hash, digest(1));
}

#[test]
fn test_second_store_same_job_rejected() {
    let mut ledger = ledger_with_job123();

    let err = ledger
        .store_report(&owner(), "JOB123", &digest(0xcd), "OTHER", "someone")
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::AlreadyExists);
    assert_eq!(err.job_id(), Some("JOB123"));

    // First write is untouched
    let entry = ledger.get_report("JOB123").unwrap();
    assert_eq!(entry.report_hash, digest(0xab));
    assert_eq!(entry.product_name, "GRAIN_ANALYSIS");
}

#[test]
fn test_second_store_identical_hash_still_rejected() {
    let mut ledger = ledger_with_job123();
    let err = ledger
        .store_report(&owner(), "JOB123", &digest(0xab), "GRAIN_ANALYSIS", "operator01")
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::AlreadyExists);
    assert_eq!(ledger.len(), 1);
}

#[test]
fn test_empty_job_id_rejected() {
    let mut ledger = MemoryLedger::new(owner());
    let err = ledger
        .store_report(&owner(), "", &digest(1), "P", "u")
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::EmptyJobId);
    assert_eq!(err.code(), "ERR_EMPTY_JOB_ID");
    assert!(ledger.is_empty());
}

#[test]
fn test_zero_hash_rejected() {
    let mut ledger = MemoryLedger::new(owner());
    let err = ledger
        .store_report(&owner(), "JOB1", &ReportDigest::ZERO, "P", "u")
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::EmptyHash);
    assert!(ledger.get_report("JOB1").is_err());
}

#[test]
fn test_non_owner_rejected_owner_succeeds() {
    let mut ledger = MemoryLedger::new(owner());
    let intruder = Identity::new("0xB0B");

    let err = ledger
        .store_report(&intruder, "JOB124", &digest(3), "P", "u")
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Unauthorised);
    assert!(ledger.is_empty());

    ledger
        .store_report(&owner(), "JOB124", &digest(3), "P", "u")
        .unwrap();
    assert_eq!(ledger.get_report("JOB124").unwrap().uploaded_by, owner());
}

#[test]
fn test_unauthorised_takes_precedence() {
    let mut ledger = ledger_with_job123();
    let intruder = Identity::new("0xB0B");

    // Every other guard would also fail here
    let err = ledger
        .store_report(&intruder, "", &ReportDigest::ZERO, "", "")
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Unauthorised);

    let err = ledger
        .store_report(&intruder, "JOB123", &digest(0xab), "P", "u")
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Unauthorised);
}

#[test]
fn test_empty_job_id_before_empty_hash() {
    let mut ledger = MemoryLedger::new(owner());
    let err = ledger
        .store_report(&owner(), "", &ReportDigest::ZERO, "P", "u")
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::EmptyJobId);
}

#[test]
fn test_empty_hash_before_duplicate() {
    let mut ledger = ledger_with_job123();
    let err = ledger
        .store_report(&owner(), "JOB123", &ReportDigest::ZERO, "P", "u")
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::EmptyHash);
}

#[test]
fn test_get_unknown_is_not_found() {
    let ledger = ledger_with_job123();
    let err = ledger.get_report("UNKNOWN").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.job_id(), Some("UNKNOWN"));
}

#[test]
fn test_verify_matching_and_mismatching() {
    let ledger = ledger_with_job123();
    assert!(ledger.verify_report_hash("JOB123", &digest(0xab)).unwrap());
    assert!(!ledger.verify_report_hash("JOB123", &digest(0xac)).unwrap());
}

#[test]
fn test_verify_unknown_is_not_found() {
    let ledger = ledger_with_job123();
    let err = ledger
        .verify_report_hash("UNKNOWN", &digest(0xab))
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_verify_ignores_hex_case() {
    let ledger = ledger_with_job123();
    let upper = format!("0x{}", "AB".repeat(32));
    let candidate: ReportDigest = upper.parse().unwrap();
    assert!(ledger.verify_report_hash("JOB123", &candidate).unwrap());
}

#[test]
fn test_entries_independent_per_job() {
    let mut ledger = ledger_with_job123();
    ledger
        .store_report(&owner(), "JOB200", &digest(0x20), "OTHER", "")
        .unwrap();

    assert_eq!(ledger.get_report("JOB123").unwrap().report_hash, digest(0xab));
    assert_eq!(ledger.get_report("JOB200").unwrap().username, "");
    assert_eq!(ledger.len(), 2);
}
