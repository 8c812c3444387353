#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{report_json, scenario_fetcher, REF_1, REF_2};
use reportseal_core::canonical::{compute_digest, MapFetcher};
use reportseal_core::errors::SealError;
use reportseal_core::logging_facility::test_capture::init_test_capture;
use reportseal_core::{log_op_end, log_op_error, log_op_start};
use reportseal_core::{Identity, MemoryLedger, ReportDigest, ReportLedger};
use reportseal_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DATASET_COUNT, FIELD_DIGEST,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let events = capture.events();
    let start_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START))
        .collect();

    assert!(
        !start_events.is_empty(),
        "Should have captured at least one start event"
    );
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events = capture.events_for_op(op_name);
    assert_eq!(end_events.len(), 1, "Should have exactly one end event");

    let end_event = &end_events[0];
    assert_eq!(end_event.event.as_deref(), Some(EVENT_END));
    assert_eq!(end_event.duration_ms(), Some(42));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = SealError::JobNotFound {
        job_id: "J1".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(error_events[0].err_code(), Some("ERR_NOT_FOUND"));
    assert_eq!(error_events[0].err_kind(), Some("NotFound"));
}

#[test]
fn test_boundary_single_start_end() {
    let capture = init_test_capture();
    let op_name = "test_boundary_unique_4";

    log_op_start!(op_name, job_id = "JOB-LOG-4");
    log_op_end!(op_name, duration_ms = 7, job_id = "JOB-LOG-4");

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[1].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[0].job_id(), Some("JOB-LOG-4"));
}

#[test]
fn test_store_report_logs_boundaries() {
    let capture = init_test_capture();
    let owner = Identity::new("owner");
    let mut ledger = MemoryLedger::new(owner.clone());

    ledger
        .store_report(
            &owner,
            "JOB-LOG-STORE",
            &ReportDigest::from_bytes([9u8; 32]),
            "P",
            "u",
        )
        .unwrap();

    let ours: Vec<_> = capture
        .events_for_op("store_report")
        .into_iter()
        .filter(|e| e.job_id() == Some("JOB-LOG-STORE"))
        .collect();
    assert_eq!(ours.len(), 2);
    assert_eq!(ours[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(ours[1].event.as_deref(), Some(EVENT_END));
}

#[test]
fn test_rejected_store_logs_error_code() {
    let capture = init_test_capture();
    let mut ledger = MemoryLedger::new(Identity::new("owner"));

    let _ = ledger.store_report(
        &Identity::new("intruder"),
        "JOB-LOG-DENIED",
        &ReportDigest::from_bytes([9u8; 32]),
        "P",
        "u",
    );

    let errors = capture.count_events(|e| {
        e.op.as_deref() == Some("store_report")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.job_id() == Some("JOB-LOG-DENIED")
            && e.err_code() == Some("ERR_UNAUTHORISED")
    });
    assert_eq!(errors, 1);
}

#[test]
fn test_compute_digest_logs_end() {
    let capture = init_test_capture();
    let report = report_json("JOB-LOG-DIGEST", &[("cumulative_analysis_csv", REF_1)]);
    let result = compute_digest(&report, &scenario_fetcher()).unwrap();

    let digest_text = result.digest.to_hex();
    let ends = capture.count_events(|e| {
        e.op.as_deref() == Some("compute_digest")
            && e.event.as_deref() == Some(EVENT_END)
            && e.field(FIELD_DIGEST) == Some(digest_text.as_str())
    });
    assert!(ends >= 1);
}

#[test]
fn test_compute_digest_failure_logs_fetch_code() {
    let capture = init_test_capture();
    let report = report_json("JOB-LOG-FAIL", &[("particle_distribution_csv", REF_2)]);

    let before = capture.count_events(|e| {
        e.op.as_deref() == Some("compute_digest")
            && e.err_code() == Some("ERR_FETCH")
    });
    compute_digest(&report, &MapFetcher::new()).unwrap_err();
    let after = capture.count_events(|e| {
        e.op.as_deref() == Some("compute_digest")
            && e.err_code() == Some("ERR_FETCH")
    });

    assert!(after > before);
}

#[test]
fn test_compute_digest_start_records_dataset_count() {
    let capture = init_test_capture();
    let report = report_json(
        "JOB-LOG-COUNT",
        &[("cumulative_analysis_csv", REF_1), ("particle_distribution_csv", REF_2)],
    );
    compute_digest(&report, &scenario_fetcher()).unwrap();

    let starts = capture.count_events(|e| {
        e.op.as_deref() == Some("compute_digest")
            && e.event.as_deref() == Some(EVENT_START)
            && e.field(FIELD_DATASET_COUNT) == Some("2")
            && e.component() == Some("reportseal_core::canonical")
    });
    assert!(starts >= 1);
}
