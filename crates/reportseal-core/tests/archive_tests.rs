#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{report_json, REF_1, REF_2, REF_3};
use reportseal_core::archive::{archive_snapshot, ARCHIVE_FIELD};
use reportseal_core::canonical::MapFetcher;
use reportseal_core::SealError;

#[test]
fn test_archive_embeds_raw_text_by_file_name() {
    let report = report_json(
        "JOB123",
        &[("cumulative_analysis_csv", REF_1), ("particle_distribution_csv", REF_2)],
    );
    let fetcher = MapFetcher::new()
        .with(REF_1, "a,b\r\n1,2\r\n")
        .with(REF_2, "  c,d\n3,4  ");

    let snapshot = archive_snapshot(&report, &fetcher).unwrap();

    assert!(snapshot.is_complete());
    assert_eq!(snapshot.archived_files(), vec!["cumulative.csv", "particles.csv"]);
    // Stored exactly as fetched
    assert_eq!(
        snapshot.document[ARCHIVE_FIELD]["cumulative.csv"],
        "a,b\r\n1,2\r\n"
    );
    assert_eq!(snapshot.document[ARCHIVE_FIELD]["particles.csv"], "  c,d\n3,4  ");
}

#[test]
fn test_archive_tolerates_fetch_failure() {
    let report = report_json(
        "JOB123",
        &[
            ("cumulative_analysis_csv", REF_1),
            ("particle_distribution_csv", REF_2),
            ("rejection_analysis_display_csv", REF_3),
        ],
    );
    let fetcher = MapFetcher::new().with(REF_1, "1").with(REF_3, "3");

    let snapshot = archive_snapshot(&report, &fetcher).unwrap();

    assert!(!snapshot.is_complete());
    assert_eq!(snapshot.failures.len(), 1);
    assert_eq!(snapshot.failures[0].reference, REF_2);
    assert_eq!(snapshot.failures[0].field, "particle_distribution_csv");
    assert_eq!(snapshot.archived_files(), vec!["cumulative.csv", "rejections.csv"]);
}

#[test]
fn test_archive_preserves_key_order() {
    let report = report_json("JOB123", &[("cumulative_analysis_csv", REF_1)]);
    let fetcher = MapFetcher::new().with(REF_1, "x");

    let snapshot = archive_snapshot(&report, &fetcher).unwrap();
    let keys: Vec<&str> = snapshot
        .document
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        vec!["jobId", "productName", "username", "results", ARCHIVE_FIELD]
    );
}

#[test]
fn test_archive_pretty_json_round_trips() {
    let report = report_json("JOB123", &[("cumulative_analysis_csv", REF_1)]);
    let snapshot = archive_snapshot(&report, &MapFetcher::new().with(REF_1, "x")).unwrap();

    let pretty = snapshot.to_pretty_json().unwrap();
    assert!(pretty.contains("\n  \"fetched_csv_data\": {"));
    let reparsed: serde_json::Value = serde_json::from_str(&pretty).unwrap();
    assert_eq!(reparsed, snapshot.document);
}

#[test]
fn test_archive_rejects_malformed_report() {
    let err = archive_snapshot("not json", &MapFetcher::new()).unwrap_err();
    assert!(matches!(err, SealError::MalformedReport { .. }));
}
