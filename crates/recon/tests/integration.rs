use std::path::PathBuf;

use ltocheck_recon::config::CheckConfig;
use ltocheck_recon::engine::check;
use ltocheck_recon::model::{ErrorReason, MatchStatus};
use ltocheck_recon::writer::{read_report, write_report, ReportWriter};
use ltocheck_recon::CheckError;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn run_fixtures() -> ltocheck_recon::CheckOutcome {
    let dir = fixtures_dir();
    check(&dir.join("master.csv"), &dir.join("lto.csv"), &CheckConfig::default()).unwrap()
}

// -------------------------------------------------------------------------
// Engine
// -------------------------------------------------------------------------

#[test]
fn fixture_summary_counts() {
    let outcome = run_fixtures();
    let s = &outcome.summary;
    assert_eq!(s.total_master, 5);
    assert_eq!(s.total_lto, 4);
    assert_eq!(s.matched, 2);
    assert_eq!(s.non_matched, 3);
    assert_eq!(s.not_found, 2);
    assert_eq!(outcome.results.len(), 6);
}

#[test]
fn fixture_rows_in_master_order() {
    let outcome = run_fixtures();
    let rows: Vec<_> = outcome
        .results
        .iter()
        .map(|r| {
            (
                r.master().name.as_str(),
                r.status(),
                r.lto().and_then(|l| l.media.as_deref()),
            )
        })
        .collect();

    assert_eq!(
        rows,
        [
            ("A001C001_240101_R1AB", MatchStatus::Match, Some("LTO0001")),
            ("A001C002_240101_R1AB", MatchStatus::Error, Some("LTO0001")),
            ("A001C003_240101_R1AB", MatchStatus::Match, Some("LTO0001")),
            ("A001C003_240101_R1AB", MatchStatus::Error, Some("LTO0002")),
            ("A001C004_240101_R1AB", MatchStatus::Error, None),
            ("A001C005_240101_R1AB", MatchStatus::Error, None),
        ]
    );

    assert_eq!(outcome.results[1].reasons(), &[ErrorReason::FrameCountMismatch]);
    assert_eq!(
        outcome.results[3].reasons(),
        &[ErrorReason::SizeMismatch, ErrorReason::Md5Mismatch]
    );
    // Proxy copy of C004 does not count as archived.
    assert_eq!(outcome.results[4].reasons(), &[ErrorReason::FileNotFound]);
}

#[test]
fn fixture_summary_text() {
    let outcome = run_fixtures();
    assert_eq!(
        outcome.summary_text(),
        "Total Video Files on Master: 5\n\
         Total Video Files on LTO: 4\n\
         Matches: 2\n\
         Non-Matches: 3\n\
         Not Found: 2"
    );
}

#[test]
fn missing_master_is_not_found() {
    let dir = fixtures_dir();
    let err = check(&dir.join("nope.csv"), &dir.join("lto.csv"), &CheckConfig::default())
        .unwrap_err();
    assert!(matches!(err, CheckError::NotFound { ref path } if path.ends_with("nope.csv")));
}

#[test]
fn swapped_inputs_report_missing_column() {
    // The LTO export has no "File Size" column.
    let dir = fixtures_dir();
    let err = check(&dir.join("lto.csv"), &dir.join("master.csv"), &CheckConfig::default())
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to find column: 'File Size' (master csv)");
}

#[test]
fn outcome_serializes_to_json() {
    let outcome = run_fixtures();
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["summary"]["matched"], 2);
    assert_eq!(json["results"][0]["status"], "MATCH");
    assert_eq!(json["results"][1]["reasons"][0], "FRAME_COUNT_MISMATCH");
    assert!(json["results"][4].get("lto").is_none());
}

// -------------------------------------------------------------------------
// Report round trip
// -------------------------------------------------------------------------

#[test]
fn report_round_trip() {
    let outcome = run_fixtures();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lto_check_report.csv");

    assert_eq!(write_report(&path, &outcome.results).unwrap(), 6);
    let rows = read_report(&path).unwrap();
    assert_eq!(rows.len(), outcome.results.len());

    for (row, result) in rows.iter().zip(&outcome.results) {
        assert_eq!(row.status, result.status().to_string());
        assert_eq!(row.filename, result.master().name);
        assert_eq!(row.error_messages, result.error_messages());
    }
    assert_eq!(rows[3].error_messages, "SIZE MISMATCH \tMD5 MISMATCH ");
    assert_eq!(rows[4].lto_tape, "");
    assert_eq!(rows[4].frames_lto, "");
}

#[test]
fn two_sessions_do_not_share_header_state() {
    let outcome = run_fixtures();
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");

    let mut a = ReportWriter::create(&first).unwrap();
    let mut b = ReportWriter::create(&second).unwrap();
    a.write(&outcome.results).unwrap();
    b.write(&outcome.results).unwrap();
    drop(a);
    drop(b);

    for path in [&first, &second] {
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.starts_with("STATUS,FILENAME,"));
        assert_eq!(text.matches("STATUS,FILENAME,").count(), 1);
    }
}

#[test]
fn rerun_appending_to_same_report_adds_nothing() {
    let outcome = run_fixtures();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.csv");
    write_report(&path, &outcome.results).unwrap();

    let mut writer = ReportWriter::append(&path).unwrap();
    assert_eq!(writer.write(&outcome.results).unwrap(), 0);
    drop(writer);
    assert_eq!(read_report(&path).unwrap().len(), 6);
}
