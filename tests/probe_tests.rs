//! Probe spec and report tests
//!
//! These tests exercise spec validation, target resolution ordering, and
//! report serialization without a live browser.

use pretty_assertions::assert_eq;
use std::path::PathBuf;
use visprobe::browser::{ArtifactFormat, ArtifactInfo, SettleMode};
use visprobe::error::NavigationError;
use visprobe::{ProbeReport, ProbeSpec, Target};

#[test]
fn test_spec_defaults() {
    // #layout, 10 s visibility timeout, 1 s fixed settle, PNG artifact.
    let spec = ProbeSpec::new("index.html", "#layout", "verification.png");
    assert_eq!(spec.wait.timeout_ms, 10000);
    assert_eq!(spec.settle.duration_ms, 1000);
    assert_eq!(spec.settle.mode, SettleMode::Fixed);
    assert_eq!(spec.capture.format, ArtifactFormat::Png);
    assert_eq!(spec.navigation.retries, 0);
}

#[test]
fn test_spec_validation_catches_bad_fields() {
    let mut spec = ProbeSpec::new("index.html", "", "out.png");
    assert!(spec.validate().is_err());

    spec.selector = "#layout".to_string();
    assert!(spec.validate().is_ok());

    spec.wait.poll_interval_ms = 0;
    assert!(spec.validate().is_err());
}

#[test]
fn test_unreadable_target_fails_before_any_browser_work() {
    // Resolution happens before a session exists, so a missing file is a
    // NavigationError with no wait and no capture.
    let target = Target::parse("/definitely/not/present.html").unwrap();
    let err = target.resolve().unwrap_err();
    assert!(matches!(err, NavigationError::TargetUnreadable(_)));
}

#[test]
fn test_local_target_resolves_to_file_url() {
    let dir = std::env::temp_dir();
    let path = dir.join("visprobe_probe_test.html");
    std::fs::write(&path, "<html><body><div id=\"layout\"></div></body></html>").unwrap();

    let target = Target::parse(path.to_str().unwrap()).unwrap();
    let url = target.resolve().unwrap();
    assert_eq!(url.scheme(), "file");

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_spec_json_roundtrip() {
    let spec = ProbeSpec::new("https://example.com", "#app", "shot.png");
    let json = serde_json::to_string_pretty(&spec).unwrap();
    let back: ProbeSpec = serde_json::from_str(&json).unwrap();

    assert_eq!(back.target, "https://example.com");
    assert_eq!(back.selector, "#app");
    assert_eq!(back.output_path, PathBuf::from("shot.png"));
}

#[test]
fn test_report_serialization() {
    let report = ProbeReport {
        target: "index.html".to_string(),
        final_url: "file:///srv/www/index.html".to_string(),
        title: Some("Schedule".to_string()),
        navigation_ms: 120,
        wait_ms: 480,
        wait_polls: 5,
        artifact: ArtifactInfo {
            path: PathBuf::from("verification.png"),
            format: ArtifactFormat::Png,
            bytes: 20480,
        },
        captured_at: chrono::Utc::now(),
        total_ms: 1620,
    };

    let json = serde_json::to_string(&report).unwrap();
    let back: ProbeReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.final_url, report.final_url);
    assert_eq!(back.wait_polls, 5);
    assert_eq!(back.artifact.bytes, 20480);
}
