//! Browser module tests
//!
//! These tests verify the browser configuration, capture, navigation, wait,
//! and settle types. Full browser integration tests require a running
//! Chrome/Chromium instance and are not part of this suite.

use pretty_assertions::assert_eq;
use visprobe::browser::{
    ArtifactFormat, BrowserConfig, CaptureOptions, NavigationOptions, SettleMode, SettleOptions,
    WaitOptions, WaitUntil,
};

#[test]
fn test_browser_config_default() {
    let config = BrowserConfig::default();
    assert!(config.headless);
    assert_eq!(config.width, 1280);
    assert_eq!(config.height, 720);
    assert!(config.sandbox);
    assert!(config.user_agent.is_none());
    assert!(config.chrome_path.is_none());
    assert!(config.extra_args.is_empty());
}

#[test]
fn test_browser_config_builder() {
    let config = BrowserConfig::builder()
        .headless(false)
        .viewport(1920, 1080)
        .sandbox(false)
        .user_agent("ProbeBot/1.0")
        .chrome_path("/usr/bin/chromium")
        .arg("--disable-gpu")
        .arg("--no-first-run")
        .build();

    assert!(!config.headless);
    assert_eq!(config.width, 1920);
    assert_eq!(config.height, 1080);
    assert!(!config.sandbox);
    assert_eq!(config.user_agent, Some("ProbeBot/1.0".to_string()));
    assert_eq!(config.chrome_path, Some("/usr/bin/chromium".to_string()));
    assert_eq!(config.extra_args.len(), 2);
}

#[test]
fn test_navigation_options_default() {
    let opts = NavigationOptions::default();
    assert_eq!(opts.timeout_ms, 30000);
    assert_eq!(opts.wait_until, WaitUntil::Load);
    assert_eq!(opts.retries, 0);
    assert_eq!(opts.retry_delay_ms, 1000);
}

#[test]
fn test_navigation_options_serialization() {
    let opts: NavigationOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(opts.timeout_ms, 30000);
    assert_eq!(opts.retries, 0);

    let opts: NavigationOptions =
        serde_json::from_str(r#"{"wait_until": "dom_content_loaded", "retries": 2}"#).unwrap();
    assert_eq!(opts.wait_until, WaitUntil::DomContentLoaded);
    assert_eq!(opts.retries, 2);
}

#[test]
fn test_wait_options_default() {
    let opts = WaitOptions::default();
    assert_eq!(opts.timeout_ms, 10000);
    assert_eq!(opts.poll_interval_ms, 100);
}

#[test]
fn test_wait_options_validation() {
    let opts = WaitOptions {
        timeout_ms: 5000,
        poll_interval_ms: 0,
    };
    assert!(opts.validate().is_err());

    let opts = WaitOptions {
        timeout_ms: 0,
        poll_interval_ms: 50,
    };
    assert!(opts.validate().is_ok());
}

#[test]
fn test_settle_options_default() {
    let opts = SettleOptions::default();
    assert_eq!(opts.mode, SettleMode::Fixed);
    assert_eq!(opts.duration_ms, 1000);
    assert_eq!(opts.quiet_frames, 3);
}

#[test]
fn test_settle_mode_serialization() {
    let json = serde_json::to_string(&SettleMode::FrameIdle).unwrap();
    assert_eq!(json, "\"frame_idle\"");

    let mode: SettleMode = serde_json::from_str("\"fixed\"").unwrap();
    assert_eq!(mode, SettleMode::Fixed);
}

#[test]
fn test_artifact_format_default() {
    assert_eq!(ArtifactFormat::default(), ArtifactFormat::Png);
}

#[test]
fn test_artifact_format_serialization() {
    let formats = [
        (ArtifactFormat::Png, "\"png\""),
        (ArtifactFormat::Jpeg, "\"jpeg\""),
        (ArtifactFormat::Webp, "\"webp\""),
    ];

    for (format, expected) in formats {
        let json = serde_json::to_string(&format).unwrap();
        assert_eq!(json, expected);
    }
}

#[test]
fn test_capture_options_default() {
    let opts = CaptureOptions::default();
    assert_eq!(opts.format, ArtifactFormat::Png);
    assert_eq!(opts.quality, 85);
    assert!(!opts.full_page);
    assert!(opts.clip_selector.is_none());
}

#[test]
fn test_capture_options_serialization() {
    let opts = CaptureOptions {
        format: ArtifactFormat::Jpeg,
        quality: 75,
        full_page: true,
        clip_selector: Some("#content".to_string()),
    };

    let json = serde_json::to_string(&opts).unwrap();
    let back: CaptureOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(back.format, ArtifactFormat::Jpeg);
    assert_eq!(back.quality, 75);
    assert!(back.full_page);
    assert_eq!(back.clip_selector, Some("#content".to_string()));
}

#[test]
fn test_capture_options_minimal_json() {
    let opts: CaptureOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(opts.format, ArtifactFormat::Png);
    assert_eq!(opts.quality, 85);
}
