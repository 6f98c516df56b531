//! Probe orchestration
//!
//! A probe is one end-to-end verification pass, strictly sequential:
//! navigate, wait for the element to be visible, settle, capture. A failure
//! in navigation or the wait aborts the flow without attempting capture; a
//! capture failure is reported. The browser session is owned by exactly one
//! probe run and is closed on every exit path, including failures.

use crate::browser::{
    ArtifactCapturer, ArtifactInfo, BrowserConfig, BrowserController, CaptureOptions,
    ConditionWaiter, NavigationOptions, Navigator, Settle, SettleOptions, WaitOptions,
};
use crate::error::{Error, Result};
use crate::target::Target;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, instrument};
use url::Url;

/// Everything that describes one probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeSpec {
    /// Target document: URL or local file path
    pub target: String,
    /// CSS selector of the element that must become visible
    pub selector: String,
    /// Path the artifact is written to
    pub output_path: PathBuf,
    /// Navigation options
    #[serde(default)]
    pub navigation: NavigationOptions,
    /// Visibility wait options
    #[serde(default)]
    pub wait: WaitOptions,
    /// Settle options
    #[serde(default)]
    pub settle: SettleOptions,
    /// Capture options
    #[serde(default)]
    pub capture: CaptureOptions,
}

impl ProbeSpec {
    /// Create a spec with default options for every phase
    pub fn new<T, S, P>(target: T, selector: S, output_path: P) -> Self
    where
        T: Into<String>,
        S: Into<String>,
        P: Into<PathBuf>,
    {
        Self {
            target: target.into(),
            selector: selector.into(),
            output_path: output_path.into(),
            navigation: NavigationOptions::default(),
            wait: WaitOptions::default(),
            settle: SettleOptions::default(),
            capture: CaptureOptions::default(),
        }
    }

    /// Validate the spec before any browser work
    pub fn validate(&self) -> Result<()> {
        if self.selector.trim().is_empty() {
            return Err(Error::spec("selector cannot be empty"));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(Error::spec("output path cannot be empty"));
        }
        if self.capture.quality > 100 {
            return Err(Error::spec("capture quality must be 0-100"));
        }
        self.wait.validate().map_err(Error::spec)?;
        Ok(())
    }
}

/// Outcome of a successful probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeReport {
    /// Target as supplied by the caller
    pub target: String,
    /// Final URL after any redirects
    pub final_url: String,
    /// Page title, if any
    pub title: Option<String>,
    /// Time spent navigating, in milliseconds
    pub navigation_ms: u64,
    /// Time spent waiting for visibility, in milliseconds
    pub wait_ms: u64,
    /// Number of visibility polls performed
    pub wait_polls: u32,
    /// The persisted artifact
    pub artifact: ArtifactInfo,
    /// When the artifact was captured
    pub captured_at: DateTime<Utc>,
    /// Total wall time of the probe, in milliseconds
    pub total_ms: u64,
}

/// Runs probes
pub struct Probe;

impl Probe {
    /// Run a probe with the default browser configuration
    pub async fn run(spec: &ProbeSpec) -> Result<ProbeReport> {
        Self::run_with_config(spec, BrowserConfig::default()).await
    }

    /// Run a probe with a custom browser configuration.
    ///
    /// The spec is validated and the target resolved before a browser is
    /// launched, so an unreadable target never costs a session. Once a
    /// session exists it is closed whether the probe succeeds or fails.
    #[instrument(skip(spec, config), fields(target = %spec.target, selector = %spec.selector))]
    pub async fn run_with_config(spec: &ProbeSpec, config: BrowserConfig) -> Result<ProbeReport> {
        spec.validate()?;
        let url = Target::parse(&spec.target)?.resolve()?;

        let controller = BrowserController::with_config(config).await?;
        let outcome = Self::drive(&controller, spec, &url).await;
        let close_outcome = controller.close().await;

        let report = outcome?;
        close_outcome?;
        Ok(report)
    }

    /// The four probe phases, in order, against an open session
    async fn drive(
        controller: &BrowserController,
        spec: &ProbeSpec,
        url: &Url,
    ) -> Result<ProbeReport> {
        let started = Instant::now();
        let page = controller.new_page().await?;

        let nav = Navigator::goto(&page, url, Some(spec.navigation.clone())).await?;
        let wait = ConditionWaiter::await_visible(&page, &spec.selector, &spec.wait).await?;
        Settle::run(&page, &spec.settle).await?;
        let artifact = ArtifactCapturer::capture(&page, &spec.capture, &spec.output_path).await?;

        let report = ProbeReport {
            target: spec.target.clone(),
            final_url: nav.final_url,
            title: nav.title,
            navigation_ms: nav.duration_ms,
            wait_ms: wait.elapsed_ms,
            wait_polls: wait.polls,
            artifact,
            captured_at: Utc::now(),
            total_ms: started.elapsed().as_millis() as u64,
        };

        info!(
            final_url = %report.final_url,
            total_ms = report.total_ms,
            "Probe complete"
        );

        Ok(report)
    }
}
