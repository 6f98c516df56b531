//! Artifact capture
//!
//! This module takes the screenshot and persists it. The screenshot is the
//! probe's artifact: written once to the output path (create or overwrite),
//! never mutated afterwards.

use crate::browser::PageHandle;
use crate::error::{CaptureError, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Image format for captured artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    /// PNG screenshot
    #[default]
    Png,
    /// JPEG screenshot
    Jpeg,
    /// WebP screenshot
    Webp,
}

impl ArtifactFormat {
    /// Get appropriate MIME type
    pub fn mime_type(&self) -> &'static str {
        match self {
            ArtifactFormat::Png => "image/png",
            ArtifactFormat::Jpeg => "image/jpeg",
            ArtifactFormat::Webp => "image/webp",
        }
    }

    /// Get file extension
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactFormat::Png => "png",
            ArtifactFormat::Jpeg => "jpg",
            ArtifactFormat::Webp => "webp",
        }
    }

    fn to_cdp(self) -> CaptureScreenshotFormat {
        match self {
            ArtifactFormat::Png => CaptureScreenshotFormat::Png,
            ArtifactFormat::Jpeg => CaptureScreenshotFormat::Jpeg,
            ArtifactFormat::Webp => CaptureScreenshotFormat::Webp,
        }
    }
}

/// Options for capture operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureOptions {
    /// Artifact format
    #[serde(default)]
    pub format: ArtifactFormat,
    /// JPEG/WebP quality (0-100)
    #[serde(default = "default_quality")]
    pub quality: u8,
    /// Capture full page (not just viewport)
    #[serde(default)]
    pub full_page: bool,
    /// CSS selector to clip the capture to
    pub clip_selector: Option<String>,
}

fn default_quality() -> u8 {
    85
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            format: ArtifactFormat::Png,
            quality: 85,
            full_page: false,
            clip_selector: None,
        }
    }
}

impl CaptureOptions {
    /// Create options for a PNG screenshot
    pub fn png() -> Self {
        Self {
            format: ArtifactFormat::Png,
            ..Default::default()
        }
    }

    /// Create options for a JPEG screenshot
    pub fn jpeg(quality: u8) -> Self {
        Self {
            format: ArtifactFormat::Jpeg,
            quality,
            ..Default::default()
        }
    }
}

/// Description of a persisted artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactInfo {
    /// Path the artifact was written to
    pub path: PathBuf,
    /// Artifact format
    pub format: ArtifactFormat,
    /// Size in bytes
    pub bytes: usize,
}

/// Raw capture data before persistence
#[derive(Debug, Clone)]
pub struct CaptureResult {
    /// The captured image bytes
    pub data: Vec<u8>,
    /// The format of the capture
    pub format: ArtifactFormat,
}

impl CaptureResult {
    /// Get data as base64
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.data)
    }
}

/// Captures and persists probe artifacts
pub struct ArtifactCapturer;

impl ArtifactCapturer {
    /// Capture a screenshot and write it to `output_path`.
    ///
    /// The file is created or overwritten. A write failure is reported as
    /// [`CaptureError::Io`], never swallowed.
    #[instrument(skip(page))]
    pub async fn capture(
        page: &PageHandle,
        options: &CaptureOptions,
        output_path: &Path,
    ) -> Result<ArtifactInfo> {
        let result = Self::screenshot(page, options).await?;
        let bytes = result.data.len();

        tokio::fs::write(output_path, &result.data)
            .await
            .map_err(|e| CaptureError::Io {
                path: output_path.display().to_string(),
                source: e,
            })?;

        info!(path = %output_path.display(), bytes, "Artifact written");

        Ok(ArtifactInfo {
            path: output_path.to_path_buf(),
            format: result.format,
            bytes,
        })
    }

    /// Take a screenshot without persisting it
    #[instrument(skip(page))]
    pub async fn screenshot(page: &PageHandle, options: &CaptureOptions) -> Result<CaptureResult> {
        if let Some(ref selector) = options.clip_selector {
            return Self::element_screenshot(page, selector, options.format).await;
        }

        let mut params_builder = ScreenshotParams::builder()
            .format(options.format.to_cdp())
            .from_surface(true)
            .capture_beyond_viewport(options.full_page);

        // Quality only applies to lossy formats
        if matches!(options.format, ArtifactFormat::Jpeg | ArtifactFormat::Webp) {
            params_builder = params_builder.quality(options.quality as i64);
        }

        let data = page
            .page
            .screenshot(params_builder.build())
            .await
            .map_err(|e| CaptureError::ScreenshotFailed(e.to_string()))?;

        debug!("Screenshot captured: {} bytes", data.len());

        Ok(CaptureResult {
            data,
            format: options.format,
        })
    }

    /// Screenshot a single element
    #[instrument(skip(page))]
    async fn element_screenshot(
        page: &PageHandle,
        selector: &str,
        format: ArtifactFormat,
    ) -> Result<CaptureResult> {
        let element = page
            .page
            .find_element(selector)
            .await
            .map_err(|e| CaptureError::ClipElementNotFound(format!("{}: {}", selector, e)))?;

        let data = element
            .screenshot(format.to_cdp())
            .await
            .map_err(|e| CaptureError::ScreenshotFailed(e.to_string()))?;

        debug!("Element screenshot captured: {} bytes", data.len());

        Ok(CaptureResult { data, format })
    }
}
