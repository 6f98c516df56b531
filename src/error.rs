//! Error types for visprobe
//!
//! This module provides the error type hierarchy using `thiserror`,
//! covering every phase of a probe: browser lifecycle, navigation,
//! the visibility wait, and artifact capture.

use thiserror::Error;

/// The main error type for probe operations
#[derive(Error, Debug)]
pub enum Error {
    /// Browser lifecycle errors
    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    /// Navigation errors
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// Visibility wait errors
    #[error("Wait error: {0}")]
    Wait(#[from] WaitError),

    /// Capture errors (screenshot + persistence)
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    /// Probe specification errors
    #[error("Invalid probe spec: {0}")]
    Spec(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// ChromiumOxide errors
    #[error("CDP error: {0}")]
    Cdp(String),
}

/// Browser lifecycle and control errors
#[derive(Error, Debug)]
pub enum BrowserError {
    /// Failed to launch browser
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Browser configuration error
    #[error("Invalid browser configuration: {0}")]
    ConfigError(String),

    /// Failed to create new page/tab
    #[error("Failed to create page: {0}")]
    PageCreationFailed(String),

    /// Failed to close the browser cleanly
    #[error("Failed to close browser: {0}")]
    CloseFailed(String),
}

/// Navigation errors
#[derive(Error, Debug)]
pub enum NavigationError {
    /// Target cannot be interpreted as a URL or local path
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// Local target file is missing or unreadable
    #[error("Target not readable: {0}")]
    TargetUnreadable(String),

    /// Navigation timeout
    #[error("Navigation timed out after {0}ms")]
    Timeout(u64),

    /// Page load failed
    #[error("Page load failed: {0}")]
    LoadFailed(String),
}

/// Visibility wait errors
#[derive(Error, Debug)]
pub enum WaitError {
    /// Element did not become visible within the timeout
    #[error("Element {selector:?} not visible after {timeout_ms}ms")]
    Timeout {
        /// Selector that was being waited on
        selector: String,
        /// Configured timeout in milliseconds
        timeout_ms: u64,
    },

    /// The visibility predicate could not be evaluated
    #[error("Visibility check failed: {0}")]
    Evaluation(String),
}

/// Capture errors (screenshot and artifact persistence)
#[derive(Error, Debug)]
pub enum CaptureError {
    /// Screenshot failed
    #[error("Screenshot capture failed: {0}")]
    ScreenshotFailed(String),

    /// Element to clip to was not found
    #[error("Clip element not found: {0}")]
    ClipElementNotFound(String),

    /// Artifact could not be written
    #[error("Failed to write artifact to {path}: {source}")]
    Io {
        /// Output path the write was attempted against
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Result type alias for probe operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a CDP error from a string
    pub fn cdp<S: Into<String>>(msg: S) -> Self {
        Error::Cdp(msg.into())
    }

    /// Create a probe-spec validation error from a string
    pub fn spec<S: Into<String>>(msg: S) -> Self {
        Error::Spec(msg.into())
    }
}

/// Convert chromiumoxide errors
impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Browser(BrowserError::LaunchFailed("no chrome".to_string()));
        assert!(err.to_string().contains("Failed to launch browser"));
        assert!(err.to_string().contains("no chrome"));
    }

    #[test]
    fn test_navigation_error() {
        let err = NavigationError::TargetUnreadable("/missing/index.html".to_string());
        assert!(err.to_string().contains("Target not readable"));
        assert!(err.to_string().contains("/missing/index.html"));
    }

    #[test]
    fn test_wait_timeout_error() {
        let err = WaitError::Timeout {
            selector: "#layout".to_string(),
            timeout_ms: 10000,
        };
        assert!(err.to_string().contains("#layout"));
        assert!(err.to_string().contains("10000ms"));
    }

    #[test]
    fn test_capture_io_error() {
        let err = CaptureError::Io {
            path: "/no/such/dir/shot.png".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("/no/such/dir/shot.png"));
    }

    #[test]
    fn test_spec_error() {
        let err = Error::spec("selector cannot be empty");
        assert_eq!(
            err.to_string(),
            "Invalid probe spec: selector cannot be empty"
        );
    }
}
