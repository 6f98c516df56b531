//! Probe target resolution
//!
//! A target is either a URL or a local file path. Local paths (including
//! `file://` URLs) are resolved to absolute `file://` URLs and checked for
//! readability before any browser work happens, so a bad target fails fast.

use crate::error::NavigationError;
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Maximum accepted target length in characters
const MAX_TARGET_LEN: usize = 2048;

/// A resource the probe should load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A remote document reachable over http(s)
    Url(Url),
    /// A document on the local filesystem
    LocalFile(PathBuf),
}

impl Target {
    /// Parse a caller-supplied target string.
    ///
    /// `http://` and `https://` targets become [`Target::Url`]; `file://`
    /// URLs and bare paths become [`Target::LocalFile`]. Other URL schemes
    /// are rejected.
    pub fn parse(input: &str) -> Result<Self, NavigationError> {
        if input.is_empty() {
            return Err(NavigationError::InvalidTarget(
                "target cannot be empty".to_string(),
            ));
        }

        if input.len() > MAX_TARGET_LEN {
            return Err(NavigationError::InvalidTarget(format!(
                "target exceeds maximum length of {} characters",
                MAX_TARGET_LEN
            )));
        }

        if input.starts_with("http://") || input.starts_with("https://") {
            let url = Url::parse(input)
                .map_err(|e| NavigationError::InvalidTarget(format!("{}: {}", input, e)))?;
            return Ok(Target::Url(url));
        }

        if input.starts_with("file://") {
            let url = Url::parse(input)
                .map_err(|e| NavigationError::InvalidTarget(format!("{}: {}", input, e)))?;
            let path = url.to_file_path().map_err(|_| {
                NavigationError::InvalidTarget(format!("not a usable file URL: {}", input))
            })?;
            return Ok(Target::LocalFile(path));
        }

        // Anything else with a scheme-like prefix is an unsupported scheme,
        // not a relative path.
        if let Some(scheme_end) = input.find("://") {
            return Err(NavigationError::InvalidTarget(format!(
                "unsupported scheme {:?}: target must be http(s), file, or a local path",
                &input[..scheme_end]
            )));
        }

        Ok(Target::LocalFile(PathBuf::from(input)))
    }

    /// Resolve the target to a navigable URL.
    ///
    /// Local files are canonicalized, which verifies the file exists and is
    /// reachable. A missing or unreadable file fails with
    /// [`NavigationError::TargetUnreadable`] here, before a session ever
    /// loads anything.
    pub fn resolve(&self) -> Result<Url, NavigationError> {
        match self {
            Target::Url(url) => Ok(url.clone()),
            Target::LocalFile(path) => {
                let abs = path.canonicalize().map_err(|e| {
                    NavigationError::TargetUnreadable(format!("{}: {}", path.display(), e))
                })?;
                if !abs.is_file() {
                    return Err(NavigationError::TargetUnreadable(format!(
                        "{}: not a regular file",
                        abs.display()
                    )));
                }
                Url::from_file_path(&abs).map_err(|_| {
                    NavigationError::InvalidTarget(format!(
                        "cannot express {} as a file URL",
                        abs.display()
                    ))
                })
            }
        }
    }

    /// Whether this target lives on the local filesystem
    pub fn is_local(&self) -> bool {
        matches!(self, Target::LocalFile(_))
    }

    /// The local path, if this is a filesystem target
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Target::LocalFile(path) => Some(path.as_path()),
            Target::Url(_) => None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Url(url) => write!(f, "{}", url),
            Target::LocalFile(path) => write!(f, "{}", path.display()),
        }
    }
}
