//! visprobe - Headless Browser Visual Verification Probe
//!
//! This crate runs visibility probes: it navigates a headless browser to a
//! target document, waits for a named element to satisfy a visibility
//! predicate within a timeout, lets rendering settle, and captures a
//! screenshot artifact to a path.
//!
//! # Flow
//!
//! ```text
//! Target ──▶ Navigator ──▶ Condition Waiter ──▶ Settle ──▶ Capturer
//!               │               │                             │
//!               ▼               ▼                             ▼
//!          page loaded    element visible               artifact file
//! ```
//!
//! Each probe owns its browser session exclusively: the session is acquired
//! at flow start and closed on every exit path, including failures.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use visprobe::{Probe, ProbeSpec};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let spec = ProbeSpec::new("index.html", "#layout", "verification.png");
//!     let report = Probe::run(&spec).await?;
//!
//!     println!("captured {} bytes", report.artifact.bytes);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod browser;
pub mod error;
pub mod probe;
pub mod target;

// Re-exports for convenience
pub use browser::{BrowserConfig, BrowserController};
pub use error::{Error, Result};
pub use probe::{Probe, ProbeReport, ProbeSpec};
pub use target::Target;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
