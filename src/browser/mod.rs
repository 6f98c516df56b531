//! Browser automation module
//!
//! This module provides high-level browser control through ChromiumOxide:
//! lifecycle management, navigation, the visibility wait, the settle delay,
//! and artifact capture.

pub mod capture;
pub mod controller;
pub mod navigation;
pub mod settle;
pub mod wait;

pub use capture::{ArtifactCapturer, ArtifactFormat, ArtifactInfo, CaptureOptions, CaptureResult};
pub use controller::{BrowserConfig, BrowserController, PageHandle};
pub use navigation::{NavigationOptions, NavigationResult, Navigator, WaitUntil};
pub use settle::{Settle, SettleMode, SettleOptions};
pub use wait::{ConditionWaiter, WaitOptions, WaitOutcome};
