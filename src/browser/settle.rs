//! Post-wait settle delay
//!
//! After the element is visible, rendering may still be in flight
//! (animations, async layout). The settle step bounds that tail. Two modes:
//!
//! - [`SettleMode::Fixed`]: sleep for the full duration. Simple and
//!   predictable, at the cost of always paying the worst case.
//! - [`SettleMode::FrameIdle`]: resolve once a run of consecutive animation
//!   frames has elapsed, using the duration only as an upper bound. Never
//!   waits longer than `Fixed` would.

use crate::browser::PageHandle;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// How the settle delay is performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SettleMode {
    /// Sleep for the full settle duration
    #[default]
    Fixed,
    /// Wait for consecutive quiet animation frames, bounded by the duration
    FrameIdle,
}

/// Options for the settle step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettleOptions {
    /// Settle mode (default: fixed sleep)
    #[serde(default)]
    pub mode: SettleMode,
    /// Settle duration in milliseconds (default: 1000)
    #[serde(default = "default_settle_ms")]
    pub duration_ms: u64,
    /// Consecutive animation frames that count as idle (default: 3)
    #[serde(default = "default_quiet_frames")]
    pub quiet_frames: u32,
}

fn default_settle_ms() -> u64 {
    1000
}

fn default_quiet_frames() -> u32 {
    3
}

impl Default for SettleOptions {
    fn default() -> Self {
        Self {
            mode: SettleMode::Fixed,
            duration_ms: default_settle_ms(),
            quiet_frames: default_quiet_frames(),
        }
    }
}

/// Performs the bounded settle pause
pub struct Settle;

impl Settle {
    /// Run the settle step against a page
    #[instrument(skip(page), fields(mode = ?opts.mode, duration_ms = opts.duration_ms))]
    pub async fn run(page: &PageHandle, opts: &SettleOptions) -> Result<()> {
        match opts.mode {
            SettleMode::Fixed => {
                Self::fixed(Duration::from_millis(opts.duration_ms)).await;
                Ok(())
            }
            SettleMode::FrameIdle => Self::frame_idle(page, opts).await,
        }
    }

    /// Sleep for exactly `duration`; no early wake, no cancellation.
    pub async fn fixed(duration: Duration) {
        debug!(?duration, "Fixed settle");
        tokio::time::sleep(duration).await;
    }

    /// Wait for `quiet_frames` consecutive animation frames, bounded by the
    /// settle duration. If the frame signal cannot be evaluated, fall back
    /// to the fixed sleep for the full duration.
    async fn frame_idle(page: &PageHandle, opts: &SettleOptions) -> Result<()> {
        let bound = Duration::from_millis(opts.duration_ms);
        let script = frame_idle_script(opts.quiet_frames);

        match tokio::time::timeout(bound, page.page.evaluate(script.as_str())).await {
            Ok(Ok(_)) => {
                debug!(quiet_frames = opts.quiet_frames, "Render idle");
                Ok(())
            }
            Ok(Err(e)) => {
                warn!("Frame idle signal unavailable ({}), using fixed settle", e);
                Self::fixed(bound).await;
                Ok(())
            }
            Err(_) => {
                debug!("Settle bound reached before render idle");
                Ok(())
            }
        }
    }
}

/// Build the promise that resolves after `frames` animation frames
fn frame_idle_script(frames: u32) -> String {
    format!(
        r#"
            new Promise(resolve => {{
                let remaining = {frames};
                function tick() {{
                    remaining -= 1;
                    if (remaining <= 0) {{
                        resolve(true);
                    }} else {{
                        requestAnimationFrame(tick);
                    }}
                }}
                requestAnimationFrame(tick);
            }})
        "#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settle_options_default() {
        let opts = SettleOptions::default();
        assert_eq!(opts.mode, SettleMode::Fixed);
        assert_eq!(opts.duration_ms, 1000);
        assert_eq!(opts.quiet_frames, 3);
    }

    #[test]
    fn test_settle_mode_serialization() {
        assert_eq!(
            serde_json::to_string(&SettleMode::Fixed).unwrap(),
            "\"fixed\""
        );
        assert_eq!(
            serde_json::to_string(&SettleMode::FrameIdle).unwrap(),
            "\"frame_idle\""
        );
    }

    #[test]
    fn test_frame_idle_script_counts_frames() {
        let script = frame_idle_script(3);
        assert!(script.contains("let remaining = 3"));
        assert!(script.contains("requestAnimationFrame"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_settle_sleeps_full_duration() {
        let start = tokio::time::Instant::now();
        Settle::fixed(Duration::from_millis(1000)).await;
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }
}
