//! Element visibility waiting
//!
//! The condition waiter polls the DOM at a fixed interval until a selector
//! resolves to a visible element or the timeout elapses. Visibility means
//! the element is attached, not hidden by `display`/`visibility`/`opacity`,
//! and has a non-zero rendered box.
//!
//! The wait is deterministic: it returns success or [`WaitError::Timeout`],
//! nothing in between. A timeout surfaces after waiting at least the
//! configured duration and less than one polling interval past it.

use crate::browser::PageHandle;
use crate::error::{Result, WaitError};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, instrument, trace};

/// Options for the visibility wait
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitOptions {
    /// Overall timeout in milliseconds (default: 10000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Polling interval in milliseconds (default: 100, must be > 0)
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_timeout_ms() -> u64 {
    10000
}

fn default_poll_interval_ms() -> u64 {
    100
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl WaitOptions {
    /// Validate the options
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.poll_interval_ms == 0 {
            return Err("poll interval must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Outcome of a successful visibility wait
#[derive(Debug, Clone)]
pub struct WaitOutcome {
    /// Time spent waiting, in milliseconds
    pub elapsed_ms: u64,
    /// Number of predicate evaluations performed
    pub polls: u32,
}

/// Waits for elements to satisfy the visibility condition
pub struct ConditionWaiter;

impl ConditionWaiter {
    /// Wait until `selector` resolves to a visible element.
    ///
    /// Evaluates the visibility predicate immediately, then once per poll
    /// interval until it holds or the deadline passes.
    #[instrument(skip(page), fields(timeout_ms = opts.timeout_ms))]
    pub async fn await_visible(
        page: &PageHandle,
        selector: &str,
        opts: &WaitOptions,
    ) -> Result<WaitOutcome> {
        let timeout = Duration::from_millis(opts.timeout_ms);
        let interval = Duration::from_millis(opts.poll_interval_ms);
        let script = visibility_script(selector);
        let start = Instant::now();
        let mut polls: u32 = 0;

        loop {
            polls += 1;
            if Self::check_once(page, &script).await? {
                let elapsed_ms = start.elapsed().as_millis() as u64;
                debug!(selector, elapsed_ms, polls, "Element visible");
                return Ok(WaitOutcome { elapsed_ms, polls });
            }

            if start.elapsed() >= timeout {
                return Err(WaitError::Timeout {
                    selector: selector.to_string(),
                    timeout_ms: opts.timeout_ms,
                }
                .into());
            }

            trace!(selector, polls, "Element not yet visible");
            tokio::time::sleep(interval).await;
        }
    }

    /// Evaluate the visibility predicate once
    async fn check_once(page: &PageHandle, script: &str) -> Result<bool> {
        page.page
            .evaluate(script)
            .await
            .map_err(|e| WaitError::Evaluation(e.to_string()))?
            .into_value::<bool>()
            .map_err(|e| WaitError::Evaluation(e.to_string()).into())
    }
}

/// Build the one-shot visibility predicate for a selector.
///
/// The selector is embedded as a JSON string literal, so quoting inside the
/// selector cannot break out of the script.
pub(crate) fn visibility_script(selector: &str) -> String {
    let quoted = serde_json::to_string(selector).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"
            (() => {{
                const el = document.querySelector({quoted});
                if (!el) return false;
                const style = window.getComputedStyle(el);
                if (style.display === 'none') return false;
                if (style.visibility === 'hidden' || style.visibility === 'collapse') return false;
                if (parseFloat(style.opacity) === 0) return false;
                const rect = el.getBoundingClientRect();
                return rect.width > 0 && rect.height > 0;
            }})()
        "#
    )
}
