//! Page navigation functionality
//!
//! This module drives a session to a resolved target URL with timeout
//! handling and an optional retry knob (off by default: a probe is a
//! single attempt).

use crate::browser::PageHandle;
use crate::error::{Error, NavigationError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Options for page navigation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationOptions {
    /// Timeout in milliseconds (default: 30000)
    #[serde(default = "default_nav_timeout_ms")]
    pub timeout_ms: u64,
    /// Readiness condition (default: load event)
    #[serde(default)]
    pub wait_until: WaitUntil,
    /// Number of retry attempts (default: 0, single attempt)
    #[serde(default)]
    pub retries: u32,
    /// Delay between retries in ms (default: 1000)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_nav_timeout_ms() -> u64 {
    30000
}

fn default_retry_delay_ms() -> u64 {
    1000
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            timeout_ms: default_nav_timeout_ms(),
            wait_until: WaitUntil::Load,
            retries: 0,
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// Condition to wait for after navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WaitUntil {
    /// Wait until the load event fires
    #[default]
    Load,
    /// Wait until the DOMContentLoaded event fires
    DomContentLoaded,
}

/// Result of a navigation operation
#[derive(Debug)]
pub struct NavigationResult {
    /// Final URL after any redirects
    pub final_url: String,
    /// Page title
    pub title: Option<String>,
    /// Navigation duration in milliseconds
    pub duration_ms: u64,
}

/// Page navigator
pub struct Navigator;

impl Navigator {
    /// Navigate the session to a resolved URL.
    ///
    /// The URL has already been through [`crate::target::Target::resolve`],
    /// so scheme and readability checks are behind us; failures here are
    /// load failures or timeouts.
    #[instrument(skip(page, url), fields(url = %url))]
    pub async fn goto(
        page: &PageHandle,
        url: &Url,
        options: Option<NavigationOptions>,
    ) -> Result<NavigationResult> {
        let opts = options.unwrap_or_default();
        let start = std::time::Instant::now();

        info!("Navigating to: {}", url);

        let mut last_error = None;
        for attempt in 0..=opts.retries {
            if attempt > 0 {
                warn!("Navigation retry attempt {} of {}", attempt, opts.retries);
                tokio::time::sleep(Duration::from_millis(opts.retry_delay_ms)).await;
            }

            match Self::navigate_once(&page.page, url, &opts).await {
                Ok(mut result) => {
                    page.set_url(result.final_url.clone()).await;
                    result.duration_ms = start.elapsed().as_millis() as u64;
                    return Ok(result);
                }
                Err(e) => {
                    warn!("Navigation attempt {} failed: {}", attempt + 1, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            NavigationError::LoadFailed("navigation failed with no attempts made".to_string())
                .into()
        }))
    }

    /// Perform a single navigation attempt
    async fn navigate_once(
        page: &chromiumoxide::Page,
        url: &Url,
        opts: &NavigationOptions,
    ) -> Result<NavigationResult> {
        let timeout = Duration::from_millis(opts.timeout_ms);

        let nav_future = page.goto(url.as_str());
        tokio::time::timeout(timeout, nav_future)
            .await
            .map_err(|_| NavigationError::Timeout(opts.timeout_ms))?
            .map_err(|e| NavigationError::LoadFailed(e.to_string()))?;

        Self::wait_for_ready(page, opts).await?;

        let final_url = page
            .url()
            .await
            .map_err(|e| Error::cdp(e.to_string()))?
            .unwrap_or_else(|| url.to_string());

        let title = page
            .evaluate("document.title")
            .await
            .ok()
            .and_then(|v| v.into_value::<String>().ok());

        debug!("Navigation complete: {} -> {}", url, final_url);

        Ok(NavigationResult {
            final_url,
            title,
            duration_ms: 0, // Will be set by caller
        })
    }

    /// Wait for page readiness based on the wait_until condition
    async fn wait_for_ready(page: &chromiumoxide::Page, opts: &NavigationOptions) -> Result<()> {
        let script = match opts.wait_until {
            WaitUntil::Load => {
                r#"
                    new Promise(resolve => {
                        if (document.readyState === 'complete') {
                            resolve(true);
                        } else {
                            window.addEventListener('load', () => resolve(true));
                        }
                    })
                "#
            }
            WaitUntil::DomContentLoaded => {
                r#"
                    new Promise(resolve => {
                        if (document.readyState !== 'loading') {
                            resolve(true);
                        } else {
                            document.addEventListener('DOMContentLoaded', () => resolve(true));
                        }
                    })
                "#
            }
        };

        let timeout = Duration::from_millis(opts.timeout_ms);
        tokio::time::timeout(timeout, page.evaluate(script))
            .await
            .map_err(|_| NavigationError::Timeout(opts.timeout_ms))?
            .map_err(|e| Error::cdp(e.to_string()))?;

        Ok(())
    }
}
