//! visprobe CLI
//!
//! Runs one visibility probe: navigate, wait for the element, settle,
//! screenshot. Exits 0 on success, non-zero on any failure.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use visprobe::browser::{
    ArtifactFormat, BrowserConfig, CaptureOptions, NavigationOptions, SettleMode, SettleOptions,
    WaitOptions,
};
use visprobe::{Probe, ProbeSpec};

/// Headless-browser visual verification probe
#[derive(Parser, Debug)]
#[command(name = "visprobe")]
#[command(version)]
#[command(about = "Navigate, wait for an element to be visible, settle, screenshot")]
struct Args {
    /// Target document: URL or local file path
    target: String,

    /// CSS selector that must become visible
    #[arg(short, long, default_value = "#layout")]
    selector: String,

    /// Visibility timeout in milliseconds
    #[arg(long, default_value = "10000")]
    timeout_ms: u64,

    /// Visibility polling interval in milliseconds
    #[arg(long, default_value = "100")]
    poll_ms: u64,

    /// Settle duration in milliseconds
    #[arg(long, default_value = "1000")]
    settle_ms: u64,

    /// Settle on render idle (consecutive quiet frames) instead of a fixed sleep
    #[arg(long)]
    settle_frames: bool,

    /// Navigation timeout in milliseconds
    #[arg(long, default_value = "30000")]
    nav_timeout_ms: u64,

    /// Output path for the screenshot artifact
    #[arg(short, long, default_value = "verification.png")]
    output: PathBuf,

    /// Artifact format: png, jpeg, or webp
    #[arg(long, default_value = "png", value_parser = parse_format)]
    format: ArtifactFormat,

    /// Quality for lossy formats (0-100)
    #[arg(long, default_value = "85")]
    quality: u8,

    /// Capture the full page instead of the viewport
    #[arg(long)]
    full_page: bool,

    /// Clip the capture to this CSS selector
    #[arg(long)]
    clip: Option<String>,

    /// Run the browser with a visible window
    #[arg(long)]
    no_headless: bool,

    /// Disable the Chrome sandbox
    #[arg(long)]
    no_sandbox: bool,

    /// Path to Chrome/Chromium executable
    #[arg(long)]
    chrome_path: Option<String>,

    /// Viewport width
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Viewport height
    #[arg(long, default_value = "720")]
    height: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the probe report as JSON
    #[arg(long)]
    json: bool,
}

fn parse_format(s: &str) -> Result<ArtifactFormat, String> {
    match s.to_ascii_lowercase().as_str() {
        "png" => Ok(ArtifactFormat::Png),
        "jpeg" | "jpg" => Ok(ArtifactFormat::Jpeg),
        "webp" => Ok(ArtifactFormat::Webp),
        other => Err(format!("unknown format {:?} (png, jpeg, webp)", other)),
    }
}

impl Args {
    fn probe_spec(&self) -> ProbeSpec {
        ProbeSpec {
            target: self.target.clone(),
            selector: self.selector.clone(),
            output_path: self.output.clone(),
            navigation: NavigationOptions {
                timeout_ms: self.nav_timeout_ms,
                ..Default::default()
            },
            wait: WaitOptions {
                timeout_ms: self.timeout_ms,
                poll_interval_ms: self.poll_ms,
            },
            settle: SettleOptions {
                mode: if self.settle_frames {
                    SettleMode::FrameIdle
                } else {
                    SettleMode::Fixed
                },
                duration_ms: self.settle_ms,
                ..Default::default()
            },
            capture: CaptureOptions {
                format: self.format,
                quality: self.quality,
                full_page: self.full_page,
                clip_selector: self.clip.clone(),
            },
        }
    }

    fn browser_config(&self) -> BrowserConfig {
        let mut builder = BrowserConfig::builder()
            .headless(!self.no_headless)
            .viewport(self.width, self.height)
            .sandbox(!self.no_sandbox);

        if let Some(ref path) = self.chrome_path {
            builder = builder.chrome_path(path);
        }

        builder.build()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let spec = args.probe_spec();
    let config = args.browser_config();

    let report = Probe::run_with_config(&spec, config)
        .await
        .with_context(|| format!("probe failed for target {:?}", args.target))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "ok: {} visible on {} after {}ms, artifact {} ({} bytes)",
            spec.selector,
            report.final_url,
            report.wait_ms,
            report.artifact.path.display(),
            report.artifact.bytes,
        );
    }

    Ok(())
}
