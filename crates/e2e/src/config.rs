//! Suite configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SuiteResult;
use crate::strings::RUN_TAG;

/// Configuration for a suite run.
///
/// Every wait in the suite has an explicit per-operation bound here; a wait
/// that exceeds its bound fails the calling step, it never hangs silently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Base URL where the dashboard is served
    pub base_url: String,

    /// Path of the dashboard app under the base URL
    pub app_path: String,

    /// Run the browser headless
    pub headless: bool,

    /// Explicit Chromium binary (None = auto-detect)
    pub chrome_binary: Option<PathBuf>,

    /// Browser viewport
    pub viewport: Viewport,

    /// Directory for run reports, screenshots and downloads
    pub output_dir: PathBuf,

    /// Bound for action-level waits (click targets, grid rows)
    pub action_timeout_ms: u64,

    /// Bound for DOM-attachment waits
    pub attach_timeout_ms: u64,

    /// Bound for short visibility probes backing boolean checks
    pub probe_timeout_ms: u64,

    /// Bound for the app readiness check at session start
    pub startup_timeout_ms: u64,

    /// Bound for a triggered download to land on disk
    pub download_timeout_ms: u64,

    /// Poll interval shared by all waits
    pub poll_interval_ms: u64,

    /// Pause between drag gesture phases, so the grid registers the drop
    pub drag_pause_ms: u64,

    /// Page cap for the grid row search
    pub max_grid_pages: usize,

    /// Run-level retries for failed scenarios
    pub retries: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:4200".to_string(),
            app_path: "/".to_string(),
            headless: true,
            chrome_binary: None,
            viewport: Viewport {
                width: 1280,
                height: 720,
            },
            output_dir: PathBuf::from("test-results"),
            action_timeout_ms: 12_000,
            attach_timeout_ms: 30_000,
            probe_timeout_ms: 2_000,
            startup_timeout_ms: 30_000,
            download_timeout_ms: 120_000,
            poll_interval_ms: 100,
            drag_pause_ms: 500,
            max_grid_pages: 64,
            retries: 1,
        }
    }
}

impl SuiteConfig {
    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    pub fn load(path: &Path) -> SuiteResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Full URL of the dashboard app.
    pub fn dashboard_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.app_path.trim_start_matches('/')
        )
    }

    /// Download directory for this run.
    pub fn download_dir(&self) -> PathBuf {
        self.output_dir.join("downloads").join(&*RUN_TAG)
    }

    /// Screenshot directory for this run.
    pub fn screenshot_dir(&self) -> PathBuf {
        self.output_dir.join("screenshots").join(&*RUN_TAG)
    }

    pub fn action_timeout(&self) -> Duration {
        Duration::from_millis(self.action_timeout_ms)
    }

    pub fn attach_timeout(&self) -> Duration {
        Duration::from_millis(self.attach_timeout_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn startup_timeout(&self) -> Duration {
        Duration::from_millis(self.startup_timeout_ms)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_millis(self.download_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn drag_pause(&self) -> Duration {
        Duration::from_millis(self.drag_pause_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_url_joins_base_and_path() {
        let mut config = SuiteConfig::default();
        config.base_url = "http://localhost:4200/".to_string();
        config.app_path = "/GridDash/".to_string();
        assert_eq!(config.dashboard_url(), "http://localhost:4200/GridDash/");
    }

    #[test]
    fn parses_partial_toml_over_defaults() {
        let config: SuiteConfig =
            toml::from_str("base_url = \"http://demo:8080\"\nretries = 0\n").unwrap();
        assert_eq!(config.base_url, "http://demo:8080");
        assert_eq!(config.retries, 0);
        assert!(config.headless);
        assert_eq!(config.download_timeout_ms, 120_000);
    }
}
