//! Scenario runner
//!
//! Owns one browser session for the whole run: scenarios execute
//! sequentially against a shared dashboard page, the group panel is cleared
//! after every attempt, failures get a full-page screenshot, and failed
//! scenarios are retried once at the run level (components themselves never
//! retry).

use std::path::PathBuf;
use std::time::Instant;

use chromiumoxide::page::ScreenshotParams;
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::config::SuiteConfig;
use crate::error::{SuiteError, SuiteResult};
use crate::pages::DashboardPage;
use crate::session::Session;
use crate::strings::replace_spaces;

/// Everything a scenario needs, owned so scenario futures are `'static`.
#[derive(Clone)]
pub struct ScenarioCtx {
    pub dashboard: DashboardPage,
    pub download_dir: PathBuf,
    pub config: SuiteConfig,
}

pub type ScenarioFn = fn(ScenarioCtx) -> BoxFuture<'static, SuiteResult<()>>;

/// A named test scenario.
pub struct Scenario {
    pub name: &'static str,
    pub tags: &'static [&'static str],
    pub run: ScenarioFn,
}

impl Scenario {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(&tag)
    }
}

/// Result of one scenario, after retries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub passed: bool,
    pub attempts: usize,
    pub duration_ms: u64,
    pub error: Option<String>,
    pub screenshot: Option<String>,
}

/// Result of a whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub finished_at: DateTime<Utc>,
    pub results: Vec<ScenarioResult>,
}

pub struct SuiteRunner {
    config: SuiteConfig,
}

impl SuiteRunner {
    pub fn new(config: SuiteConfig) -> Self {
        Self { config }
    }

    /// Launch a session, run every scenario, and close the browser.
    pub async fn run(&self, scenarios: &[Scenario]) -> SuiteResult<SuiteSummary> {
        let start = Instant::now();
        let session = Session::launch(self.config.clone()).await?;
        let dashboard = session.open_dashboard().await?;

        info!("Running {} scenario(s)...", scenarios.len());
        let mut results = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            let result = self.run_scenario(scenario, &session, &dashboard).await;
            if result.passed {
                info!("✓ {} ({} ms)", result.name, result.duration_ms);
            } else {
                error!(
                    "✗ {} - {}",
                    result.name,
                    result.error.as_deref().unwrap_or("unknown error")
                );
            }
            results.push(result);
        }
        session.close().await?;

        let passed = results.iter().filter(|r| r.passed).count();
        let failed = results.len() - passed;
        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            "Results: {} passed, {} failed ({} ms)",
            passed, failed, duration_ms
        );

        Ok(SuiteSummary {
            total: results.len(),
            passed,
            failed,
            duration_ms,
            finished_at: Utc::now(),
            results,
        })
    }

    async fn run_scenario(
        &self,
        scenario: &Scenario,
        session: &Session,
        dashboard: &DashboardPage,
    ) -> ScenarioResult {
        let start = Instant::now();
        let mut last_error = None;

        for attempt in 0..=self.config.retries {
            let ctx = ScenarioCtx {
                dashboard: dashboard.clone(),
                download_dir: session.download_dir().to_path_buf(),
                config: self.config.clone(),
            };
            let outcome = (scenario.run)(ctx).await;

            // The group panel survives across scenarios on the shared page
            if let Err(err) = dashboard.clear_group_panel().await {
                warn!(error = %err, "Group panel teardown failed");
            }

            match outcome {
                Ok(()) => {
                    return ScenarioResult {
                        name: scenario.name.to_string(),
                        passed: true,
                        attempts: attempt + 1,
                        duration_ms: start.elapsed().as_millis() as u64,
                        error: None,
                        screenshot: None,
                    };
                }
                Err(err) => {
                    warn!(
                        "Attempt {} of '{}' failed: {}",
                        attempt + 1,
                        scenario.name,
                        err
                    );
                    last_error = Some(err.to_string());
                }
            }
        }

        let screenshot = self.capture_failure(dashboard, scenario.name).await;
        ScenarioResult {
            name: scenario.name.to_string(),
            passed: false,
            attempts: self.config.retries + 1,
            duration_ms: start.elapsed().as_millis() as u64,
            error: last_error,
            screenshot,
        }
    }

    async fn capture_failure(&self, dashboard: &DashboardPage, name: &str) -> Option<String> {
        let dir = self.config.screenshot_dir();
        if let Err(err) = std::fs::create_dir_all(&dir) {
            warn!(error = %err, "Could not create screenshot directory");
            return None;
        }
        let path = dir.join(format!("{}.png", replace_spaces(name, "-")));
        let params = ScreenshotParams::builder().full_page(true).build();
        match dashboard
            .base()
            .page()
            .save_screenshot(params, &path)
            .await
        {
            Ok(_) => Some(path.to_string_lossy().to_string()),
            Err(err) => {
                warn!(error = %err, "Failed to capture failure screenshot");
                None
            }
        }
    }

    /// Write the run summary as JSON into the output directory.
    pub fn write_summary(&self, summary: &SuiteSummary) -> SuiteResult<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;
        let path = self.config.output_dir.join("suite-results.json");
        let json = serde_json::to_string_pretty(summary)?;
        std::fs::write(&path, json)?;
        info!("Results written to: {}", path.display());
        Ok(path)
    }
}

/// Fail the scenario with `message` unless `condition` holds.
pub fn ensure(condition: bool, message: impl Into<String>) -> SuiteResult<()> {
    if condition {
        Ok(())
    } else {
        Err(SuiteError::Assertion(message.into()))
    }
}

/// Fail the scenario unless `actual == expected`.
pub fn ensure_eq<T>(actual: T, expected: T, what: &str) -> SuiteResult<()>
where
    T: PartialEq + std::fmt::Debug,
{
    if actual == expected {
        Ok(())
    } else {
        Err(SuiteError::Assertion(format!(
            "{what}: expected {expected:?}, actual {actual:?}"
        )))
    }
}
