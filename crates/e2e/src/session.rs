//! Browser session management
//!
//! Owns the Chromium process, the CDP handler loop, and the run's download
//! directory. One session serves a whole suite run; scenarios share a single
//! page the way a manual tester would keep one tab open.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::browser::{
    SetDownloadBehaviorBehavior, SetDownloadBehaviorParams,
};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::SuiteConfig;
use crate::error::{SuiteError, SuiteResult};
use crate::pages::DashboardPage;

/// A running browser bound to one suite run.
pub struct Session {
    browser: Browser,
    handler_task: JoinHandle<()>,
    download_dir: PathBuf,
    config: SuiteConfig,
}

impl Session {
    /// Launch Chromium and allow downloads into the run's directory.
    pub async fn launch(config: SuiteConfig) -> SuiteResult<Self> {
        let download_dir = config.download_dir();
        std::fs::create_dir_all(&download_dir)?;

        let mut builder = BrowserConfig::builder()
            .window_size(config.viewport.width, config.viewport.height)
            .arg("--disable-gpu")
            .arg("--no-sandbox");
        if !config.headless {
            builder = builder.with_head();
        }
        if let Some(chrome) = &config.chrome_binary {
            builder = builder.chrome_executable(chrome.clone());
        }
        let browser_config = builder.build().map_err(SuiteError::BrowserLaunch)?;

        info!(headless = config.headless, "Launching browser");
        let (browser, mut handler) = Browser::launch(browser_config).await?;
        let handler_task = tokio::spawn(async move { while handler.next().await.is_some() {} });

        let session = Self {
            browser,
            handler_task,
            download_dir,
            config,
        };
        session.allow_downloads().await?;
        Ok(session)
    }

    async fn allow_downloads(&self) -> SuiteResult<()> {
        let params = SetDownloadBehaviorParams::builder()
            .behavior(SetDownloadBehaviorBehavior::Allow)
            .download_path(self.download_dir.to_string_lossy().to_string())
            .events_enabled(true)
            .build()
            .map_err(SuiteError::Command)?;
        self.browser.execute(params).await?;
        debug!(dir = %self.download_dir.display(), "Downloads enabled");
        Ok(())
    }

    /// Poll the dashboard URL over HTTP until it responds, so the browser
    /// never navigates into a connection error while the app is starting.
    pub async fn wait_until_reachable(&self) -> SuiteResult<()> {
        let url = self.config.dashboard_url();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()?;

        let deadline = std::time::Instant::now() + self.config.startup_timeout();
        let mut attempts = 0;
        loop {
            attempts += 1;
            match client.get(&url).send().await {
                Ok(resp) if resp.status().is_success() => return Ok(()),
                Ok(resp) => debug!(status = %resp.status(), "Readiness check rejected"),
                Err(err) => {
                    if attempts == 1 {
                        info!("Waiting for the dashboard at {}...", url);
                    }
                    // Connection refused is expected while the app starts
                    if !err.is_connect() {
                        debug!(error = %err, "Readiness check errored");
                    }
                }
            }
            if std::time::Instant::now() >= deadline {
                return Err(SuiteError::AppUnreachable { url, attempts });
            }
            tokio::time::sleep(self.config.poll_interval()).await;
        }
    }

    /// Open a fresh page on the dashboard and wrap it in its page object.
    pub async fn open_dashboard(&self) -> SuiteResult<DashboardPage> {
        self.wait_until_reachable().await?;
        let url = self.config.dashboard_url();
        info!("Opening {}", url);
        let page = self.browser.new_page(url).await?;
        page.wait_for_navigation().await?;
        Ok(DashboardPage::new(page, self.config.clone()))
    }

    /// Where this session's downloads land.
    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Shut the browser down and stop the handler loop.
    pub async fn close(mut self) -> SuiteResult<()> {
        self.browser.close().await?;
        let _ = self.browser.wait().await;
        self.handler_task.abort();
        Ok(())
    }
}
