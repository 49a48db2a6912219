//! Error types for the E2E suite

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for suite operations
pub type SuiteResult<T> = std::result::Result<T, SuiteError>;

/// Suite error types.
///
/// Absence is never an error: locators and scanners report "not found" as
/// `Option::None` and callers decide what that means. The variants here are
/// for operations that genuinely failed.
#[derive(Error, Debug)]
pub enum SuiteError {
    #[error("Browser launch failed: {0}")]
    BrowserLaunch(String),

    #[error("Browser protocol error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    #[error("Browser command rejected: {0}")]
    Command(String),

    #[error("Dashboard unreachable at {url} after {attempts} attempts")]
    AppUnreachable { url: String, attempts: usize },

    #[error("Timed out after {waited_ms} ms waiting for {what}")]
    WaitTimeout { what: String, waited_ms: u64 },

    #[error("No completed download within {waited_ms} ms in {}", dir.display())]
    DownloadTimeout { dir: PathBuf, waited_ms: u64 },

    #[error("Download failure detected: {0}")]
    DownloadFailed(String),

    #[error("Assertion failed: {0}")]
    Assertion(String),

    #[error("Workbook error: {0}")]
    Workbook(#[from] griddash_workbook::WorkbookError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
