//! Download capture
//!
//! Chromium writes downloads into the session's download directory as
//! `<name>.crdownload` and renames them once complete. The watcher snapshots
//! the directory before the triggering click and then polls for a new,
//! fully-written file, so the suite never races a half-written export.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{SuiteError, SuiteResult};

const PARTIAL_EXTENSIONS: &[&str] = &["crdownload", "tmp"];

/// A completed download on disk.
#[derive(Debug, Clone)]
pub struct Download {
    path: PathBuf,
}

impl Download {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name as suggested by the application.
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }
}

/// Watches a download directory for files that appear after arming.
pub struct DownloadWatcher {
    dir: PathBuf,
    baseline: HashSet<PathBuf>,
}

impl DownloadWatcher {
    /// Snapshot `dir` (creating it if needed) so only files appearing later
    /// count as downloads.
    pub fn arm(dir: impl Into<PathBuf>) -> SuiteResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        let baseline = list_files(&dir)?;
        Ok(Self { dir, baseline })
    }

    /// Wait for a new file to finish downloading.
    ///
    /// A file counts as finished once it has no partial-download extension
    /// and its size is unchanged across two polls. A partial file still on
    /// disk at the deadline fails with the file named; otherwise the wait
    /// times out.
    pub async fn wait(self, timeout: Duration, interval: Duration) -> SuiteResult<Download> {
        let deadline = Instant::now() + timeout;
        let mut sizes: HashMap<PathBuf, u64> = HashMap::new();
        loop {
            let mut partial: Option<PathBuf> = None;
            for path in list_files(&self.dir)? {
                if self.baseline.contains(&path) {
                    continue;
                }
                if is_partial(&path) {
                    partial = Some(path);
                    continue;
                }
                let size = std::fs::metadata(&path)?.len();
                if sizes.get(&path) == Some(&size) && size > 0 {
                    debug!(file = %path.display(), size, "Download completed");
                    return Ok(Download { path });
                }
                sizes.insert(path, size);
            }
            if Instant::now() >= deadline {
                return Err(match partial {
                    Some(path) => SuiteError::DownloadFailed(format!(
                        "still partial at deadline: {}",
                        path.display()
                    )),
                    None => SuiteError::DownloadTimeout {
                        dir: self.dir,
                        waited_ms: timeout.as_millis() as u64,
                    },
                });
            }
            tokio::time::sleep(interval).await;
        }
    }
}

/// Arm a watcher, run the triggering action, then wait for its download.
pub async fn expect_download<F, Fut>(
    dir: &Path,
    timeout: Duration,
    interval: Duration,
    trigger: F,
) -> SuiteResult<Download>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = SuiteResult<()>>,
{
    let watcher = DownloadWatcher::arm(dir)?;
    trigger().await?;
    watcher.wait(timeout, interval).await
}

fn list_files(dir: &Path) -> std::io::Result<HashSet<PathBuf>> {
    let mut files = HashSet::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.insert(entry.path());
        }
    }
    Ok(files)
}

fn is_partial(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| PARTIAL_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TICK: Duration = Duration::from_millis(10);

    #[tokio::test]
    async fn detects_a_file_written_after_arming() {
        let dir = TempDir::new().unwrap();
        let watcher = DownloadWatcher::arm(dir.path()).unwrap();
        let target = dir.path().join("Employees (1).xlsx");
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(30)).await;
            std::fs::write(&target, b"PK\x03\x04").unwrap();
        });
        let download = watcher.wait(Duration::from_secs(1), TICK).await.unwrap();
        assert_eq!(download.file_name(), "Employees (1).xlsx");
    }

    #[tokio::test]
    async fn ignores_partials_until_renamed() {
        let dir = TempDir::new().unwrap();
        let watcher = DownloadWatcher::arm(dir.path()).unwrap();
        let partial = dir.path().join("Employees.pdf.crdownload");
        let finished = dir.path().join("Employees.pdf");
        tokio::spawn(async move {
            std::fs::write(&partial, b"%PDF").unwrap();
            tokio::time::sleep(Duration::from_millis(50)).await;
            std::fs::rename(&partial, &finished).unwrap();
        });
        let download = watcher.wait(Duration::from_secs(1), TICK).await.unwrap();
        assert_eq!(download.file_name(), "Employees.pdf");
    }

    #[tokio::test]
    async fn preexisting_files_do_not_count() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("old.xlsx"), b"stale").unwrap();
        let watcher = DownloadWatcher::arm(dir.path()).unwrap();
        let err = watcher
            .wait(Duration::from_millis(80), TICK)
            .await
            .unwrap_err();
        assert!(matches!(err, SuiteError::DownloadTimeout { .. }));
    }

    #[tokio::test]
    async fn partial_at_deadline_reports_the_failure() {
        let dir = TempDir::new().unwrap();
        let watcher = DownloadWatcher::arm(dir.path()).unwrap();
        std::fs::write(dir.path().join("Employees.xlsx.crdownload"), b"..").unwrap();
        let err = watcher
            .wait(Duration::from_millis(80), TICK)
            .await
            .unwrap_err();
        assert!(matches!(err, SuiteError::DownloadFailed(_)));
    }
}
