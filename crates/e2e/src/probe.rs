//! Polling primitive for UI state checks
//!
//! Boolean existence checks used to collapse "the element is not there" and
//! "the check itself errored" into `false`. The probe keeps the two apart:
//! callers that only care about presence collapse the outcome explicitly
//! with [`Probe::is_found`].

use std::future::Future;
use std::time::{Duration, Instant};

use tracing::trace;

use crate::error::SuiteResult;

/// Outcome of polling for a UI condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe<T> {
    /// The condition held before the deadline.
    Found(T),
    /// At least one attempt definitively reported absence, and the deadline
    /// passed without the condition holding.
    NotFound,
    /// Every attempt up to the deadline errored; absence was never
    /// established.
    TimedOut,
}

impl<T> Probe<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Probe::Found(_))
    }

    pub fn into_found(self) -> Option<T> {
        match self {
            Probe::Found(value) => Some(value),
            _ => None,
        }
    }
}

/// Poll `attempt` every `interval` until it yields a value or `timeout`
/// elapses.
///
/// `attempt` contract: `Ok(Some(v))` means found, `Ok(None)` means
/// definitively absent right now, `Err` means the check could not be
/// performed this tick (the error is logged and polling continues).
pub async fn poll<T, F, Fut>(timeout: Duration, interval: Duration, mut attempt: F) -> Probe<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = SuiteResult<Option<T>>>,
{
    let deadline = Instant::now() + timeout;
    let mut saw_absence = false;
    loop {
        match attempt().await {
            Ok(Some(value)) => return Probe::Found(value),
            Ok(None) => saw_absence = true,
            Err(err) => trace!(error = %err, "Probe attempt errored"),
        }
        if Instant::now() >= deadline {
            return if saw_absence {
                Probe::NotFound
            } else {
                Probe::TimedOut
            };
        }
        tokio::time::sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::error::SuiteError;

    const TICK: Duration = Duration::from_millis(5);
    const SHORT: Duration = Duration::from_millis(40);

    #[tokio::test]
    async fn found_on_first_attempt() {
        let outcome = poll(SHORT, TICK, || async { Ok(Some(7)) }).await;
        assert_eq!(outcome, Probe::Found(7));
    }

    #[tokio::test]
    async fn found_after_a_few_absent_ticks() {
        let attempts = AtomicUsize::new(0);
        let outcome = poll(SHORT, TICK, || async {
            if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
                Ok(None)
            } else {
                Ok(Some("row"))
            }
        })
        .await;
        assert_eq!(outcome, Probe::Found("row"));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn persistent_absence_is_not_found() {
        let outcome = poll(SHORT, TICK, || async { Ok(None::<()>) }).await;
        assert_eq!(outcome, Probe::NotFound);
    }

    #[tokio::test]
    async fn persistent_errors_are_timed_out() {
        let outcome = poll(SHORT, TICK, || async {
            Err::<Option<()>, _>(SuiteError::Assertion("boom".into()))
        })
        .await;
        assert_eq!(outcome, Probe::TimedOut);
    }

    #[tokio::test]
    async fn late_error_does_not_mask_earlier_absence() {
        let attempts = AtomicUsize::new(0);
        let outcome = poll(SHORT, TICK, || async {
            if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(None::<()>)
            } else {
                Err(SuiteError::Assertion("flaky".into()))
            }
        })
        .await;
        assert_eq!(outcome, Probe::NotFound);
    }
}
