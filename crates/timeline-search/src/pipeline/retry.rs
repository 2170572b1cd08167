//! Bounded retry for single page fetches.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::NUM_RETRIES;
use crate::error::SearchError;

/// Re-runs a page fetch while it fails with a retryable error.
///
/// Retries run sequentially inside the caller's future, so a slow page
/// never holds up the others.
#[derive(Debug, Clone, Copy)]
pub struct PageRetrier {
    max_attempts: u32,
    delay: Duration,
}

impl Default for PageRetrier {
    fn default() -> Self {
        Self::new(NUM_RETRIES)
    }
}

impl PageRetrier {
    /// Allow up to `max_attempts` attempts in total (at least one).
    #[must_use]
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay: Duration::ZERO,
        }
    }

    /// Wait `delay` between attempts.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Total attempts allowed.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run `op`, retrying transient errors.
    pub async fn run<T, F, Fut>(&self, page: u32, op: F) -> Result<T, SearchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, SearchError>>,
    {
        self.run_if(page, op, SearchError::is_transient).await
    }

    /// Run `op`, retrying errors for which `retryable` returns true.
    ///
    /// Other errors are returned as-is on first sight. When the attempt
    /// budget runs out the last error is wrapped in
    /// `SearchError::RetriesExhausted`.
    pub async fn run_if<T, F, Fut, P>(
        &self,
        page: u32,
        mut op: F,
        retryable: P,
    ) -> Result<T, SearchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, SearchError>>,
        P: Fn(&SearchError) -> bool,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(page, attempt, "Page fetch succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) if retryable(&e) => {
                    if attempt >= self.max_attempts {
                        return Err(SearchError::RetriesExhausted {
                            page,
                            attempts: attempt,
                            source: Box::new(e),
                        });
                    }
                    warn!(
                        page,
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "Transient error, retrying page"
                    );
                    if !self.delay.is_zero() {
                        sleep(self.delay).await;
                    }
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn server_error() -> SearchError {
        SearchError::Server {
            status: 503,
            message: "Service Unavailable".to_string(),
        }
    }

    /// Fails with a server error `failures` times, then returns the attempt number.
    async fn flaky(calls: &AtomicU32, failures: u32) -> Result<u32, SearchError> {
        let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
        if n <= failures {
            Err(server_error())
        } else {
            Ok(n)
        }
    }

    #[tokio::test]
    async fn test_success_first_try() {
        let calls = AtomicU32::new(0);
        let result = PageRetrier::default().run(1, || flaky(&calls, 0)).await;
        assert_eq!(result.unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_two_failures_then_success() {
        let calls = AtomicU32::new(0);
        let result = PageRetrier::default().run(1, || flaky(&calls, 2)).await;
        assert_eq!(result.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_three_failures_exhausts() {
        let calls = AtomicU32::new(0);
        let err = PageRetrier::default()
            .run(7, || flaky(&calls, 3))
            .await
            .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), NUM_RETRIES);
        match err {
            SearchError::RetriesExhausted {
                page,
                attempts,
                source,
            } => {
                assert_eq!(page, 7);
                assert_eq!(attempts, NUM_RETRIES);
                assert!(source.is_transient());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_fatal_error_not_retried() {
        let calls = &AtomicU32::new(0);
        let err = PageRetrier::default()
            .run(1, move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(SearchError::Api {
                    status: 401,
                    message: "Unauthorized".to_string(),
                })
            })
            .await
            .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(err, SearchError::Api { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_custom_predicate() {
        let calls = AtomicU32::new(0);
        let err = PageRetrier::new(5)
            .run_if(1, || flaky(&calls, 10), |_| false)
            .await
            .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(err.is_transient());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_between_attempts() {
        let calls = AtomicU32::new(0);
        let start = tokio::time::Instant::now();
        let result = PageRetrier::default()
            .with_delay(Duration::from_millis(500))
            .run(1, || flaky(&calls, 2))
            .await;

        assert!(result.is_ok());
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[test]
    fn test_zero_attempts_clamped() {
        assert_eq!(PageRetrier::new(0).max_attempts(), 1);
    }
}
