//! Retry policy and the generic retry loop.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tokio_retry2::strategy::FixedInterval;
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, warn};
use vasari_error::RetryableError;

/// Number of retries and the fixed delay between attempts.
///
/// A policy of `max_retries = 2` makes at most three attempts in total.
///
/// # Examples
///
/// ```
/// use vasari_retry::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(*policy.max_retries(), 2);
/// assert_eq!(*policy.delay_ms(), 1000);
/// assert!(RetryPolicy::disabled().is_disabled());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    max_retries: usize,
    /// Delay between attempts, in milliseconds.
    delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            delay_ms: 1000,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy.
    pub fn new(max_retries: usize, delay_ms: u64) -> Self {
        Self {
            max_retries,
            delay_ms,
        }
    }

    /// A policy that makes exactly one attempt.
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            delay_ms: 0,
        }
    }

    /// True if the policy never retries.
    pub fn is_disabled(&self) -> bool {
        self.max_retries == 0
    }

    /// Delay between attempts.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    fn strategy(&self) -> std::iter::Take<FixedInterval> {
        FixedInterval::from_millis(self.delay_ms).take(self.max_retries)
    }
}

/// Runs `op` under `policy`.
///
/// Transient failures (see [`RetryableError`]) are retried after the policy's
/// delay until the retries run out; permanent failures return immediately.
/// The last error is returned unchanged.
pub async fn retry_call<T, E, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut op: F,
) -> Result<T, E>
where
    E: RetryableError + std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    if policy.is_disabled() {
        return op().await;
    }

    let mut attempt = 0usize;
    Retry::spawn(policy.strategy(), || {
        attempt += 1;
        let current = attempt;
        let fut = op();
        async move {
            match fut.await {
                Ok(value) => {
                    if current > 1 {
                        debug!(operation, attempt = current, "Call succeeded after retry");
                    }
                    Ok(value)
                }
                Err(e) if e.is_retryable() => {
                    warn!(
                        operation,
                        attempt = current,
                        error = %e,
                        "Transient failure, will retry"
                    );
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => {
                    warn!(
                        operation,
                        attempt = current,
                        error = %e,
                        "Permanent failure, failing immediately"
                    );
                    Err(RetryError::Permanent(e))
                }
            }
        }
    })
    .await
}
