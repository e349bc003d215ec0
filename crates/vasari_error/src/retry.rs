//! Retry classification shared by every fallible collaborator call.

/// Trait for errors that support retry logic.
///
/// Transient failures (timeouts, dropped connections, 408/429/5xx responses)
/// return `true`; permanent failures (bad credentials, malformed payloads,
/// other 4xx rejections) return `false` and are never retried.
///
/// # Examples
///
/// ```
/// use vasari_error::{GenerationError, GenerationErrorKind, RetryableError};
///
/// let err = GenerationError::new(GenerationErrorKind::Status {
///     status_code: 503,
///     message: "Service unavailable".to_string(),
/// });
/// assert!(err.is_retryable());
///
/// let err = GenerationError::new(GenerationErrorKind::MissingApiKey);
/// assert!(!err.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;
}

/// Whether an HTTP status code denotes a transient upstream condition.
pub fn is_transient_status(status_code: u16) -> bool {
    matches!(status_code, 408 | 429 | 500 | 502 | 503 | 504)
}
