//! Social platform error types.

use crate::RetryableError;
use derive_more::Display;

/// Platform operation failures, one kind per action family.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum PlatformErrorKind {
    /// Publishing a post was rejected or never reached the platform.
    #[display("Publish failed: {}", _0)]
    Publish(String),
    /// Replying to a comment was rejected or never reached the platform.
    #[display("Comment reply failed: {}", _0)]
    Reply(String),
    /// Sending a direct message was rejected or never reached the platform.
    #[display("Direct message failed: {}", _0)]
    Send(String),
    /// Reading posts, comments, threads or messages failed.
    #[display("Read failed: {}", _0)]
    Read(String),
    /// Session credentials were refused.
    #[display("Authentication failed: {}", _0)]
    Authentication(String),
}

/// Platform error with location tracking.
///
/// `transient` marks failures worth retrying (network errors, throttling,
/// upstream 5xx). Everything else is treated as a permanent rejection.
///
/// # Examples
///
/// ```
/// use vasari_error::{PlatformError, PlatformErrorKind, RetryableError};
///
/// let err = PlatformError::transient(PlatformErrorKind::Publish("timed out".into()));
/// assert!(err.is_retryable());
///
/// let err = PlatformError::new(PlatformErrorKind::Authentication("expired".into()));
/// assert!(!err.is_retryable());
/// ```
#[derive(Debug, Clone, Display, derive_more::Error)]
#[display("Platform Error: {} at line {} in {}", kind, line, file)]
pub struct PlatformError {
    /// The error kind
    pub kind: PlatformErrorKind,
    /// Whether a retry may succeed
    pub transient: bool,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl PlatformError {
    /// Create a permanent platform error.
    #[track_caller]
    pub fn new(kind: PlatformErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            transient: false,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Create a platform error that may succeed on retry.
    #[track_caller]
    pub fn transient(kind: PlatformErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            transient: true,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl RetryableError for PlatformError {
    fn is_retryable(&self) -> bool {
        self.transient
    }
}

/// Result type for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;
