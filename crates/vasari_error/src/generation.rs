//! Text generation error types.

use crate::{RetryableError, is_transient_status};

/// Text generation error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// No API key configured for the provider
    #[display("No API key configured for the text generation provider")]
    MissingApiKey,
    /// Provider unreachable (DNS, TLS, timeout, connection reset)
    #[display("Provider unreachable: {}", _0)]
    Transport(String),
    /// Provider answered with a non-success status
    #[display("HTTP {} error: {}", status_code, message)]
    Status {
        /// HTTP status code
        status_code: u16,
        /// Response body or reason phrase
        message: String,
    },
    /// Provider answered but the payload is unusable
    #[display("Malformed completion response: {}", _0)]
    MalformedResponse(String),
}

impl GenerationErrorKind {
    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            GenerationErrorKind::Transport(_) => true,
            GenerationErrorKind::Status { status_code, .. } => is_transient_status(*status_code),
            _ => false,
        }
    }
}

/// Text generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use vasari_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::MalformedResponse(
///     "missing choices".to_string(),
/// ));
/// assert!(format!("{}", err).contains("missing choices"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl RetryableError for GenerationError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

/// Result type for text generation.
pub type GenerationResult<T> = Result<T, GenerationError>;
