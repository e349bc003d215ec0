//! Top-level error wrapper types.

use crate::{BudgetError, ConfigError, GenerationError, PlatformError, RetryableError, ServerError};

/// Every failure a Vasari run or its surfaces can report.
///
/// # Examples
///
/// ```
/// use vasari_error::{ConfigError, VasariError};
///
/// let config_err = ConfigError::new("run.quota must be greater than zero");
/// let err: VasariError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum VasariErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Text generation failed
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Platform read or write failed
    #[from(PlatformError)]
    Platform(PlatformError),
    /// Call budget bookkeeping violated
    #[from(BudgetError)]
    Budget(BudgetError),
    /// Run trigger server error
    #[from(ServerError)]
    Server(ServerError),
}

/// Vasari error with kind discrimination.
///
/// # Examples
///
/// ```
/// use vasari_error::{ConfigError, VasariErrorKind, VasariResult};
///
/// fn might_fail() -> VasariResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), VasariErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Vasari Error: {}", _0)]
pub struct VasariError(Box<VasariErrorKind>);

impl VasariError {
    /// Create a new error from a kind.
    pub fn new(kind: VasariErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &VasariErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to VasariErrorKind
impl<T> From<T> for VasariError
where
    T: Into<VasariErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

impl RetryableError for VasariError {
    fn is_retryable(&self) -> bool {
        match self.kind() {
            VasariErrorKind::Generation(e) => e.is_retryable(),
            VasariErrorKind::Platform(e) => e.is_retryable(),
            _ => false,
        }
    }
}

/// Result type for Vasari operations.
pub type VasariResult<T> = std::result::Result<T, VasariError>;
