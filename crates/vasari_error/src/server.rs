//! Error types for the run trigger server.

/// Error kinds for server operations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum ServerErrorKind {
    /// Could not bind the listening socket
    #[display("Failed to bind {}: {}", address, message)]
    Bind {
        /// Requested socket address
        address: String,
        /// Underlying I/O error
        message: String,
    },
    /// The HTTP server stopped with an error
    #[display("Server stopped: {}", _0)]
    Serve(String),
    /// Invalid schedule expression
    #[display("Invalid schedule: {}", _0)]
    Schedule(String),
}

/// Error wrapper with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Server Error: {} at line {} in {}", kind, line, file)]
pub struct ServerError {
    /// The error kind
    pub kind: ServerErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl ServerError {
    /// Create a new ServerError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ServerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
