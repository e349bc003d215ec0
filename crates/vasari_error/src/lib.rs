//! Error types for the Vasari workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! The run-level taxonomy is:
//! - [`GenerationError`] - the AI provider was unreachable or answered with unusable content
//! - [`PlatformError`] - a publish, reply, send or read against the social platform failed
//!
//! Everything funnels into [`VasariError`] through `?`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod budget;
mod config;
mod error;
mod generation;
mod platform;
mod retry;
mod server;

pub use budget::BudgetError;
pub use config::ConfigError;
pub use error::{VasariError, VasariErrorKind, VasariResult};
pub use generation::{GenerationError, GenerationErrorKind, GenerationResult};
pub use platform::{PlatformError, PlatformErrorKind, PlatformResult};
pub use retry::{RetryableError, is_transient_status};
pub use server::{ServerError, ServerErrorKind};
