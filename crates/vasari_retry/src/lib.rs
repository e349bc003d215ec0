//! Fixed-interval retry decorator for Vasari collaborators.
//!
//! Retrying lives outside the sequencer. [`Retrying`] wraps a generator or
//! gateway and re-issues individual calls that fail with a transient error;
//! the sequencer only ever sees the final outcome of each call, so ordering
//! and quota accounting are unaffected.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod decorator;
mod policy;

pub use decorator::Retrying;
pub use policy::{RetryPolicy, retry_call};
