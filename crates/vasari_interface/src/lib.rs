//! Trait seams between the Vasari sequencer and its collaborators.
//!
//! The sequencer only talks to two things: a [`TextGenerator`] that turns a
//! prompt into a single line of text, and a [`PlatformGateway`] that reads
//! and writes the managed page. Both are object-safe so they can be swapped
//! at configuration time or replaced by in-memory fakes in tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{PlatformGateway, TextGenerator};
