//! Call-budget allocator and action sequencer.
//!
//! A run spends a fixed quota of write actions across three phases, always
//! in this order:
//!
//! 1. **Posting**: two generated posts, only if the quota covers both.
//! 2. **Replying to comments** on the page's most recent posts.
//! 3. **Replying to direct messages** in unread, non-spam threads.
//!
//! The reply phases are each capped at `min(phase_cap, remaining)` actions,
//! computed once when the phase starts. Every successful write is logged and
//! spends exactly one call. The first failure aborts the run; completed
//! actions stay applied and are reported in [`RunAborted::partial`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod sequencer;
mod trigger;

pub use config::{
    DEFAULT_PHASE_CAP, DEFAULT_QUOTA, DEFAULT_RECENT_POSTS, POST_PHASE_WRITES, SequencerConfig,
    SequencerConfigBuilder, THREAD_OVERFETCH,
};
pub use sequencer::ActionSequencer;
pub use trigger::{RunAborted, RunTrigger};
