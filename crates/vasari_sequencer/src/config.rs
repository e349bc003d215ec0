//! Run policy.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Calls granted to a run when nothing else is configured.
pub const DEFAULT_QUOTA: u32 = 20;
/// Most actions a single reply phase may take.
pub const DEFAULT_PHASE_CAP: u32 = 9;
/// Recent posts whose comments are considered.
pub const DEFAULT_RECENT_POSTS: u32 = 3;
/// Posts published by the post phase. The phase runs only if the quota
/// covers all of them.
pub const POST_PHASE_WRITES: u32 = 2;
/// Threads fetched per remaining call; many threads are skipped.
pub const THREAD_OVERFETCH: u32 = 2;

/// Policy and content parameters for a run.
///
/// Deserializes from the `[run]` configuration section; missing keys take
/// the defaults below.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[serde(default)]
#[builder(default, setter(into))]
pub struct SequencerConfig {
    /// Write actions allowed per run
    quota: u32,
    /// Page that posts are published to
    page_id: String,
    /// Prompt used for each generated post
    post_prompt: String,
    /// Upper bound on actions per reply phase
    phase_cap: u32,
    /// Recent posts scanned for comments
    recent_posts: u32,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            quota: DEFAULT_QUOTA,
            page_id: String::new(),
            post_prompt: "Write a short post for the page: one or two sentences.".to_string(),
            phase_cap: DEFAULT_PHASE_CAP,
            recent_posts: DEFAULT_RECENT_POSTS,
        }
    }
}

impl SequencerConfig {
    /// Starts a builder seeded with the defaults.
    pub fn builder() -> SequencerConfigBuilder {
        SequencerConfigBuilder::default()
    }
}
