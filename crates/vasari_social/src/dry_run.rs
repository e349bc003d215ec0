//! Transport that never touches the platform.

use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{info, instrument};
use vasari_core::{Comment, ConversationThread, DirectMessage, Post, Receipt};
use vasari_error::PlatformResult;
use vasari_interface::PlatformGateway;

/// Gateway that reads nothing and only logs writes.
///
/// Reads return empty lists, so a run against this transport publishes its
/// posts (logged, not sent) and finds nothing to reply to. Writes return a
/// synthetic receipt such as `{"id":"dry_run_1","dry_run":true}`.
#[derive(Debug, Default)]
pub struct DryRunGateway {
    account_id: String,
    writes: AtomicU64,
}

impl DryRunGateway {
    /// Creates a dry-run gateway acting as `account_id`.
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            writes: AtomicU64::new(0),
        }
    }

    /// Writes accepted so far.
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    fn receipt(&self) -> Receipt {
        let n = self.writes.fetch_add(1, Ordering::Relaxed) + 1;
        Receipt::new(json!({ "id": format!("dry_run_{}", n), "dry_run": true }))
    }
}

#[async_trait]
impl PlatformGateway for DryRunGateway {
    fn transport_name(&self) -> &str {
        "dry_run"
    }

    fn account_id(&self) -> &str {
        &self.account_id
    }

    #[instrument(skip(self, text), fields(transport = "dry_run"))]
    async fn publish_post(&self, page_id: &str, text: &str) -> PlatformResult<Receipt> {
        info!(text = %text, "Dry run: post not published");
        Ok(self.receipt())
    }

    async fn list_recent_posts(&self, _page_id: &str, _limit: u32) -> PlatformResult<Vec<Post>> {
        Ok(Vec::new())
    }

    async fn list_comments(&self, _post_id: &str, _limit: u32) -> PlatformResult<Vec<Comment>> {
        Ok(Vec::new())
    }

    #[instrument(skip(self, text), fields(transport = "dry_run"))]
    async fn reply_to_comment(&self, comment_id: &str, text: &str) -> PlatformResult<Receipt> {
        info!(text = %text, "Dry run: comment reply not sent");
        Ok(self.receipt())
    }

    async fn list_recent_threads(&self, _limit: u32) -> PlatformResult<Vec<ConversationThread>> {
        Ok(Vec::new())
    }

    /// Returns an empty message authored by the page itself, which the
    /// sequencer always skips.
    async fn get_latest_message(&self, thread_id: &str) -> PlatformResult<DirectMessage> {
        Ok(DirectMessage::new(thread_id, self.account_id.clone(), ""))
    }

    #[instrument(skip(self, text), fields(transport = "dry_run"))]
    async fn send_direct_message(&self, recipient_id: &str, text: &str) -> PlatformResult<Receipt> {
        info!(text = %text, "Dry run: direct message not sent");
        Ok(self.receipt())
    }
}
