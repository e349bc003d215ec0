//! Retrying wrapper for generators and gateways.

use crate::{RetryPolicy, retry_call};
use async_trait::async_trait;
use vasari_core::{Comment, ConversationThread, DirectMessage, Post, Receipt};
use vasari_error::{GenerationResult, PlatformResult};
use vasari_interface::{PlatformGateway, TextGenerator};

/// Wraps a collaborator so every call is retried under one policy.
///
/// `Retrying<G>` is a [`TextGenerator`] when `G` is, and a
/// [`PlatformGateway`] when `G` is.
#[derive(Debug, Clone)]
pub struct Retrying<T> {
    inner: T,
    policy: RetryPolicy,
}

impl<T> Retrying<T> {
    /// Wraps `inner` with `policy`.
    pub fn new(inner: T, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// The wrapped collaborator.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// The policy applied to every call.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Unwraps the collaborator.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[async_trait]
impl<T: TextGenerator> TextGenerator for Retrying<T> {
    async fn generate(&self, prompt: &str) -> GenerationResult<String> {
        retry_call(&self.policy, "generate", || self.inner.generate(prompt)).await
    }

    fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl<T: PlatformGateway> PlatformGateway for Retrying<T> {
    fn transport_name(&self) -> &str {
        self.inner.transport_name()
    }

    fn account_id(&self) -> &str {
        self.inner.account_id()
    }

    async fn publish_post(&self, page_id: &str, text: &str) -> PlatformResult<Receipt> {
        retry_call(&self.policy, "publish_post", || {
            self.inner.publish_post(page_id, text)
        })
        .await
    }

    async fn list_recent_posts(&self, page_id: &str, limit: u32) -> PlatformResult<Vec<Post>> {
        retry_call(&self.policy, "list_recent_posts", || {
            self.inner.list_recent_posts(page_id, limit)
        })
        .await
    }

    async fn list_comments(&self, post_id: &str, limit: u32) -> PlatformResult<Vec<Comment>> {
        retry_call(&self.policy, "list_comments", || {
            self.inner.list_comments(post_id, limit)
        })
        .await
    }

    async fn reply_to_comment(&self, comment_id: &str, text: &str) -> PlatformResult<Receipt> {
        retry_call(&self.policy, "reply_to_comment", || {
            self.inner.reply_to_comment(comment_id, text)
        })
        .await
    }

    async fn list_recent_threads(&self, limit: u32) -> PlatformResult<Vec<ConversationThread>> {
        retry_call(&self.policy, "list_recent_threads", || {
            self.inner.list_recent_threads(limit)
        })
        .await
    }

    async fn get_latest_message(&self, thread_id: &str) -> PlatformResult<DirectMessage> {
        retry_call(&self.policy, "get_latest_message", || {
            self.inner.get_latest_message(thread_id)
        })
        .await
    }

    async fn send_direct_message(&self, recipient_id: &str, text: &str) -> PlatformResult<Receipt> {
        retry_call(&self.policy, "send_direct_message", || {
            self.inner.send_direct_message(recipient_id, text)
        })
        .await
    }
}
