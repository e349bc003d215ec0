//! Generator and platform traits.

use async_trait::async_trait;
use std::sync::Arc;
use vasari_core::{Comment, ConversationThread, DirectMessage, Post, Receipt};
use vasari_error::{GenerationResult, PlatformResult};

/// Produces short text from a prompt.
///
/// Implementations return a single trimmed line. An empty model response is
/// not an error; implementations substitute a fallback text instead.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt`.
    async fn generate(&self, prompt: &str) -> GenerationResult<String>;

    /// Provider name used in logs (e.g., "chat_completions").
    fn provider_name(&self) -> &str;
}

/// Read and write access to the managed page.
///
/// Every write method corresponds to one unit of the call budget. Reads are
/// never charged.
#[async_trait]
pub trait PlatformGateway: Send + Sync {
    /// Transport name used in logs (e.g., "graph", "dry_run").
    fn transport_name(&self) -> &str;

    /// Account id the page speaks as. Messages from this account are the
    /// page's own and are never answered.
    fn account_id(&self) -> &str;

    /// Publish `text` to the page feed.
    async fn publish_post(&self, page_id: &str, text: &str) -> PlatformResult<Receipt>;

    /// Most recent posts on the page, newest first.
    async fn list_recent_posts(&self, page_id: &str, limit: u32) -> PlatformResult<Vec<Post>>;

    /// Comments on a post, up to `limit`.
    async fn list_comments(&self, post_id: &str, limit: u32) -> PlatformResult<Vec<Comment>>;

    /// Reply to a comment.
    async fn reply_to_comment(&self, comment_id: &str, text: &str) -> PlatformResult<Receipt>;

    /// Most recent conversation threads, up to `limit`.
    async fn list_recent_threads(&self, limit: u32) -> PlatformResult<Vec<ConversationThread>>;

    /// Latest message in a thread.
    async fn get_latest_message(&self, thread_id: &str) -> PlatformResult<DirectMessage>;

    /// Send a direct message to a user.
    async fn send_direct_message(&self, recipient_id: &str, text: &str)
    -> PlatformResult<Receipt>;
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Box<T> {
    async fn generate(&self, prompt: &str) -> GenerationResult<String> {
        (**self).generate(prompt).await
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Arc<T> {
    async fn generate(&self, prompt: &str) -> GenerationResult<String> {
        (**self).generate(prompt).await
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }
}

macro_rules! forward_gateway {
    ($wrapper:ident) => {
        #[async_trait]
        impl<T: PlatformGateway + ?Sized> PlatformGateway for $wrapper<T> {
            fn transport_name(&self) -> &str {
                (**self).transport_name()
            }

            fn account_id(&self) -> &str {
                (**self).account_id()
            }

            async fn publish_post(&self, page_id: &str, text: &str) -> PlatformResult<Receipt> {
                (**self).publish_post(page_id, text).await
            }

            async fn list_recent_posts(
                &self,
                page_id: &str,
                limit: u32,
            ) -> PlatformResult<Vec<Post>> {
                (**self).list_recent_posts(page_id, limit).await
            }

            async fn list_comments(
                &self,
                post_id: &str,
                limit: u32,
            ) -> PlatformResult<Vec<Comment>> {
                (**self).list_comments(post_id, limit).await
            }

            async fn reply_to_comment(
                &self,
                comment_id: &str,
                text: &str,
            ) -> PlatformResult<Receipt> {
                (**self).reply_to_comment(comment_id, text).await
            }

            async fn list_recent_threads(
                &self,
                limit: u32,
            ) -> PlatformResult<Vec<ConversationThread>> {
                (**self).list_recent_threads(limit).await
            }

            async fn get_latest_message(&self, thread_id: &str) -> PlatformResult<DirectMessage> {
                (**self).get_latest_message(thread_id).await
            }

            async fn send_direct_message(
                &self,
                recipient_id: &str,
                text: &str,
            ) -> PlatformResult<Receipt> {
                (**self).send_direct_message(recipient_id, text).await
            }
        }
    };
}

forward_gateway!(Box);
forward_gateway!(Arc);
