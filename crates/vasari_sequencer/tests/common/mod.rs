//! In-memory collaborators for sequencer tests.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use vasari_core::{Comment, ConversationThread, DirectMessage, Post, Receipt};
use vasari_error::{
    GenerationError, GenerationErrorKind, GenerationResult, PlatformError, PlatformErrorKind,
    PlatformResult,
};
use vasari_interface::{PlatformGateway, TextGenerator};

pub const PAGE: &str = "page_1";

/// Answers every prompt with `re: <prompt>`; optionally fails on the n-th call.
#[derive(Default)]
pub struct EchoGenerator {
    calls: AtomicUsize,
    fail_on: Option<usize>,
}

impl EchoGenerator {
    pub fn failing_on(call: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_on: Some(call),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for EchoGenerator {
    async fn generate(&self, prompt: &str) -> GenerationResult<String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on == Some(n) {
            return Err(GenerationError::new(GenerationErrorKind::MalformedResponse(
                "no choices".to_string(),
            )));
        }
        Ok(format!("re: {}", prompt))
    }

    fn provider_name(&self) -> &str {
        "echo"
    }
}

/// Every gateway call, in the order it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Publish(String),
    ListPosts(u32),
    ListComments(String, u32),
    Reply(String, String),
    ListThreads(u32),
    Latest(String),
    Send(String, String),
}

/// Scripted page state.
#[derive(Default)]
pub struct FakePage {
    posts: Vec<Post>,
    comments: HashMap<String, Vec<Comment>>,
    threads: Vec<ConversationThread>,
    latest: HashMap<String, DirectMessage>,
    ignore_limits: bool,
    fail_publish_on: Option<usize>,
    fail_reply_on: Option<usize>,
    calls: Mutex<Vec<Call>>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_post(mut self, post_id: &str, comment_ids: &[&str]) -> Self {
        self.posts.push(Post::new(post_id, Some(format!("post {}", post_id))));
        self.comments.insert(
            post_id.to_string(),
            comment_ids
                .iter()
                .map(|id| Comment::new(*id, format!("comment {}", id)))
                .collect(),
        );
        self
    }

    pub fn with_thread(mut self, thread: ConversationThread, sender: &str) -> Self {
        let id = thread.id.clone();
        self.latest.insert(
            id.clone(),
            DirectMessage::new(format!("m_{}", id), sender, format!("hello from {}", sender)),
        );
        self.threads.push(thread);
        self
    }

    pub fn with_unread_threads(mut self, count: usize) -> Self {
        for i in 0..count {
            self = self.with_thread(
                ConversationThread::new(format!("t{}", i), 1),
                &format!("user{}", i),
            );
        }
        self
    }

    /// Return every scripted comment regardless of the requested limit.
    pub fn ignoring_limits(mut self) -> Self {
        self.ignore_limits = true;
        self
    }

    pub fn failing_publish_on(mut self, call: usize) -> Self {
        self.fail_publish_on = Some(call);
        self
    }

    pub fn failing_reply_on(mut self, call: usize) -> Self {
        self.fail_reply_on = Some(call);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, call: Call) -> usize {
        let mut calls = self.calls.lock().unwrap();
        let kind = std::mem::discriminant(&call);
        calls.push(call);
        calls
            .iter()
            .filter(|c| std::mem::discriminant(*c) == kind)
            .count()
    }
}

#[async_trait]
impl PlatformGateway for FakePage {
    fn transport_name(&self) -> &str {
        "fake"
    }

    fn account_id(&self) -> &str {
        PAGE
    }

    async fn publish_post(&self, _page_id: &str, text: &str) -> PlatformResult<Receipt> {
        let n = self.push(Call::Publish(text.to_string()));
        if self.fail_publish_on == Some(n) {
            return Err(PlatformError::new(PlatformErrorKind::Publish(
                "rejected".to_string(),
            )));
        }
        Ok(Receipt::new(json!({ "id": format!("{}_{}", PAGE, n) })))
    }

    async fn list_recent_posts(&self, _page_id: &str, limit: u32) -> PlatformResult<Vec<Post>> {
        self.push(Call::ListPosts(limit));
        Ok(self.posts.iter().take(limit as usize).cloned().collect())
    }

    async fn list_comments(&self, post_id: &str, limit: u32) -> PlatformResult<Vec<Comment>> {
        self.push(Call::ListComments(post_id.to_string(), limit));
        let comments = self.comments.get(post_id).cloned().unwrap_or_default();
        if self.ignore_limits {
            Ok(comments)
        } else {
            Ok(comments.into_iter().take(limit as usize).collect())
        }
    }

    async fn reply_to_comment(&self, comment_id: &str, text: &str) -> PlatformResult<Receipt> {
        let n = self.push(Call::Reply(comment_id.to_string(), text.to_string()));
        if self.fail_reply_on == Some(n) {
            return Err(PlatformError::new(PlatformErrorKind::Reply(
                "comment deleted".to_string(),
            )));
        }
        Ok(Receipt::new(json!({ "id": format!("{}_reply", comment_id) })))
    }

    async fn list_recent_threads(&self, limit: u32) -> PlatformResult<Vec<ConversationThread>> {
        self.push(Call::ListThreads(limit));
        Ok(self.threads.iter().take(limit as usize).cloned().collect())
    }

    async fn get_latest_message(&self, thread_id: &str) -> PlatformResult<DirectMessage> {
        self.push(Call::Latest(thread_id.to_string()));
        self.latest.get(thread_id).cloned().ok_or_else(|| {
            PlatformError::new(PlatformErrorKind::Read(format!(
                "unknown thread {}",
                thread_id
            )))
        })
    }

    async fn send_direct_message(&self, recipient_id: &str, text: &str) -> PlatformResult<Receipt> {
        self.push(Call::Send(recipient_id.to_string(), text.to_string()));
        Ok(Receipt::new(json!({ "recipient_id": recipient_id, "message_id": "mid" })))
    }
}
