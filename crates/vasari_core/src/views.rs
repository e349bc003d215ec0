//! Read-only snapshots of platform objects.

use serde::{Deserialize, Serialize};

/// A post on the managed page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Post {
    /// Platform identifier.
    pub id: String,
    /// Post text, absent for media-only posts.
    #[serde(default)]
    pub message: Option<String>,
}

impl Post {
    /// Creates a post view.
    pub fn new(id: impl Into<String>, message: Option<String>) -> Self {
        Self {
            id: id.into(),
            message,
        }
    }
}

/// A comment on one of the page's posts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Comment {
    /// Platform identifier.
    pub id: String,
    /// Comment text. Empty text is passed to the generator as-is.
    #[serde(default)]
    pub message: String,
}

impl Comment {
    /// Creates a comment view.
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
        }
    }
}

/// A private conversation between a user and the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationThread {
    /// Platform identifier.
    pub id: String,
    /// Messages the page has not read yet.
    #[serde(default)]
    pub unread_count: u32,
    /// Spam flag, when the platform reports one.
    #[serde(default)]
    pub spam: Option<bool>,
}

impl ConversationThread {
    /// Creates a thread view with no spam flag.
    pub fn new(id: impl Into<String>, unread_count: u32) -> Self {
        Self {
            id: id.into(),
            unread_count,
            spam: None,
        }
    }

    /// Sets the spam flag.
    pub fn with_spam(mut self, spam: bool) -> Self {
        self.spam = Some(spam);
        self
    }

    /// True if the thread has unread messages.
    pub fn has_unread(&self) -> bool {
        self.unread_count > 0
    }

    /// True only if the platform explicitly flagged the thread as spam.
    pub fn is_spam(&self) -> bool {
        self.spam.unwrap_or(false)
    }
}

/// The most recent message in a conversation thread.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectMessage {
    /// Platform identifier.
    pub id: String,
    /// Account that sent the message.
    pub sender_id: String,
    /// Message text.
    #[serde(default)]
    pub body: String,
}

impl DirectMessage {
    /// Creates a message view.
    pub fn new(
        id: impl Into<String>,
        sender_id: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            sender_id: sender_id.into(),
            body: body.into(),
        }
    }
}
