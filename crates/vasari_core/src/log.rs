//! Append-only record of completed actions.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Opaque result payload returned by the platform for a write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_more::From)]
#[serde(transparent)]
pub struct Receipt(JsonValue);

impl Receipt {
    /// Wraps a raw platform response.
    pub fn new(value: JsonValue) -> Self {
        Self(value)
    }

    /// Platform identifier of the created object, when the payload has one.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(JsonValue::as_str)
    }

    /// Raw payload.
    pub fn value(&self) -> &JsonValue {
        &self.0
    }
}

/// Kinds of write action a run performs.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum ActionKind {
    /// A post published to the page.
    #[serde(rename = "publishPost")]
    #[strum(serialize = "publishPost")]
    PublishPost,
    /// A reply to a comment on one of the page's posts.
    #[serde(rename = "replyComment")]
    #[strum(serialize = "replyComment")]
    ReplyComment,
    /// A direct message answering a conversation thread.
    #[serde(rename = "replyDM")]
    #[strum(serialize = "replyDM")]
    ReplyDm,
}

/// One completed write action.
///
/// Serialized with an `action` tag, for example
/// `{"action":"replyComment","comment_id":"123_456","result":{"id":"789"}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum LogEntry {
    /// A post was published.
    #[serde(rename = "publishPost")]
    PublishPost {
        /// Text that was published.
        post: String,
        /// Platform response.
        #[serde(default)]
        result: Receipt,
    },
    /// A comment was answered.
    #[serde(rename = "replyComment")]
    ReplyComment {
        /// Comment that received the reply.
        comment_id: String,
        /// Platform response.
        #[serde(default)]
        result: Receipt,
    },
    /// A conversation thread was answered by direct message.
    #[serde(rename = "replyDM")]
    ReplyDm {
        /// Thread that was answered.
        thread_id: String,
        /// User the message was sent to.
        recipient_id: String,
        /// Platform response.
        #[serde(default)]
        result: Receipt,
    },
}

impl LogEntry {
    /// Kind of action this entry records.
    pub fn kind(&self) -> ActionKind {
        match self {
            LogEntry::PublishPost { .. } => ActionKind::PublishPost,
            LogEntry::ReplyComment { .. } => ActionKind::ReplyComment,
            LogEntry::ReplyDm { .. } => ActionKind::ReplyDm,
        }
    }

    /// Identifying key: post text, comment id or thread id.
    pub fn key(&self) -> &str {
        match self {
            LogEntry::PublishPost { post, .. } => post,
            LogEntry::ReplyComment { comment_id, .. } => comment_id,
            LogEntry::ReplyDm { thread_id, .. } => thread_id,
        }
    }

    /// Platform response for the write.
    pub fn result(&self) -> &Receipt {
        match self {
            LogEntry::PublishPost { result, .. }
            | LogEntry::ReplyComment { result, .. }
            | LogEntry::ReplyDm { result, .. } => result,
        }
    }
}

/// Ordered, append-only sequence of completed actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunLog(Vec<LogEntry>);

impl RunLog {
    pub(crate) fn push(&mut self, entry: LogEntry) {
        self.0.push(entry);
    }

    /// Number of completed actions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if nothing was done.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in the order the actions were performed.
    pub fn entries(&self) -> &[LogEntry] {
        &self.0
    }

    /// Iterates entries in action order.
    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.0.iter()
    }

    /// Number of entries of the given kind.
    pub fn count(&self, kind: ActionKind) -> usize {
        self.0.iter().filter(|entry| entry.kind() == kind).count()
    }
}

impl<'a> IntoIterator for &'a RunLog {
    type Item = &'a LogEntry;
    type IntoIter = std::slice::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
