//! Graph API response shapes.

use serde::Deserialize;
use vasari_core::{Comment, ConversationThread, Post};

/// A page of edge results: `{"data": [...], "paging": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GraphList<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GraphUser {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GraphPost {
    pub id: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl From<GraphPost> for Post {
    fn from(post: GraphPost) -> Self {
        Post::new(post.id, post.message)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GraphComment {
    pub id: String,
    #[serde(default)]
    pub message: String,
}

impl From<GraphComment> for Comment {
    fn from(comment: GraphComment) -> Self {
        Comment::new(comment.id, comment.message)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GraphConversation {
    pub id: String,
    #[serde(default)]
    pub unread_count: u32,
}

impl From<GraphConversation> for ConversationThread {
    fn from(conversation: GraphConversation) -> Self {
        ConversationThread::new(conversation.id, conversation.unread_count)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GraphMessage {
    pub id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub from: Option<GraphUser>,
}

/// `{"error": {"message": "...", "type": "...", "code": 190}}`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GraphErrorEnvelope {
    pub error: GraphErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GraphErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "type")]
    pub error_type: Option<String>,
    #[serde(default)]
    pub code: Option<i64>,
}

impl GraphErrorBody {
    /// Expired, revoked or otherwise invalid access token.
    pub fn is_auth(&self) -> bool {
        matches!(self.code, Some(102 | 190))
    }

    /// Human-readable summary, e.g. `OAuthException (190): Session has expired`.
    pub fn describe(&self) -> String {
        match (&self.error_type, self.code) {
            (Some(kind), Some(code)) => format!("{} ({}): {}", kind, code, self.message),
            (None, Some(code)) => format!("({}): {}", code, self.message),
            (Some(kind), None) => format!("{}: {}", kind, self.message),
            (None, None) => self.message.clone(),
        }
    }

    /// Application or page level throttling, and temporary service errors.
    pub fn is_throttle(&self) -> bool {
        matches!(self.code, Some(1 | 2 | 4 | 17 | 32 | 341 | 613))
    }
}
