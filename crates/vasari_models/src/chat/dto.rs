//! Wire types for the chat completion endpoint.

use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat completion request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatCompletionRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<Message>,
}

impl ChatCompletionRequest {
    /// Request for `model` over the given messages.
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
        }
    }
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Message {
    /// Role of the message sender (system, user, assistant)
    pub role: String,
    /// Message content
    pub content: String,
}

impl Message {
    /// Create a new message
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }
}

/// OpenAI-compatible chat completion response.
///
/// Only `choices` is required; providers differ on the rest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionResponse {
    /// Unique identifier for the completion
    #[serde(default)]
    pub id: Option<String>,
    /// Model used for completion
    #[serde(default)]
    pub model: Option<String>,
    /// Generated completions
    pub choices: Vec<Choice>,
    /// Token usage statistics
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// A completion choice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Choice {
    /// Index of this choice
    #[serde(default)]
    pub index: u32,
    /// The generated message
    pub message: ChoiceMessage,
    /// Reason why generation finished
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Message in a choice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ChoiceMessage {
    /// Role of the message (typically "assistant")
    #[serde(default)]
    pub role: Option<String>,
    /// Generated content; some providers send `null`
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Usage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,
    /// Tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}
