//! HTTP client for the chat completion endpoint.

use super::{ChatCompletionRequest, ChatCompletionResponse, GeneratorConfig, Message};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};
use vasari_error::{GenerationError, GenerationErrorKind, GenerationResult, is_transient_status};
use vasari_interface::TextGenerator;

/// Longest error body echoed into a [`GenerationErrorKind::Status`] message.
const MAX_ERROR_BODY: usize = 512;

/// Text generator backed by an OpenAI-compatible chat completion API.
#[derive(Debug, Clone)]
pub struct ChatCompletionGenerator {
    config: GeneratorConfig,
    client: reqwest::Client,
}

impl ChatCompletionGenerator {
    /// Creates a generator.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationErrorKind::MissingApiKey`] if no non-empty API key
    /// is configured, and [`GenerationErrorKind::Transport`] if the HTTP
    /// client cannot be built.
    #[instrument(skip_all, fields(base_url = %config.base_url(), model = %config.model()))]
    pub fn new(config: GeneratorConfig) -> GenerationResult<Self> {
        let has_key = config
            .api_key()
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty());
        if !has_key {
            return Err(GenerationError::new(GenerationErrorKind::MissingApiKey));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::Transport(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;

        debug!("Created chat completion generator");
        Ok(Self { config, client })
    }

    /// Generator settings.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn request_for(&self, prompt: &str) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = self.config.system_prompt() {
            messages.push(Message::system(system.clone()));
        }
        messages.push(Message::user(prompt));
        ChatCompletionRequest::new(self.config.model().clone(), messages)
    }

    /// Sends one completion request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Transport failures, non-2xx statuses and unparsable bodies.
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> GenerationResult<ChatCompletionResponse> {
        let url = self.config.endpoint();
        debug!(url = %url, "Sending chat completion request");

        let mut req = self.client.post(&url).json(request);
        if let Some(api_key) = self.config.api_key() {
            req = req.bearer_auth(api_key);
        }
        if let Some(channel) = self.config.channel_id() {
            req = req.header("X-Channel-ID", channel);
        }
        if let Some(user) = self.config.user_id() {
            req = req.header("X-User-ID", user);
        }

        let response = req.send().await.map_err(|e| {
            warn!(error = %e, "Chat completion request failed");
            GenerationError::new(GenerationErrorKind::Transport(format!(
                "Request failed: {}",
                e
            )))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            GenerationError::new(GenerationErrorKind::Transport(format!(
                "Failed to read response body: {}",
                e
            )))
        })?;

        if !status.is_success() {
            let status_code = status.as_u16();
            warn!(
                status_code,
                transient = is_transient_status(status_code),
                "Chat completion returned error status"
            );
            return Err(GenerationError::new(GenerationErrorKind::Status {
                status_code,
                message: truncate(&body, MAX_ERROR_BODY),
            }));
        }

        serde_json::from_str(&body).map_err(|e| {
            GenerationError::new(GenerationErrorKind::MalformedResponse(format!(
                "Failed to parse response: {}",
                e
            )))
        })
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionGenerator {
    #[instrument(
        skip(self, prompt),
        fields(
            provider = "chat_completions",
            model = %self.config.model(),
            prompt_len = prompt.len(),
        )
    )]
    async fn generate(&self, prompt: &str) -> GenerationResult<String> {
        let response = self.chat_completion(&self.request_for(prompt)).await?;

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            GenerationError::new(GenerationErrorKind::MalformedResponse(
                "Response contained no choices".to_string(),
            ))
        })?;

        let content = choice.message.content.unwrap_or_default();
        let line = first_line_or(&content, self.config.fallback_text());
        debug!(chars = line.chars().count(), "Generated text");
        Ok(line)
    }

    fn provider_name(&self) -> &str {
        "chat_completions"
    }
}

/// First line of `text`, trimmed; `fallback` if that line is blank.
///
/// Lines are split on `\n` and `\r\n`.
///
/// ```
/// use vasari_models::first_line_or;
///
/// assert_eq!(first_line_or("  Hello there \r\nsecond", "fallback"), "Hello there");
/// assert_eq!(first_line_or("   ", "fallback"), "fallback");
/// ```
pub fn first_line_or(text: &str, fallback: &str) -> String {
    let line = text.split('\n').next().unwrap_or_default().trim();
    if line.is_empty() {
        fallback.to_string()
    } else {
        line.to_string()
    }
}

fn truncate(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_drops_everything_after_newline() {
        assert_eq!(first_line_or("one\ntwo\nthree", "x"), "one");
        assert_eq!(first_line_or("one\r\ntwo", "x"), "one");
    }

    #[test]
    fn blank_first_line_uses_fallback() {
        assert_eq!(first_line_or("", "fallback"), "fallback");
        assert_eq!(first_line_or("\nsecond", "fallback"), "fallback");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("مرحبا بك", 5), "مرحبا...");
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn missing_api_key_is_rejected() {
        let err = ChatCompletionGenerator::new(GeneratorConfig::default()).unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::MissingApiKey);

        let blank = GeneratorConfig::default().with_api_key("  ");
        assert!(ChatCompletionGenerator::new(blank).is_err());
    }

    #[test]
    fn system_prompt_precedes_user_message() {
        let config = GeneratorConfig::builder()
            .api_key(Some("k".to_string()))
            .system_prompt(Some("Be brief.".to_string()))
            .build()
            .unwrap();
        let generator = ChatCompletionGenerator::new(config).unwrap();
        let request = generator.request_for("hi");
        assert_eq!(request.messages[0], Message::system("Be brief."));
        assert_eq!(request.messages[1], Message::user("hi"));
        assert_eq!(request.model, "shapesinc/orind");
    }
}
