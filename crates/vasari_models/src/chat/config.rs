//! Chat completion generator settings.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for [`ChatCompletionGenerator`](crate::ChatCompletionGenerator).
///
/// Every field has a default, so a config section only needs to name what
/// differs. The API key normally comes from the `API_KEY` environment
/// variable rather than a file.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[serde(default)]
#[builder(default, setter(into))]
pub struct GeneratorConfig {
    /// API root, without the `/chat/completions` suffix
    base_url: String,
    /// Model identifier
    model: String,
    /// Bearer token
    #[serde(skip_serializing)]
    api_key: Option<String>,
    /// Sent as `X-Channel-ID` when set
    channel_id: Option<String>,
    /// Sent as `X-User-ID` when set
    user_id: Option<String>,
    /// Optional system message sent before the prompt
    system_prompt: Option<String>,
    /// Text returned when the provider answers with empty content
    fallback_text: String,
    /// Request timeout in seconds
    timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.shapes.inc/v1".to_string(),
            model: "shapesinc/orind".to_string(),
            api_key: None,
            channel_id: Some("Facebook".to_string()),
            user_id: Some("Facebook-Posts".to_string()),
            system_prompt: None,
            fallback_text: "Thank you!".to_string(),
            timeout_secs: 30,
        }
    }
}

impl GeneratorConfig {
    /// Starts a builder seeded with the defaults.
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::default()
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Replaces the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Full URL of the completions endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
