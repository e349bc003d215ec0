//! Graph API connection settings and session.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where and how to reach the Graph API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct GraphConfig {
    /// API root (e.g., "https://graph.facebook.com")
    base_url: String,
    /// Version path segment (e.g., "v19.0")
    api_version: String,
    /// Request timeout in seconds
    timeout_secs: u64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            base_url: "https://graph.facebook.com".to_string(),
            api_version: "v19.0".to_string(),
            timeout_secs: 30,
        }
    }
}

impl GraphConfig {
    /// Creates a config.
    pub fn new(
        base_url: impl Into<String>,
        api_version: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_version: api_version.into(),
            timeout_secs,
        }
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Absolute URL for a node or edge path such as `123/feed`.
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let version = self.api_version.trim_matches('/');
        if version.is_empty() {
            format!("{}/{}", base, path)
        } else {
            format!("{}/{}/{}", base, version, path)
        }
    }
}

/// Page credentials, handed to the gateway at construction.
#[derive(Clone, PartialEq, Eq)]
pub struct GraphSession {
    page_id: String,
    access_token: String,
}

impl GraphSession {
    /// Creates a session for `page_id`.
    pub fn new(page_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            page_id: page_id.into(),
            access_token: access_token.into(),
        }
    }

    /// Page the token belongs to.
    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    /// Page access token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl std::fmt::Debug for GraphSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphSession")
            .field("page_id", &self.page_id)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_version_and_path() {
        let config = GraphConfig::new("https://graph.example.com/", "v19.0", 5);
        assert_eq!(config.url("42/feed"), "https://graph.example.com/v19.0/42/feed");
    }

    #[test]
    fn empty_version_is_skipped() {
        let config = GraphConfig::new("http://localhost:9000", "", 5);
        assert_eq!(config.url("42/feed"), "http://localhost:9000/42/feed");
    }

    #[test]
    fn debug_hides_token() {
        let session = GraphSession::new("42", "secret-token");
        let shown = format!("{:?}", session);
        assert!(shown.contains("42"));
        assert!(!shown.contains("secret-token"));
    }
}
