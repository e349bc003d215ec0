//! Graph API gateway.

use super::dto::{
    GraphComment, GraphConversation, GraphErrorEnvelope, GraphList, GraphMessage, GraphPost,
};
use super::{GraphConfig, GraphSession};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{Value as JsonValue, json};
use tracing::{debug, instrument, warn};
use vasari_core::{Comment, ConversationThread, DirectMessage, Post, Receipt};
use vasari_error::{PlatformError, PlatformErrorKind, PlatformResult, is_transient_status};
use vasari_interface::PlatformGateway;

/// Fields requested for each edge.
const POST_FIELDS: &str = "id,message";
const COMMENT_FIELDS: &str = "id,message,from";
const THREAD_FIELDS: &str = "id,unread_count";
const MESSAGE_FIELDS: &str = "id,message,from";

/// Platform gateway over the official Graph API.
///
/// The gateway acts as the page: its account id is the page id, and the
/// session's page access token authorizes every call.
#[derive(Debug, Clone)]
pub struct GraphApiGateway {
    session: GraphSession,
    config: GraphConfig,
    client: reqwest::Client,
}

impl GraphApiGateway {
    /// Creates a gateway for the session's page.
    ///
    /// # Errors
    ///
    /// Returns an authentication error if the page id or token is empty, and
    /// a read error if the HTTP client cannot be built.
    #[instrument(
        skip(session, config),
        fields(page_id = %session.page_id(), base_url = %config.base_url())
    )]
    pub fn new(session: GraphSession, config: GraphConfig) -> PlatformResult<Self> {
        if session.page_id().trim().is_empty() {
            return Err(PlatformError::new(PlatformErrorKind::Authentication(
                "Page id cannot be empty".to_string(),
            )));
        }
        if session.access_token().trim().is_empty() {
            return Err(PlatformError::new(PlatformErrorKind::Authentication(
                "Page access token cannot be empty".to_string(),
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                PlatformError::new(PlatformErrorKind::Read(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;

        debug!("Created Graph API gateway");
        Ok(Self {
            session,
            config,
            client,
        })
    }

    /// Connection settings.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.config.url(path))
            .query(&[("access_token", self.session.access_token())])
    }

    /// Sends a request and decodes the JSON body, mapping failures to `kind`.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        kind: fn(String) -> PlatformErrorKind,
    ) -> PlatformResult<T> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Graph API request failed");
            PlatformError::transient(kind(format!("Request failed: {}", e)))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            PlatformError::transient(kind(format!("Failed to read response body: {}", e)))
        })?;

        if !status.is_success() {
            return Err(classify_failure(status.as_u16(), &body, kind));
        }

        serde_json::from_str(&body).map_err(|e| {
            PlatformError::new(kind(format!("Unexpected Graph API response: {}", e)))
        })
    }
}

/// Maps a non-2xx Graph response onto a platform error.
fn classify_failure(
    status: u16,
    body: &str,
    kind: fn(String) -> PlatformErrorKind,
) -> PlatformError {
    let envelope = serde_json::from_str::<GraphErrorEnvelope>(body).ok();
    let message = match &envelope {
        Some(envelope) => format!("HTTP {} {}", status, envelope.error.describe()),
        None => format!("HTTP {}", status),
    };
    warn!(status, message = %message, "Graph API returned error");

    let auth = status == 401
        || status == 403
        || envelope.as_ref().is_some_and(|e| e.error.is_auth());
    if auth {
        return PlatformError::new(PlatformErrorKind::Authentication(message));
    }

    let throttled = envelope.as_ref().is_some_and(|e| e.error.is_throttle());
    if throttled || is_transient_status(status) {
        PlatformError::transient(kind(message))
    } else {
        PlatformError::new(kind(message))
    }
}

#[async_trait]
impl PlatformGateway for GraphApiGateway {
    fn transport_name(&self) -> &str {
        "graph"
    }

    fn account_id(&self) -> &str {
        self.session.page_id()
    }

    #[instrument(skip(self, text), fields(transport = "graph", text_len = text.len()))]
    async fn publish_post(&self, page_id: &str, text: &str) -> PlatformResult<Receipt> {
        let request = self
            .request(Method::POST, &format!("{}/feed", page_id))
            .json(&json!({ "message": text }));
        let value: JsonValue = self.send(request, PlatformErrorKind::Publish).await?;
        debug!("Published post");
        Ok(Receipt::new(value))
    }

    #[instrument(skip(self), fields(transport = "graph"))]
    async fn list_recent_posts(&self, page_id: &str, limit: u32) -> PlatformResult<Vec<Post>> {
        let request = self
            .request(Method::GET, &format!("{}/posts", page_id))
            .query(&[("fields", POST_FIELDS.to_string()), ("limit", limit.to_string())]);
        let list: GraphList<GraphPost> = self.send(request, PlatformErrorKind::Read).await?;
        debug!(count = list.data.len(), "Fetched recent posts");
        Ok(list.data.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self), fields(transport = "graph"))]
    async fn list_comments(&self, post_id: &str, limit: u32) -> PlatformResult<Vec<Comment>> {
        let request = self
            .request(Method::GET, &format!("{}/comments", post_id))
            .query(&[("fields", COMMENT_FIELDS.to_string()), ("limit", limit.to_string())]);
        let list: GraphList<GraphComment> = self.send(request, PlatformErrorKind::Read).await?;
        debug!(count = list.data.len(), "Fetched comments");
        Ok(list.data.into_iter().map(Comment::from).collect())
    }

    #[instrument(skip(self, text), fields(transport = "graph", text_len = text.len()))]
    async fn reply_to_comment(&self, comment_id: &str, text: &str) -> PlatformResult<Receipt> {
        let request = self
            .request(Method::POST, &format!("{}/comments", comment_id))
            .json(&json!({ "message": text }));
        let value: JsonValue = self.send(request, PlatformErrorKind::Reply).await?;
        Ok(Receipt::new(value))
    }

    #[instrument(skip(self), fields(transport = "graph"))]
    async fn list_recent_threads(&self, limit: u32) -> PlatformResult<Vec<ConversationThread>> {
        let request = self
            .request(
                Method::GET,
                &format!("{}/conversations", self.session.page_id()),
            )
            .query(&[("fields", THREAD_FIELDS.to_string()), ("limit", limit.to_string())]);
        let list: GraphList<GraphConversation> =
            self.send(request, PlatformErrorKind::Read).await?;
        debug!(count = list.data.len(), "Fetched conversation threads");
        Ok(list.data.into_iter().map(ConversationThread::from).collect())
    }

    #[instrument(skip(self), fields(transport = "graph"))]
    async fn get_latest_message(&self, thread_id: &str) -> PlatformResult<DirectMessage> {
        let request = self
            .request(Method::GET, &format!("{}/messages", thread_id))
            .query(&[("fields", MESSAGE_FIELDS), ("limit", "1")]);
        let list: GraphList<GraphMessage> = self.send(request, PlatformErrorKind::Read).await?;

        let latest = list.data.into_iter().next().ok_or_else(|| {
            PlatformError::new(PlatformErrorKind::Read(format!(
                "Thread {} has no messages",
                thread_id
            )))
        })?;
        let sender = latest.from.ok_or_else(|| {
            PlatformError::new(PlatformErrorKind::Read(format!(
                "Latest message {} in thread {} has no sender",
                latest.id, thread_id
            )))
        })?;

        Ok(DirectMessage::new(latest.id, sender.id, latest.message))
    }

    #[instrument(skip(self, text), fields(transport = "graph", text_len = text.len()))]
    async fn send_direct_message(&self, recipient_id: &str, text: &str) -> PlatformResult<Receipt> {
        let request = self
            .request(
                Method::POST,
                &format!("{}/messages", self.session.page_id()),
            )
            .json(&json!({
                "recipient": { "id": recipient_id },
                "message": { "text": text },
                "messaging_type": "RESPONSE",
            }));
        let value: JsonValue = self.send(request, PlatformErrorKind::Send).await?;
        Ok(Receipt::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_error(message: &str, code: u32) -> String {
        json!({ "error": { "message": message, "type": "OAuthException", "code": code } })
            .to_string()
    }

    #[test]
    fn expired_token_is_authentication() {
        let body = graph_error("Session has expired", 190);
        let err = classify_failure(400, &body, PlatformErrorKind::Publish);
        assert!(matches!(err.kind, PlatformErrorKind::Authentication(_)));
        assert!(!err.transient);
    }

    #[test]
    fn throttling_code_is_transient() {
        let body = r#"{"error":{"message":"Too many calls","code":4}}"#;
        let err = classify_failure(400, body, PlatformErrorKind::Reply);
        assert!(matches!(err.kind, PlatformErrorKind::Reply(_)));
        assert!(err.transient);
    }

    #[test]
    fn unparsable_error_body_keeps_status() {
        let err = classify_failure(502, "<html>", PlatformErrorKind::Read);
        assert_eq!(err.kind, PlatformErrorKind::Read("HTTP 502".to_string()));
        assert!(err.transient);
    }

    #[test]
    fn bad_request_is_permanent() {
        let body = graph_error("Invalid parameter", 100);
        let err = classify_failure(400, &body, PlatformErrorKind::Send);
        match err.kind {
            PlatformErrorKind::Send(message) => {
                assert!(message.contains("Invalid parameter"));
                assert!(message.contains("(100)"));
            }
            other => panic!("unexpected kind: {other:?}"),
        }
        assert!(!err.transient);
    }

    #[test]
    fn empty_credentials_are_rejected() {
        let err = GraphApiGateway::new(GraphSession::new("42", ""), GraphConfig::default())
            .unwrap_err();
        assert!(matches!(err.kind, PlatformErrorKind::Authentication(_)));
        assert!(GraphApiGateway::new(GraphSession::new(" ", "t"), GraphConfig::default()).is_err());
    }
}
