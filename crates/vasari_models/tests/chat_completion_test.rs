use serde_json::json;
use vasari_error::{GenerationErrorKind, RetryableError};
use vasari_interface::TextGenerator;
use vasari_models::{ChatCompletionGenerator, GeneratorConfig};
use vasari_retry::{RetryPolicy, Retrying};
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn generator_for(server: &MockServer) -> ChatCompletionGenerator {
    let config = GeneratorConfig::builder()
        .base_url(server.uri())
        .api_key(Some("test-key".to_string()))
        .fallback_text("fallback")
        .build()
        .unwrap();
    ChatCompletionGenerator::new(config).unwrap()
}

fn completion(content: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "cmpl-1",
        "model": "shapesinc/orind",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    }))
}

#[tokio::test]
async fn sends_prompt_with_auth_and_channel_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .and(header("X-Channel-ID", "Facebook"))
        .and(header("X-User-ID", "Facebook-Posts"))
        .and(body_partial_json(json!({
            "model": "shapesinc/orind",
            "messages": [{ "role": "user", "content": "Write a short post." }]
        })))
        .respond_with(completion(json!("A calm morning.")))
        .expect(1)
        .mount(&server)
        .await;

    let text = generator_for(&server)
        .generate("Write a short post.")
        .await
        .unwrap();
    assert_eq!(text, "A calm morning.");
}

#[tokio::test]
async fn request_body_carries_only_model_and_messages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_json(json!({
            "model": "shapesinc/orind",
            "messages": [{ "role": "user", "content": "Say hi." }]
        })))
        .respond_with(completion(json!("Hi!")))
        .expect(1)
        .mount(&server)
        .await;

    let text = generator_for(&server).generate("Say hi.").await.unwrap();
    assert_eq!(text, "Hi!");
}

#[tokio::test]
async fn keeps_only_first_trimmed_line() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion(json!("  First line.  \r\nSecond line.\nThird.")))
        .mount(&server)
        .await;

    let text = generator_for(&server).generate("p").await.unwrap();
    assert_eq!(text, "First line.");
}

#[tokio::test]
async fn null_content_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion(serde_json::Value::Null))
        .mount(&server)
        .await;

    let text = generator_for(&server).generate("p").await.unwrap();
    assert_eq!(text, "fallback");
}

#[tokio::test]
async fn missing_choices_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "x" })))
        .mount(&server)
        .await;

    let err = generator_for(&server).generate("p").await.unwrap_err();
    assert!(matches!(err.kind, GenerationErrorKind::MalformedResponse(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn empty_choices_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = generator_for(&server).generate("p").await.unwrap_err();
    assert!(matches!(err.kind, GenerationErrorKind::MalformedResponse(_)));
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = generator_for(&server).generate("p").await.unwrap_err();
    assert!(matches!(err.kind, GenerationErrorKind::MalformedResponse(_)));
}

#[tokio::test]
async fn error_status_is_reported_with_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("{\"error\":\"bad key\"}"))
        .mount(&server)
        .await;

    let err = generator_for(&server).generate("p").await.unwrap_err();
    match err.kind {
        GenerationErrorKind::Status {
            status_code,
            ref message,
        } => {
            assert_eq!(status_code, 401);
            assert!(message.contains("bad key"));
        }
        ref other => panic!("unexpected error kind: {other:?}"),
    }
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn throttled_request_succeeds_on_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion(json!("Recovered.")))
        .mount(&server)
        .await;

    let generator = Retrying::new(generator_for(&server), RetryPolicy::new(2, 1));
    assert_eq!(generator.generate("p").await.unwrap(), "Recovered.");
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_ignored() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion(json!("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let config = GeneratorConfig::builder()
        .base_url(format!("{}/", server.uri()))
        .api_key(Some("k".to_string()))
        .build()
        .unwrap();
    let generator = ChatCompletionGenerator::new(config).unwrap();
    assert_eq!(generator.generate("p").await.unwrap(), "ok");
}
