//! Adapter behavior against a mocked Responses endpoint.
//!
//! No real API calls: wiremock stands in for upstream so reply-shape
//! fallbacks and failure classification stay hermetic.

use openai_mcp::client::OpenAiClient;
use openai_mcp::models::chat::{ChatInput, ChatRequest, Model, Reasoning, ReasoningEffort};
use serde_json::json;
use wiremock::matchers::{bearer_token, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn text_request(model: Model, input: &str) -> ChatRequest {
    ChatRequest {
        model,
        input: ChatInput::Text(input.into()),
        instructions: None,
        reasoning: None,
        text: None,
        max_tokens: None,
    }
}

fn client_for(server: &MockServer) -> OpenAiClient {
    OpenAiClient::new(reqwest::Client::new(), server.uri(), "test-key")
}

#[tokio::test]
async fn success_with_convenience_text_and_usage() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/responses"))
        .and(bearer_token("test-key"))
        .and(body_partial_json(json!({"model": "gpt-5-mini", "input": "ping"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "resp_1",
            "model": "gpt-5-mini",
            "output_text": "pong",
            "output": [],
            "usage": {"input_tokens": 2, "output_tokens": 3, "total_tokens": 5}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .send(&text_request(Model::Gpt5Mini, "ping"))
        .await
        .unwrap();

    assert_eq!(response.content, "pong");
    assert_eq!(response.model, "gpt-5-mini");
    let usage = response.usage.unwrap();
    assert_eq!(usage.prompt_tokens, Some(2));
    assert_eq!(usage.completion_tokens, Some(3));
    assert_eq!(usage.total_tokens, Some(5));
}

#[tokio::test]
async fn falls_back_to_first_output_item() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/responses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "resp_2",
            "output": [
                {"type": "message", "content": [{"type": "output_text", "text": "from the list"}]},
                {"type": "message", "content": [{"type": "output_text", "text": "not this one"}]}
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .send(&text_request(Model::Gpt5, "hello"))
        .await
        .unwrap();

    assert_eq!(response.content, "from the list");
    // No model echo in the reply: the requested id is the resolved one.
    assert_eq!(response.model, "gpt-5");
    assert!(response.usage.is_none());
    assert_eq!(response.output.unwrap().len(), 2);
}

#[tokio::test]
async fn empty_reply_normalizes_to_empty_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/responses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "resp_3"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client.send(&text_request(Model::Gpt5, "x")).await.unwrap();

    assert_eq!(response.content, "");
    assert!(response.usage.is_none());
    assert!(response.output.is_none());
}

#[tokio::test]
async fn outbound_payload_omits_absent_optionals() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/responses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"output_text": "ok"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.send(&text_request(Model::Gpt5, "x")).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let obj = body.as_object().unwrap();
    assert_eq!(obj.get("model"), Some(&json!("gpt-5")));
    assert_eq!(obj.get("input"), Some(&json!("x")));
    for absent in ["instructions", "reasoning", "text", "max_tokens"] {
        assert!(!obj.contains_key(absent), "{absent} must not be sent");
    }
}

#[tokio::test]
async fn outbound_payload_carries_present_optionals() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/responses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"output_text": "ok"})))
        .mount(&server)
        .await;

    let request = ChatRequest {
        model: Model::Gpt5,
        input: ChatInput::Text("x".into()),
        instructions: Some("Be brief.".into()),
        reasoning: Some(Reasoning {
            effort: ReasoningEffort::High,
        }),
        text: None,
        max_tokens: Some(128),
    };

    let client = client_for(&server);
    client.send(&request).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["instructions"], json!("Be brief."));
    assert_eq!(body["reasoning"], json!({"effort": "high"}));
    assert_eq!(body["max_tokens"], json!(128));
    assert!(!body.as_object().unwrap().contains_key("text"));
}

#[tokio::test]
async fn classifies_provider_error_with_code_and_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/responses"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {
                "message": "Rate limit reached for gpt-5",
                "type": "rate_limit_error",
                "code": "rate_limit_exceeded"
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .send(&text_request(Model::Gpt5, "x"))
        .await
        .unwrap_err();

    assert_eq!(err.code, "rate_limit_exceeded");
    assert_eq!(err.status, Some(429));
    assert_eq!(err.message, "OpenAI API Error: Rate limit reached for gpt-5");
}

#[tokio::test]
async fn classifies_error_type_when_code_is_absent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/responses"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"message": "Unknown parameter", "type": "invalid_request_error"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .send(&text_request(Model::Gpt5, "x"))
        .await
        .unwrap_err();

    assert_eq!(err.code, "invalid_request_error");
    assert_eq!(err.status, Some(400));
}

#[tokio::test]
async fn classifies_unparseable_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/responses"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .send(&text_request(Model::Gpt5, "x"))
        .await
        .unwrap_err();

    assert_eq!(err.code, "api_error");
    assert_eq!(err.status, Some(502));
    assert_eq!(err.message, "OpenAI API Error: HTTP 502");
}

#[tokio::test]
async fn classifies_transport_failure_as_unknown_error() {
    // Nothing listens here; the connect fails before any HTTP exchange.
    let client = OpenAiClient::new(reqwest::Client::new(), "http://127.0.0.1:9", "test-key");
    let err = client
        .send(&text_request(Model::Gpt5, "x"))
        .await
        .unwrap_err();

    assert_eq!(err.code, "unknown_error");
    assert!(err.message.starts_with("Unexpected error: "));
    assert_eq!(err.status, None);
}

#[tokio::test]
async fn accepts_legacy_usage_counter_naming() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/responses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output_text": "ok",
            "usage": {"prompt_tokens": 10, "completion_tokens": 4, "total_tokens": 14}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client.send(&text_request(Model::Gpt5, "x")).await.unwrap();

    let usage = response.usage.unwrap();
    assert_eq!(usage.prompt_tokens, Some(10));
    assert_eq!(usage.completion_tokens, Some(4));
    assert_eq!(usage.total_tokens, Some(14));
}

#[tokio::test]
async fn accepts_total_only_usage() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/responses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output_text": "ok",
            "usage": {"total_tokens": 9}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client.send(&text_request(Model::Gpt5, "x")).await.unwrap();

    let usage = response.usage.unwrap();
    assert_eq!(usage.prompt_tokens, None);
    assert_eq!(usage.completion_tokens, None);
    assert_eq!(usage.total_tokens, Some(9));
}
