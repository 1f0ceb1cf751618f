//! Upstream adapter for the OpenAI Responses endpoint.
//!
//! Owns the single outbound call per invocation: payload construction,
//! bearer auth, reply normalization into [`ChatResponse`], and failure
//! classification. No retries; a call completes, times out, or errors.

use serde_json::Value;
use thiserror::Error;

use crate::error::ToolError;
use crate::models::chat::ChatRequest;
use crate::models::responses::{ApiErrorBody, ResponsesReply, Usage};

/// Normalized result of one upstream call.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatResponse {
    /// Output text; empty string when the reply carried none.
    pub content: String,
    /// Resolved model identifier (upstream echo, or the requested one).
    pub model: String,
    /// Token accounting, only when upstream supplied it.
    pub usage: Option<Usage>,
    /// Raw structured output items, passed through verbatim.
    pub output: Option<Vec<Value>>,
}

/// Classified upstream failure.
///
/// `code` is the provider's machine-readable code when one was reported,
/// "unknown_error" otherwise.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct OpenAiApiError {
    pub code: String,
    pub message: String,
    pub status: Option<u16>,
}

impl OpenAiApiError {
    /// Transport or decode failure: no provider-reported code available.
    fn unexpected(err: impl std::fmt::Display) -> Self {
        Self {
            code: "unknown_error".into(),
            message: format!("Unexpected error: {err}"),
            status: None,
        }
    }

    /// Classify a non-2xx reply from the provider's error body.
    fn from_error_reply(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ApiErrorBody>(body) {
            Ok(parsed) => {
                let code = parsed
                    .error
                    .code
                    .or(parsed.error.kind)
                    .unwrap_or_else(|| "api_error".into());
                let message = parsed
                    .error
                    .message
                    .unwrap_or_else(|| format!("HTTP {status}"));
                Self {
                    code,
                    message: format!("OpenAI API Error: {message}"),
                    status: Some(status),
                }
            }
            Err(_) => Self {
                code: "api_error".into(),
                message: format!("OpenAI API Error: HTTP {status}"),
                status: Some(status),
            },
        }
    }
}

impl From<OpenAiApiError> for ToolError {
    fn from(err: OpenAiApiError) -> Self {
        ToolError::Upstream {
            code: err.code,
            message: err.message,
            status: err.status,
        }
    }
}

/// Client for the Responses endpoint.
///
/// Holds the process-wide `reqwest::Client` (timeout and proxies baked in at
/// construction) plus the base URL and credential. Cheap to share by
/// reference; no per-request mutable state.
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http,
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Perform exactly one generation call and normalize the reply.
    ///
    /// The request serializes directly as the outbound payload: optional
    /// fields absent on the request are omitted, never sent as null.
    pub async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, OpenAiApiError> {
        let url = format!("{}/responses", self.base_url);
        tracing::info!(model = request.model.as_str(), "making OpenAI responses request");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(OpenAiApiError::unexpected)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.bytes().await.unwrap_or_default();
            return Err(OpenAiApiError::from_error_reply(status.as_u16(), &body));
        }

        let reply: ResponsesReply = resp.json().await.map_err(OpenAiApiError::unexpected)?;

        match reply.usage.as_ref().and_then(|u| u.total_tokens) {
            Some(total) => tracing::info!(total_tokens = total, "OpenAI response received"),
            None => tracing::info!(total_tokens = "unknown", "OpenAI response received"),
        }

        Ok(ChatResponse {
            content: reply.primary_text(),
            model: reply
                .model
                .unwrap_or_else(|| request.model.as_str().to_string()),
            usage: reply.usage,
            output: reply.output,
        })
    }
}
