use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

/// Token usage counters reported by the endpoint.
///
/// Every counter is optional: the endpoint has shipped two naming
/// generations (`prompt_tokens`/`completion_tokens` and the newer
/// `input_tokens`/`output_tokens`), and some replies carry only
/// `total_tokens`. Aliases accept both; absent counters stay absent and are
/// never reported as zero.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default, alias = "input_tokens")]
    pub prompt_tokens: Option<u64>,
    #[serde(default, alias = "output_tokens")]
    pub completion_tokens: Option<u64>,
    #[serde(default)]
    pub total_tokens: Option<u64>,
}

/// Reply envelope from `POST /responses`.
///
/// Only the fields the adapter interprets are typed; `output` stays raw so
/// callers can be handed the structured items verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponsesReply {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    /// Primary text output (convenience field; not present on all API versions).
    #[serde(default)]
    pub output_text: Option<String>,
    /// Structured output items, passed through uninterpreted.
    #[serde(default)]
    pub output: Option<Vec<Value>>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl ResponsesReply {
    /// Extract the primary output text.
    ///
    /// Fallback order, fixed because reply shapes have varied across API
    /// versions: `output_text`, then the first element of `output`, then "".
    pub fn primary_text(&self) -> String {
        if let Some(text) = &self.output_text {
            return text.clone();
        }
        self.output
            .as_deref()
            .and_then(|items| items.first())
            .and_then(item_text)
            .unwrap_or_default()
    }
}

/// Text of a single structured output item, if it carries any.
///
/// Accepts the shapes the endpoint has produced: a bare string, an item with
/// a `text` field, an item whose `content` is a string, or an item whose
/// `content` is a list of text-typed parts.
fn item_text(item: &Value) -> Option<String> {
    if let Some(s) = item.as_str() {
        return Some(s.to_string());
    }
    if let Some(t) = item.get("text").and_then(|t| t.as_str()) {
        return Some(t.to_string());
    }
    match item.get("content") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Array(parts)) => {
            let mut pieces: Vec<&str> = Vec::new();
            for p in parts {
                if let Some(ty) = p.get("type").and_then(|t| t.as_str()) {
                    if ty == "output_text" || ty == "text" {
                        if let Some(t) = p.get("text").and_then(|t| t.as_str()) {
                            pieces.push(t);
                        }
                    }
                }
            }
            if pieces.is_empty() {
                None
            } else {
                Some(pieces.concat())
            }
        }
        _ => None,
    }
}

/// Error body returned by the endpoint on non-2xx statuses:
/// `{ "error": { "message": ..., "type": ..., "code": ... } }`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
    /// Error class, e.g. "invalid_request_error".
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Machine-readable code, e.g. "rate_limit_exceeded".
    #[serde(default)]
    pub code: Option<String>,
}
