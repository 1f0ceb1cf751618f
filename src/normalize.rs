//! Packaging of call outcomes into the stable external contract.
//!
//! Every outcome, success or failure, becomes a JSON payload with a
//! `success` flag, serialized pretty-printed into a single text content
//! block. Callers branch on the flag, never on transport-level failure.
//! Optional fields absent from the outcome are omitted, never null.

use serde_json::{json, Map, Value};

use crate::client::ChatResponse;
use crate::error::ToolError;

/// Success payload:
/// `{ "success": true, "response": ..., "model": ..., "usage": <omitted if absent> }`
pub fn success_payload(response: &ChatResponse) -> Value {
    let mut root = Map::new();
    root.insert("success".into(), Value::Bool(true));
    root.insert("response".into(), Value::String(response.content.clone()));
    root.insert("model".into(), Value::String(response.model.clone()));
    if let Some(usage) = &response.usage {
        // Usage serialization skips absent counters itself.
        if let Ok(v) = serde_json::to_value(usage) {
            root.insert("usage".into(), v);
        }
    }
    Value::Object(root)
}

/// Failure payload for the given error kind (§ fixed shapes, one per variant).
pub fn error_payload(err: &ToolError) -> Value {
    match err {
        ToolError::Validation(violations) => json!({
            "success": false,
            "error": "Invalid input parameters",
            "details": violations,
        }),
        ToolError::Upstream {
            code,
            message,
            status,
        } => {
            let mut root = Map::new();
            root.insert("success".into(), Value::Bool(false));
            root.insert("error".into(), Value::String("OpenAI API error".into()));
            root.insert("message".into(), Value::String(message.clone()));
            root.insert("code".into(), Value::String(code.clone()));
            if let Some(status) = status {
                root.insert("status".into(), Value::Number((*status).into()));
            }
            Value::Object(root)
        }
        ToolError::Unexpected(message) => json!({
            "success": false,
            "error": "Unexpected error occurred",
            "message": message,
        }),
    }
}

/// Dispatcher-level catch-all, e.g. for an unknown tool name.
pub fn execution_failure_payload(message: &str) -> Value {
    json!({
        "success": false,
        "error": "Tool execution failed",
        "message": message,
    })
}

/// Wrap a payload as the tool result: one pretty-printed text content block.
pub fn text_content_result(payload: &Value) -> Value {
    let text = serde_json::to_string_pretty(payload)
        .unwrap_or_else(|_| String::from("{\"success\":false}"));
    json!({
        "content": [{ "type": "text", "text": text }]
    })
}
