//! MCP stdio server: line-delimited JSON-RPC 2.0 over stdin/stdout.
//!
//! One frame per line. Requests are handled one at a time in arrival order;
//! the only await point inside a call is the upstream HTTP request. All
//! diagnostics go to stderr via `tracing` because stdout carries the
//! protocol.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::tools::ToolRegistry;

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "OpenAI Multi-Model MCP Server";

/// JSON-RPC 2.0 frame (request, response, or notification).
///
/// `id` stays a raw `Value`: the protocol allows string and number ids and
/// the response must echo whichever the caller used.
#[derive(Debug, Serialize, Deserialize)]
struct JsonRpcMessage {
    jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    params: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

const PARSE_ERROR: i32 = -32700;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;

/// The tool server: a registry plus the protocol loop around it.
pub struct McpServer {
    registry: ToolRegistry,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Serve until stdin closes. Each input line is one frame; notifications
    /// produce no output line.
    pub async fn run_stdio(&self) -> Result<()> {
        let mut reader = BufReader::new(io::stdin());
        let mut stdout = io::stdout();
        let mut line = String::new();

        tracing::info!("server connected and ready");

        loop {
            line.clear();
            let n = reader.read_line(&mut line).await?;
            if n == 0 {
                break; // EOF
            }
            let frame = line.trim();
            if frame.is_empty() {
                continue;
            }

            if let Some(reply) = self.handle_frame(frame).await {
                let mut out = serde_json::to_string(&reply)?;
                out.push('\n');
                stdout.write_all(out.as_bytes()).await?;
                stdout.flush().await?;
            }
        }

        tracing::info!("stdin closed; shutting down");
        Ok(())
    }

    /// Handle one raw frame. Returns the response frame, or `None` for
    /// notifications and responses (which expect no reply).
    pub async fn handle_frame(&self, frame: &str) -> Option<Value> {
        let message: JsonRpcMessage = match serde_json::from_str(frame) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!("unparseable frame: {e}");
                return Some(error_frame(Value::Null, PARSE_ERROR, "Parse error"));
            }
        };

        let method = message.method.as_deref()?;

        match message.id {
            Some(id) => Some(self.handle_request(id, method, message.params).await),
            None => {
                self.handle_notification(method);
                None
            }
        }
    }

    async fn handle_request(&self, id: Value, method: &str, params: Option<Value>) -> Value {
        match method {
            "initialize" => result_frame(
                id,
                json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": { "tools": {} },
                    "serverInfo": {
                        "name": SERVER_NAME,
                        "version": env!("CARGO_PKG_VERSION"),
                    }
                }),
            ),
            "ping" => result_frame(id, json!({})),
            "tools/list" => {
                tracing::info!(count = self.registry.len(), "listing available tools");
                result_frame(id, json!({ "tools": self.registry.definitions() }))
            }
            "tools/call" => self.handle_tool_call(id, params).await,
            other => {
                tracing::warn!(method = other, "method not found");
                error_frame(id, METHOD_NOT_FOUND, &format!("Method not found: {other}"))
            }
        }
    }

    async fn handle_tool_call(&self, id: Value, params: Option<Value>) -> Value {
        let params = match params {
            Some(Value::Object(p)) => p,
            _ => return error_frame(id, INVALID_PARAMS, "Expected params object"),
        };
        let name = match params.get("name").and_then(|n| n.as_str()) {
            Some(name) => name.to_string(),
            None => return error_frame(id, INVALID_PARAMS, "Missing tool name"),
        };
        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| json!({}));

        tracing::info!(tool = %name, "tool called");
        let payload = self.registry.dispatch(&name, &arguments).await;
        result_frame(id, crate::normalize::text_content_result(&payload))
    }

    fn handle_notification(&self, method: &str) {
        match method {
            "notifications/initialized" => {
                tracing::info!("client initialized");
            }
            other => {
                tracing::debug!(method = other, "ignoring notification");
            }
        }
    }
}

fn result_frame(id: Value, result: Value) -> Value {
    frame_value(JsonRpcMessage {
        jsonrpc: "2.0".to_string(),
        id: Some(id),
        method: None,
        params: None,
        result: Some(result),
        error: None,
    })
}

fn error_frame(id: Value, code: i32, message: &str) -> Value {
    frame_value(JsonRpcMessage {
        jsonrpc: "2.0".to_string(),
        id: Some(id),
        method: None,
        params: None,
        result: None,
        error: Some(JsonRpcError {
            code,
            message: message.to_string(),
            data: None,
        }),
    })
}

fn frame_value(frame: JsonRpcMessage) -> Value {
    serde_json::to_value(&frame).unwrap_or_else(|_| json!({ "jsonrpc": "2.0" }))
}
