//! Tool registry and dispatch.
//!
//! One tool is exposed: `openai_chat`. The registry maps tool names to
//! handlers and enumerates definitions for `tools/list`; dispatch converts
//! every handler outcome into a payload so no error escapes to the
//! transport layer.

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{json, Value};

use crate::client::OpenAiClient;
use crate::error::ToolError;
use crate::normalize;
use crate::validation::validate_chat_request;

pub const OPENAI_CHAT_TOOL: &str = "openai_chat";

/// Tool definition advertised via `tools/list`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Handler for a single named tool. Returns the normalized payload; never
/// errors outward.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, arguments: &Value) -> Value;
}

/// JSON Schema for the chat tool's input, mirroring the validated contract.
static OPENAI_CHAT_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "model": {
                "type": "string",
                "enum": ["gpt-5", "gpt-5-mini"],
                "description": "Model to use. GPT-5 for best performance, GPT-5-mini for faster/cheaper responses"
            },
            "input": {
                "oneOf": [
                    {
                        "type": "string",
                        "description": "Simple text input"
                    },
                    {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "role": {
                                    "type": "string",
                                    "enum": ["developer", "user", "assistant"],
                                    "description": "Message role"
                                },
                                "content": {
                                    "type": "string",
                                    "description": "Message content"
                                }
                            },
                            "required": ["role", "content"]
                        },
                        "description": "Array of messages in the conversation",
                        "minItems": 1
                    }
                ],
                "description": "Input for the model - can be a string or array of messages"
            },
            "instructions": {
                "type": "string",
                "description": "System-level instructions for the model (optional)"
            },
            "reasoning": {
                "type": "object",
                "properties": {
                    "effort": {
                        "type": "string",
                        "enum": ["minimal", "low", "medium", "high"],
                        "description": "Level of reasoning effort to apply"
                    }
                },
                "required": ["effort"],
                "description": "Reasoning configuration (optional)"
            },
            "text": {
                "type": "object",
                "properties": {
                    "verbosity": {
                        "type": "string",
                        "enum": ["low", "medium", "high"],
                        "description": "Output verbosity"
                    }
                },
                "required": ["verbosity"],
                "description": "Text output configuration (optional)"
            },
            "max_tokens": {
                "type": "number",
                "minimum": 1,
                "description": "Maximum number of tokens to generate in response"
            }
        },
        "required": ["model", "input"]
    })
});

pub fn openai_chat_definition() -> ToolDefinition {
    ToolDefinition {
        name: OPENAI_CHAT_TOOL.into(),
        description: "Chat with OpenAI models including GPT-5 and GPT-5-mini. \
            GPT-5 offers best performance with a 400k context window and configurable \
            reasoning effort. GPT-5-mini provides faster, cost-effective responses."
            .into(),
        input_schema: OPENAI_CHAT_SCHEMA.clone(),
    }
}

/// The `openai_chat` handler: validate, call upstream, normalize.
pub struct ChatTool {
    client: Arc<OpenAiClient>,
}

impl ChatTool {
    pub fn new(client: Arc<OpenAiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for ChatTool {
    async fn call(&self, arguments: &Value) -> Value {
        let request = match validate_chat_request(arguments) {
            Ok(request) => request,
            Err(violations) => {
                tracing::warn!(
                    violations = violations.len(),
                    "chat tool rejected invalid arguments"
                );
                return normalize::error_payload(&ToolError::Validation(violations));
            }
        };

        match self.client.send(&request).await {
            Ok(response) => normalize::success_payload(&response),
            Err(err) => {
                tracing::error!(code = %err.code, "OpenAI API error: {}", err.message);
                normalize::error_payload(&err.into())
            }
        }
    }
}

/// Name → handler lookup table plus the advertised definitions.
pub struct ToolRegistry {
    tools: Vec<(ToolDefinition, Arc<dyn ToolHandler>)>,
}

impl ToolRegistry {
    /// Registry with the one chat tool wired to the given client.
    pub fn new(client: Arc<OpenAiClient>) -> Self {
        Self {
            tools: vec![(
                openai_chat_definition(),
                Arc::new(ChatTool::new(client)) as Arc<dyn ToolHandler>,
            )],
        }
    }

    pub fn definitions(&self) -> Vec<&ToolDefinition> {
        self.tools.iter().map(|(def, _)| def).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Dispatch a call by tool name. Unknown names yield the catch-all
    /// failure payload rather than a protocol error, matching the tool
    /// contract that callers branch on `success`.
    pub async fn dispatch(&self, name: &str, arguments: &Value) -> Value {
        match self
            .tools
            .iter()
            .find(|(def, _)| def.name == name)
            .map(|(_, handler)| handler)
        {
            Some(handler) => handler.call(arguments).await,
            None => {
                tracing::error!(tool = name, "unknown tool requested");
                normalize::execution_failure_payload(&format!("Unknown tool: {name}"))
            }
        }
    }
}
