#![forbid(unsafe_code)]
#![doc = r#"
OpenAI MCP

Expose OpenAI GPT-5 models as a single `openai_chat` tool over the Model
Context Protocol (JSON-RPC 2.0, line-delimited, stdio).

Crate highlights
- Library: boundary validation (`validation`), the Responses endpoint adapter
  (`client`), and outcome normalization (`normalize`) are usable standalone.
- Binary: stdio server wiring in `mcp`, bootstrap in `main`.
- Models: request/response models for the chat tool and the Responses API.

Modules
- `models`: Data structures for the tool contract and the Responses API.
- `validation`: Untyped arguments -> typed request, collecting all violations.
- `client`: Outbound call, reply-shape fallback extraction, failure classification.
- `normalize`: Fixed external payload shapes behind the `success` flag.
- `tools`: Tool registry and dispatch.
- `mcp`: Stdio JSON-RPC server loop.
- `util`: Shared helpers (tracing, env, HTTP client construction).

Note: Keep the reply extraction aligned with OpenAI docs; the Responses API
evolves over time.
"#]

pub mod client;
pub mod error;
pub mod mcp;
pub mod models;
pub mod normalize;
pub mod tools;
pub mod util;
pub mod validation;

// Re-export the primary entry points for ergonomic library use.
pub use crate::client::{ChatResponse, OpenAiApiError, OpenAiClient};
pub use crate::error::{ToolError, Violation};
pub use crate::validation::validate_chat_request;

// Re-export model namespaces for convenience (downstream users can do `use openai_mcp::chat`).
pub use crate::models::{chat, responses};
