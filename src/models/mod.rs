//! Data models for the chat tool and the Responses API.
//!
//! This module groups two submodules:
//! - `chat`: The validated chat request accepted by the tool, which also serves
//!   as the outbound Responses API payload.
//! - `responses`: Types representing the subset of the Responses API reply that
//!   the adapter interprets, plus the endpoint's error body.
//!
//! Validation of untyped caller input into `chat::ChatRequest` is implemented
//! in `crate::validation`.

pub mod chat;
pub mod responses;

// Optional convenience re-exports for downstream users.
// These allow importing commonly-used types directly from `openai_mcp::models::*`.
pub use chat::{ChatInput, ChatRequest, Message, Model, Reasoning, ReasoningEffort, Role};
pub use responses::{ApiErrorBody, ResponsesReply, Usage};
