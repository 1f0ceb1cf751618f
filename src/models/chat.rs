use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Supported model identifiers.
///
/// Uses the wire names of the OpenAI Responses API:
/// "gpt-5" | "gpt-5-mini"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Model {
    #[serde(rename = "gpt-5")]
    Gpt5,
    #[serde(rename = "gpt-5-mini")]
    Gpt5Mini,
}

impl Model {
    /// All supported identifiers, in the order they are advertised.
    pub const ALL: [Model; 2] = [Model::Gpt5, Model::Gpt5Mini];

    pub fn as_str(&self) -> &'static str {
        match self {
            Model::Gpt5 => "gpt-5",
            Model::Gpt5Mini => "gpt-5-mini",
        }
    }

    /// Parse a wire identifier; `None` for anything outside the supported set.
    pub fn parse(s: &str) -> Option<Model> {
        Model::ALL.iter().copied().find(|m| m.as_str() == s)
    }
}

/// Message role enumeration.
///
/// Lowercase serialization to match the Responses API:
/// "developer" | "user" | "assistant"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Developer,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Developer => "developer",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "developer" => Some(Role::Developer),
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            _ => None,
        }
    }
}

/// A single conversation message. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    /// Non-empty text content (enforced by the validator).
    pub content: String,
}

/// Input for the model: a plain text prompt or an ordered conversation.
///
/// Serialized untagged so the outbound payload carries either a JSON string
/// or an array of message objects, exactly as the endpoint expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatInput {
    Text(String),
    Messages(Vec<Message>),
}

/// Reasoning effort levels, ordered from cheapest to most thorough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    Minimal,
    Low,
    Medium,
    High,
}

impl ReasoningEffort {
    pub const ALL: [ReasoningEffort; 4] = [
        ReasoningEffort::Minimal,
        ReasoningEffort::Low,
        ReasoningEffort::Medium,
        ReasoningEffort::High,
    ];

    pub fn parse(s: &str) -> Option<ReasoningEffort> {
        match s {
            "minimal" => Some(ReasoningEffort::Minimal),
            "low" => Some(ReasoningEffort::Low),
            "medium" => Some(ReasoningEffort::Medium),
            "high" => Some(ReasoningEffort::High),
            _ => None,
        }
    }
}

/// Reasoning configuration forwarded to the endpoint when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reasoning {
    pub effort: ReasoningEffort,
}

/// Output verbosity levels for text generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Low,
    Medium,
    High,
}

impl Verbosity {
    pub fn parse(s: &str) -> Option<Verbosity> {
        match s {
            "low" => Some(Verbosity::Low),
            "medium" => Some(Verbosity::Medium),
            "high" => Some(Verbosity::High),
            _ => None,
        }
    }
}

/// Text output options (verbosity hint).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextOptions {
    pub verbosity: Verbosity,
}

/// A validated chat request.
///
/// This type doubles as the outbound `/responses` payload: absent optional
/// fields are omitted during serialization, never sent as null.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: Model,
    pub input: ChatInput,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub reasoning: Option<Reasoning>,
    #[serde(default)]
    pub text: Option<TextOptions>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}
