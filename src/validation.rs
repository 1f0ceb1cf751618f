//! Boundary validation of untyped tool arguments.
//!
//! Produces either a well-typed [`ChatRequest`] or the full list of violated
//! constraints. Validation never short-circuits: a request missing `model`
//! and carrying a bad `reasoning.effort` reports both. Pure; no network.

use serde_json::Value;

use crate::error::Violation;
use crate::models::chat::{
    ChatInput, ChatRequest, Message, Model, Reasoning, ReasoningEffort, Role, TextOptions,
    Verbosity,
};

const SUPPORTED_MODELS: &str = "'gpt-5' | 'gpt-5-mini'";
const SUPPORTED_EFFORTS: &str = "'minimal' | 'low' | 'medium' | 'high'";
const SUPPORTED_VERBOSITY: &str = "'low' | 'medium' | 'high'";

/// Validate arbitrary JSON into a [`ChatRequest`].
///
/// On failure returns one [`Violation`] per broken constraint, each carrying
/// the dotted field path and a human-readable message.
pub fn validate_chat_request(value: &Value) -> Result<ChatRequest, Vec<Violation>> {
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => {
            return Err(vec![Violation::new("", "Expected an object")]);
        }
    };

    let mut violations = Vec::new();

    let model = match obj.get("model") {
        None => {
            violations.push(Violation::new("model", "Required"));
            None
        }
        Some(Value::String(s)) => {
            let parsed = Model::parse(s);
            if parsed.is_none() {
                violations.push(Violation::new(
                    "model",
                    format!("Invalid enum value. Expected {SUPPORTED_MODELS}, received '{s}'"),
                ));
            }
            parsed
        }
        Some(_) => {
            violations.push(Violation::new("model", "Expected a string"));
            None
        }
    };

    let input = match obj.get("input") {
        None => {
            violations.push(Violation::new("input", "Required"));
            None
        }
        Some(Value::String(s)) => {
            if s.is_empty() {
                violations.push(Violation::new("input", "Input cannot be empty"));
                None
            } else {
                Some(ChatInput::Text(s.clone()))
            }
        }
        Some(Value::Array(items)) => validate_messages(items, &mut violations),
        Some(_) => {
            violations.push(Violation::new(
                "input",
                "Expected a string or an array of messages",
            ));
            None
        }
    };

    let instructions = match obj.get("instructions") {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            violations.push(Violation::new("instructions", "Expected a string"));
            None
        }
    };

    let reasoning = match obj.get("reasoning") {
        None => None,
        Some(v) => validate_reasoning(v, &mut violations),
    };

    let text = match obj.get("text") {
        None => None,
        Some(v) => validate_text(v, &mut violations),
    };

    let max_tokens = match obj.get("max_tokens") {
        None => None,
        Some(v) => {
            let n = v.as_u64().filter(|n| *n >= 1 && *n <= u64::from(u32::MAX));
            if n.is_none() {
                violations.push(Violation::new(
                    "max_tokens",
                    "Number must be greater than 0",
                ));
            }
            n.map(|n| n as u32)
        }
    };

    if !violations.is_empty() {
        return Err(violations);
    }

    // Both are Some here: a None without a recorded violation is impossible.
    match (model, input) {
        (Some(model), Some(input)) => Ok(ChatRequest {
            model,
            input,
            instructions,
            reasoning,
            text,
            max_tokens,
        }),
        _ => Err(vec![Violation::new("", "Invalid request")]),
    }
}

fn validate_messages(items: &[Value], violations: &mut Vec<Violation>) -> Option<ChatInput> {
    if items.is_empty() {
        violations.push(Violation::new(
            "input",
            "Array must contain at least 1 element(s)",
        ));
        return None;
    }

    let mut messages = Vec::with_capacity(items.len());
    let before = violations.len();

    for (i, item) in items.iter().enumerate() {
        let obj = match item.as_object() {
            Some(obj) => obj,
            None => {
                violations.push(Violation::new(format!("input.{i}"), "Expected an object"));
                continue;
            }
        };

        let role = match obj.get("role") {
            None => {
                violations.push(Violation::new(format!("input.{i}.role"), "Required"));
                None
            }
            Some(Value::String(s)) => {
                let parsed = Role::parse(s);
                if parsed.is_none() {
                    violations.push(Violation::new(
                        format!("input.{i}.role"),
                        format!(
                            "Invalid enum value. Expected 'developer' | 'user' | 'assistant', received '{s}'"
                        ),
                    ));
                }
                parsed
            }
            Some(_) => {
                violations.push(Violation::new(format!("input.{i}.role"), "Expected a string"));
                None
            }
        };

        let content = match obj.get("content") {
            None => {
                violations.push(Violation::new(format!("input.{i}.content"), "Required"));
                None
            }
            Some(Value::String(s)) => {
                if s.is_empty() {
                    violations.push(Violation::new(
                        format!("input.{i}.content"),
                        "Message content cannot be empty",
                    ));
                    None
                } else {
                    Some(s.clone())
                }
            }
            Some(_) => {
                violations.push(Violation::new(
                    format!("input.{i}.content"),
                    "Expected a string",
                ));
                None
            }
        };

        if let (Some(role), Some(content)) = (role, content) {
            messages.push(Message { role, content });
        }
    }

    if violations.len() > before {
        None
    } else {
        Some(ChatInput::Messages(messages))
    }
}

fn validate_reasoning(value: &Value, violations: &mut Vec<Violation>) -> Option<Reasoning> {
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => {
            violations.push(Violation::new("reasoning", "Expected an object"));
            return None;
        }
    };

    match obj.get("effort") {
        None => {
            violations.push(Violation::new("reasoning.effort", "Required"));
            None
        }
        Some(Value::String(s)) => match ReasoningEffort::parse(s) {
            Some(effort) => Some(Reasoning { effort }),
            None => {
                violations.push(Violation::new(
                    "reasoning.effort",
                    format!("Invalid enum value. Expected {SUPPORTED_EFFORTS}, received '{s}'"),
                ));
                None
            }
        },
        Some(_) => {
            violations.push(Violation::new("reasoning.effort", "Expected a string"));
            None
        }
    }
}

fn validate_text(value: &Value, violations: &mut Vec<Violation>) -> Option<TextOptions> {
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => {
            violations.push(Violation::new("text", "Expected an object"));
            return None;
        }
    };

    match obj.get("verbosity") {
        None => {
            violations.push(Violation::new("text.verbosity", "Required"));
            None
        }
        Some(Value::String(s)) => match Verbosity::parse(s) {
            Some(verbosity) => Some(TextOptions { verbosity }),
            None => {
                violations.push(Violation::new(
                    "text.verbosity",
                    format!("Invalid enum value. Expected {SUPPORTED_VERBOSITY}, received '{s}'"),
                ));
                None
            }
        },
        Some(_) => {
            violations.push(Violation::new("text.verbosity", "Expected a string"));
            None
        }
    }
}
