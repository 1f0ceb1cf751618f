use serde::Serialize;
use thiserror::Error;

/// A single violated constraint reported by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Dotted field path, e.g. "model" or "input.2.content".
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Per-call failure taxonomy.
///
/// One variant per external failure payload; the mapping to JSON happens in
/// `crate::normalize` and nowhere else. Missing startup configuration is not
/// represented here because it terminates the process before any call.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Caller-side: the request violated the input contract. Carries every
    /// violation, not just the first.
    #[error("invalid input parameters ({count} violation(s))", count = .0.len())]
    Validation(Vec<Violation>),

    /// Provider-side or transport failure, surfaced without retry.
    #[error("{message}")]
    Upstream {
        code: String,
        message: String,
        status: Option<u16>,
    },

    /// Anything unclassified.
    #[error("{0}")]
    Unexpected(String),
}
