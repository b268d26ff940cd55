//! Error type for language-model requests

use thiserror::Error;

/// Failure of a single chat-completions request
#[derive(Error, Debug)]
pub enum LlmError {
    /// The endpoint could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The body or the model's content was not the expected JSON
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Well-formed reply without usable content
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request payload could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LlmError>;

impl LlmError {
    /// Whether the endpoint itself reported the failure
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
