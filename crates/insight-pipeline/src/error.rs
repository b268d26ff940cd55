//! Fatal pipeline errors
//!
//! Anything that stops a run lives here. Failures of individual analyses are
//! not errors at this level; see [`crate::executor::SkipReason`].

use std::path::PathBuf;

use insight_llm::LlmError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// The dataset could not be read or parsed
    #[error("Failed to load {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: insight_core::Error,
    },

    /// No analysis plan could be obtained
    #[error("Failed to obtain an analysis plan: {0}")]
    Plan(#[source] LlmError),

    /// Output could not be written
    #[error("Failed to write {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The model client could not be constructed
    #[error("Failed to set up the model client: {0}")]
    Client(#[source] LlmError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

impl PipelineError {
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }
}
