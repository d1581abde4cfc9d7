//! Assistant error types.

use thiserror::Error;

/// Errors reported by the knowledge base.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// No knowledge base is connected.
    #[error("Knowledge base unavailable: {0}")]
    Unavailable(String),

    /// The knowledge base failed to answer.
    #[error("Knowledge base error: {0}")]
    Backend(String),
}

/// Result type for assistant operations.
pub type AssistantResult<T> = Result<T, AssistantError>;
