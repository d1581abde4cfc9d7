//! Interface to the retrieval-backed knowledge base.

use crate::conversation::Turn;
use crate::error::{AssistantError, AssistantResult};

/// Answers general questions from the document collection.
///
/// Retrieval, embedding and prompting live behind this trait.
pub trait KnowledgeBase: Send + Sync {
    /// Get the backend name.
    fn name(&self) -> &str;

    /// Answer a question given the conversation so far.
    fn answer(&self, question: &str, history: &[Turn]) -> AssistantResult<String>;
}

/// Stand-in used when no knowledge base is connected. Always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredKnowledgeBase;

impl KnowledgeBase for UnconfiguredKnowledgeBase {
    fn name(&self) -> &str {
        "unconfigured"
    }

    fn answer(&self, _question: &str, _history: &[Turn]) -> AssistantResult<String> {
        Err(AssistantError::Unavailable(
            "no knowledge base is configured".to_string(),
        ))
    }
}
