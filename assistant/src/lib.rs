//! Tellerbot Assistant
//!
//! Routes chat queries: loan and currency questions are answered by the
//! calculators before retrieval runs, everything else goes to the external
//! knowledge base (retrieval plus language model) behind [`KnowledgeBase`].

pub mod assistant;
pub mod conversation;
pub mod error;
pub mod intent;
pub mod knowledge;

pub use assistant::Assistant;
pub use conversation::{Conversation, Role, Turn};
pub use error::{AssistantError, AssistantResult};
pub use intent::Intent;
pub use knowledge::{KnowledgeBase, UnconfiguredKnowledgeBase};
