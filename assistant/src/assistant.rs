//! Query routing.

use std::sync::Arc;

use tellerbot_fx::{ExchangeRateEngine, FxError};
use tellerbot_loan::EmiCalculator;
use tracing::{debug, error, instrument, warn};

use crate::conversation::Conversation;
use crate::intent::Intent;
use crate::knowledge::KnowledgeBase;

/// Reply given when the knowledge base fails.
pub const FALLBACK_REPLY: &str = "I encountered an issue while processing your query. \
Could you please rephrase or ask a different question?";

/// Answers chat queries, intercepting calculator queries before retrieval.
pub struct Assistant {
    forex: Arc<ExchangeRateEngine>,
    loan: EmiCalculator,
    knowledge: Arc<dyn KnowledgeBase>,
}

impl Assistant {
    pub fn new(forex: Arc<ExchangeRateEngine>, knowledge: Arc<dyn KnowledgeBase>) -> Self {
        Self {
            forex,
            loan: EmiCalculator::new(),
            knowledge,
        }
    }

    /// Answer a query and record the exchange in `conversation`.
    #[instrument(skip(self, conversation), fields(turns = conversation.len()))]
    pub fn handle(&self, conversation: &mut Conversation, query: &str) -> String {
        let intent = Intent::classify(query);
        debug!(intent = intent.as_str(), "Routing query");

        let mut note = None;
        let reply = match intent {
            Intent::Loan => format!("EMI Calculation:\n{}", self.loan.run(query)),
            Intent::Forex => {
                let (text, incomplete) = self.convert(query);
                if incomplete {
                    note = Some(format!("I need more information for forex conversion: {}", query));
                }
                format!("Forex Conversion:\n{}", text)
            }
            Intent::Knowledge => match self.knowledge.answer(query, conversation.turns()) {
                Ok(answer) => answer,
                Err(err) => {
                    error!(backend = self.knowledge.name(), error = %err, "Error processing query");
                    FALLBACK_REPLY.to_string()
                }
            },
        };

        conversation.push_user(query);
        if let Some(note) = note {
            conversation.push_assistant(note);
        }
        conversation.push_assistant(reply.clone());
        reply
    }

    /// Run the currency calculator, reporting whether it asked for more information.
    fn convert(&self, query: &str) -> (String, bool) {
        match self.forex.answer(query) {
            Ok(result) => (result.to_string(), false),
            Err(err @ FxError::Incomplete(_)) => (err.user_message(), true),
            Err(err) => {
                warn!(code = err.error_code(), error = %err, "Conversion failed");
                (err.user_message(), false)
            }
        }
    }
}
