//! Loan calculator error types.

use tellerbot_common::MissingFields;
use thiserror::Error;

/// Errors that can occur while calculating an installment.
#[derive(Debug, Error)]
pub enum LoanError {
    /// The query did not state every loan term.
    #[error("Incomplete loan details, missing {0}")]
    Incomplete(MissingFields),

    /// Terms were stated but cannot be calculated with.
    #[error("Invalid loan terms: {0}")]
    InvalidTerms(String),
}

impl LoanError {
    /// Text shown to the user in place of a breakdown.
    pub fn user_message(&self) -> String {
        match self {
            LoanError::Incomplete(missing) => missing.prompt(),
            LoanError::InvalidTerms(reason) => {
                format!("I can't calculate an EMI for these terms: {}.", reason)
            }
        }
    }
}

/// Result type for loan operations.
pub type LoanResult<T> = Result<T, LoanError>;
