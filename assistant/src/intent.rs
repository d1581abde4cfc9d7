//! Query intent detection.

use serde::{Deserialize, Serialize};

const FOREX_KEYWORDS: [&str; 4] = ["forex", "exchange", "convert", "currency"];

/// Which handler answers a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Loan installment calculation.
    Loan,
    /// Currency conversion.
    Forex,
    /// Anything else, answered from the knowledge base.
    Knowledge,
}

impl Intent {
    /// Classify a query by keyword. Loan wins over forex when both match.
    pub fn classify(text: &str) -> Self {
        let lowered = text.to_lowercase();

        if lowered.contains("emi") {
            Intent::Loan
        } else if FOREX_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            Intent::Forex
        } else {
            Intent::Knowledge
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Loan => "loan",
            Intent::Forex => "forex",
            Intent::Knowledge => "knowledge",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Intent::classify("What is my EMI for 5 lakh?"), Intent::Loan);
        assert_eq!(Intent::classify("Convert 100 USD to NPR"), Intent::Forex);
        assert_eq!(Intent::classify("today's exchange rate for euro"), Intent::Forex);
        assert_eq!(Intent::classify("What are your branch hours?"), Intent::Knowledge);
    }

    #[test]
    fn test_loan_takes_priority() {
        assert_eq!(Intent::classify("convert my emi to dollars"), Intent::Loan);
    }

    #[test]
    fn test_substring_match() {
        // "premium" contains "emi"
        assert_eq!(Intent::classify("premium account fees"), Intent::Loan);
    }
}
