//! Follow-up prompts for queries that are missing information.

use std::fmt;

/// Names of the pieces a query did not provide, in the order they were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingFields(Vec<&'static str>);

impl MissingFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `field` as missing when `absent` holds.
    pub fn check(&mut self, absent: bool, field: &'static str) -> &mut Self {
        if absent {
            self.0.push(field);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &[&'static str] {
        &self.0
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|f| *f == field)
    }

    /// The message asking the user for the missing pieces.
    pub fn prompt(&self) -> String {
        format!("I need more information. Please provide the {}.", self)
    }
}

impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" and "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_fields_in_order() {
        let mut missing = MissingFields::new();
        missing
            .check(true, "amount")
            .check(false, "source currency")
            .check(true, "target currency");

        assert_eq!(missing.fields(), &["amount", "target currency"]);
        assert_eq!(
            missing.prompt(),
            "I need more information. Please provide the amount and target currency."
        );
    }

    #[test]
    fn test_empty() {
        let missing = MissingFields::new();
        assert!(missing.is_empty());
        assert!(!missing.contains("amount"));
    }
}
