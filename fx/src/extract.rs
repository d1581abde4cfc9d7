//! Conversion query extraction.
//!
//! Pulls an amount and a currency pair out of free text such as
//! "how much is 100 USD to EUR". Extraction is best-effort pattern matching,
//! not language understanding:
//!
//! - the amount is the first number in the text; thousand separators are
//!   accepted, magnitude words ("k", "lakh", "million") are not applied;
//! - the source is the currency reference right before a standalone "to",
//!   the target the one right after it.
//!
//! A currency reference is a configured alias (multi-word aliases are tried
//! first) or a three-letter upper-case code.

use lazy_static::lazy_static;
use regex::Regex;
use tellerbot_common::MissingFields;

use crate::alias::AliasTable;
use crate::conversion::ConversionRequest;
use crate::error::{FxError, FxResult};

pub const FIELD_AMOUNT: &str = "amount";
pub const FIELD_SOURCE: &str = "source currency";
pub const FIELD_TARGET: &str = "target currency";

lazy_static! {
    static ref AMOUNT: Regex = Regex::new(r"\d{1,3}(?:,\d{2,3})+(?:\.\d+)?|\d+(?:\.\d+)?").unwrap();
}

/// What could be found in a query. Any piece may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryDetails {
    pub amount: Option<f64>,
    pub source: Option<String>,
    pub target: Option<String>,
}

impl QueryDetails {
    /// Names of the pieces that were not found.
    pub fn missing(&self) -> MissingFields {
        let mut missing = MissingFields::new();
        missing
            .check(self.amount.is_none(), FIELD_AMOUNT)
            .check(self.source.is_none(), FIELD_SOURCE)
            .check(self.target.is_none(), FIELD_TARGET);
        missing
    }

    /// Turn complete details into a request.
    pub fn into_request(self) -> Result<ConversionRequest, MissingFields> {
        match (self.amount, self.source, self.target) {
            (Some(amount), Some(source), Some(target)) => {
                Ok(ConversionRequest::new(amount, source, target))
            }
            (amount, source, target) => Err(QueryDetails {
                amount,
                source,
                target,
            }
            .missing()),
        }
    }
}

/// Extract a conversion request, failing with [`FxError::Incomplete`] when a piece is missing.
pub fn extract(text: &str, aliases: &AliasTable) -> FxResult<ConversionRequest> {
    parse_query(text, aliases)
        .into_request()
        .map_err(FxError::Incomplete)
}

/// Find whatever amount and currency references the text holds.
pub fn parse_query(text: &str, aliases: &AliasTable) -> QueryDetails {
    let words: Vec<&str> = text
        .split_whitespace()
        .map(trim_punctuation)
        .filter(|w| !w.is_empty())
        .collect();

    let mut details = QueryDetails {
        amount: parse_amount(text),
        ..Default::default()
    };

    for (index, _) in words.iter().enumerate().filter(|(_, w)| w.eq_ignore_ascii_case("to")) {
        if details.source.is_none() {
            details.source = reference_before(&words, index, aliases);
        }
        if details.target.is_none() {
            details.target = reference_after(&words, index, aliases);
        }
    }

    details
}

/// First number in the text. Zero counts as no amount.
pub fn parse_amount(text: &str) -> Option<f64> {
    let found = AMOUNT.find(text)?;
    let amount: f64 = found.as_str().replace(',', "").parse().ok()?;
    (amount > 0.0).then_some(amount)
}

fn reference_before(words: &[&str], to_index: usize, aliases: &AliasTable) -> Option<String> {
    let longest = aliases.max_words().min(to_index);
    (1..=longest)
        .rev()
        .find_map(|len| reference(&words[to_index - len..to_index], aliases))
}

fn reference_after(words: &[&str], to_index: usize, aliases: &AliasTable) -> Option<String> {
    let start = to_index + 1;
    let longest = aliases.max_words().min(words.len().saturating_sub(start));
    (1..=longest)
        .rev()
        .find_map(|len| reference(&words[start..start + len], aliases))
}

fn reference(window: &[&str], aliases: &AliasTable) -> Option<String> {
    if let [word] = window {
        let token = strip_numeric(word);
        return (!token.is_empty() && (aliases.contains(token) || is_upper_code(token)))
            .then(|| token.to_string());
    }

    let phrase = window.join(" ");
    aliases.contains(&phrase).then_some(phrase)
}

fn trim_punctuation(word: &str) -> &str {
    word.trim_matches(|c: char| c.is_ascii_punctuation() && c != '$')
}

fn strip_numeric(word: &str) -> &str {
    word.trim_matches(|c: char| c.is_ascii_digit() || c == ',' || c == '.')
}

fn is_upper_code(token: &str) -> bool {
    token.len() == 3 && token.chars().all(|c| c.is_ascii_uppercase())
}
