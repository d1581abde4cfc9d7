//! Currency alias resolution.
//!
//! An [`AliasTable`] maps free-text currency references (names, symbols,
//! informal terms) to canonical codes. It is built from an ordered list of
//! `code -> aliases` entries; when the same alias appears under more than one
//! code, the entry listed first wins. The built-in table lists "¥" under JPY
//! before CNY, so "¥" resolves to JPY.

use std::collections::HashMap;

use tellerbot_common::Currency;
use tracing::debug;

/// Built-in alias configuration, in precedence order.
const BUILTIN_ALIASES: &[(&str, &[&str])] = &[
    ("USD", &["US Dollar", "US Dollars", "Dollar", "dollars", "$", "USD"]),
    ("EUR", &["Euro", "euros", "€", "EUR"]),
    ("GBP", &["British Pound", "British Pounds", "Pound Sterling", "pounds", "£", "GBP"]),
    ("CHF", &["Swiss Franc", "Swiss Francs", "CHF"]),
    ("AUD", &["Australian Dollar", "Australian Dollars", "AUD"]),
    ("CAD", &["Canadian Dollar", "Canadian Dollars", "CAD"]),
    ("SGD", &["Singapore Dollar", "Singapore Dollars", "SGD"]),
    ("JPY", &["Japanese Yen", "Yen", "¥", "JPY"]),
    ("CNY", &["Chinese Yuan", "Yuan", "Renminbi", "¥", "CNY"]),
    ("HKD", &["Hong Kong Dollar", "Hong Kong Dollars", "Hongkong Dollar", "Hongkong Dollars", "HKD"]),
    ("DKK", &["Danish Kroner", "Danish Krone", "DKK"]),
    ("MYR", &["Malaysian Ringgit", "Malaysian Ringgits", "Ringgit", "MYR"]),
    ("QAR", &["Qatari Riyal", "Qatari Riyals", "QAR"]),
    ("SAR", &["Saudi Riyal", "Saudi Riyals", "Saudi Rial", "SAR"]),
    ("SEK", &["Swedish Kroner", "Swedish Krona", "SEK"]),
    ("THB", &["Thai Baht", "Thai Bhat", "Baht", "THB"]),
    ("AED", &["UAE Dirham", "UAE Dirhams", "Dirham", "Dirhams", "AED"]),
    ("KWD", &["Kuwaiti Dinar", "Kuwaiti Dinars", "KWD"]),
    ("BHD", &["Bahrain Dinar", "Bahraini Dinar", "Bahraini Dinars", "BHD"]),
    ("KRW", &["Korean Won", "Won", "KRW"]),
    ("INR", &["Indian Rupees", "Indian Rupee", "₹", "INR", "Rupees"]),
    ("NPR", &["Nepali Rupees", "NPR", "रू", "Nepalese Rupee", "nrs"]),
];

/// One configured currency and its aliases, as written in the configuration.
#[derive(Debug, Clone)]
struct AliasEntry {
    code: Currency,
    aliases: Vec<String>,
}

/// Lower-cased alias -> canonical code lookup.
#[derive(Debug, Clone)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
    lookup: HashMap<String, Currency>,
    max_words: usize,
}

impl AliasTable {
    /// Build a table from `(code, aliases)` entries in precedence order.
    pub fn from_entries<I, A, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Currency, A)>,
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self {
            entries: Vec::new(),
            lookup: HashMap::new(),
            max_words: 1,
        };

        for (code, aliases) in entries {
            let aliases: Vec<String> = aliases.into_iter().map(Into::into).collect();
            table.register(code.code(), &code);
            for alias in &aliases {
                table.register(alias, &code);
            }
            table.entries.push(AliasEntry { code, aliases });
        }

        table
    }

    /// The built-in table covering the currencies the bank quotes.
    pub fn builtin() -> Self {
        Self::from_entries(
            BUILTIN_ALIASES
                .iter()
                .map(|(code, aliases)| (Currency::new(code), aliases.iter().copied())),
        )
    }

    fn register(&mut self, alias: &str, code: &Currency) {
        let key = normalize(alias);
        if key.is_empty() {
            return;
        }
        self.max_words = self.max_words.max(key.split_whitespace().count());
        self.lookup.entry(key).or_insert_with(|| code.clone());
    }

    /// Resolve free text to a canonical code.
    ///
    /// Unknown text is returned upper-cased as a best-effort code; this never fails.
    pub fn resolve(&self, text: &str) -> Currency {
        match self.lookup(text) {
            Some(code) => code.clone(),
            None => {
                debug!(text, "No alias match, using text as code");
                Currency::new(text)
            }
        }
    }

    /// Look up free text without the upper-case fallback.
    pub fn lookup(&self, text: &str) -> Option<&Currency> {
        self.lookup.get(&normalize(text))
    }

    /// Whether the text is a configured alias or code.
    pub fn contains(&self, text: &str) -> bool {
        self.lookup(text).is_some()
    }

    /// Display name for a code: its first configured alias.
    pub fn display_name(&self, code: &Currency) -> Option<&str> {
        self.entry(code)
            .and_then(|entry| entry.aliases.first())
            .map(String::as_str)
    }

    /// Largest number of whitespace-separated words in any alias.
    pub fn max_words(&self) -> usize {
        self.max_words
    }

    fn entry(&self, code: &Currency) -> Option<&AliasEntry> {
        self.entries.iter().find(|entry| &entry.code == code)
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
