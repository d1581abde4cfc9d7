//! Currency conversion types.

use std::fmt;

use serde::{Deserialize, Serialize};
use tellerbot_common::{format_dp, round_dp, Currency, CurrencyPair};

/// Decimals shown for the exchange rate.
pub const RATE_DISPLAY_PLACES: u32 = 4;

/// Decimals shown for the converted amount.
pub const AMOUNT_DISPLAY_PLACES: u32 = 2;

/// Request to convert an amount, as extracted from a query.
///
/// The currency references are still free text; the engine resolves them.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    /// Amount to convert.
    pub amount: f64,
    /// Source currency reference.
    pub source: String,
    /// Target currency reference.
    pub target: String,
}

impl ConversionRequest {
    pub fn new(amount: f64, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            amount,
            source: source.into(),
            target: target.into(),
        }
    }
}

/// A completed conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Resolved source and target codes.
    pub pair: CurrencyPair,
    /// Input amount in the source currency.
    pub amount: f64,
    /// Units of target per one unit of source.
    pub rate: f64,
    /// `amount * rate`, unrounded.
    pub converted_amount: f64,
}

impl ConversionResult {
    pub fn new(pair: CurrencyPair, amount: f64, rate: f64) -> Self {
        Self {
            pair,
            amount,
            rate,
            converted_amount: amount * rate,
        }
    }

    pub fn from(&self) -> &Currency {
        &self.pair.base
    }

    pub fn to(&self) -> &Currency {
        &self.pair.quote
    }

    /// Converted amount rounded for display.
    pub fn rounded_amount(&self) -> f64 {
        round_dp(self.converted_amount, AMOUNT_DISPLAY_PLACES)
    }
}

impl fmt::Display for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let from = self.from();
        let to = self.to();

        writeln!(f, "Based on the provided information:")?;
        writeln!(f, "Amount: {} {}", self.amount, from)?;
        writeln!(f, "From: {}", from)?;
        writeln!(f, "To: {}", to)?;
        writeln!(
            f,
            "Exchange Rate: 1 {} = {} {}",
            from,
            format_dp(self.rate, RATE_DISPLAY_PLACES),
            to
        )?;
        writeln!(f)?;
        write!(
            f,
            "Converted amount: {} {}",
            format_dp(self.converted_amount, AMOUNT_DISPLAY_PLACES),
            to
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converted_amount_is_exact_product() {
        let pair = CurrencyPair::new(Currency::usd(), Currency::eur());
        let rate = 132.50 / 145.00;
        let result = ConversionResult::new(pair, 100.0, rate);

        assert_eq!(result.converted_amount, 100.0 * rate);
        assert_eq!(result.rounded_amount(), 91.38);
    }

    #[test]
    fn test_summary_format() {
        let pair = CurrencyPair::new(Currency::usd(), Currency::eur());
        let result = ConversionResult::new(pair, 100.0, 132.50 / 145.00);

        assert_eq!(
            result.to_string(),
            "Based on the provided information:\n\
             Amount: 100 USD\n\
             From: USD\n\
             To: EUR\n\
             Exchange Rate: 1 USD = 0.9138 EUR\n\
             \n\
             Converted amount: 91.38 EUR"
        );
    }
}
