//! Currency codes and display rounding.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical currency code (upper-case, e.g. "USD").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Currency(String);

impl Currency {
    /// Create a new currency from a code. The code is trimmed and upper-cased.
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    /// Get the currency code.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Whether the code has the shape of an ISO 4217 code.
    pub fn is_iso_shaped(&self) -> bool {
        self.0.len() == 3 && self.0.chars().all(|c| c.is_ascii_uppercase())
    }

    /// Nepalese rupee, the default reference currency.
    pub fn npr() -> Self {
        Self::new("NPR")
    }

    pub fn usd() -> Self {
        Self::new("USD")
    }

    pub fn eur() -> Self {
        Self::new("EUR")
    }

    pub fn jpy() -> Self {
        Self::new("JPY")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// An ordered pair of currencies: one unit of `base` priced in `quote`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    /// Currency being converted from.
    pub base: Currency,
    /// Currency being converted to.
    pub quote: Currency,
}

impl CurrencyPair {
    /// Create a new currency pair.
    pub fn new(base: Currency, quote: Currency) -> Self {
        Self { base, quote }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// Round the exact binary value of `value` to `places` decimals, ties to even.
///
/// Returns `None` for NaN, infinities and magnitudes a [`Decimal`] cannot hold.
pub fn round_to_decimal(value: f64, places: u32) -> Option<Decimal> {
    let exact = Decimal::from_f64_retain(value)?;
    let mut rounded = exact.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(places);
    Some(rounded)
}

/// Round `value` to `places` decimals for display, keeping it an `f64`.
pub fn round_dp(value: f64, places: u32) -> f64 {
    round_to_decimal(value, places)
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Format `value` with exactly `places` decimals.
pub fn format_dp(value: f64, places: u32) -> String {
    match round_to_decimal(value, places) {
        Some(d) => d.to_string(),
        None => format!("{:.*}", places as usize, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_normalizes_code() {
        assert_eq!(Currency::new(" usd "), Currency::usd());
        assert_eq!(Currency::from("eur").code(), "EUR");
    }

    #[test]
    fn test_iso_shape() {
        assert!(Currency::usd().is_iso_shaped());
        assert!(!Currency::new("dollars").is_iso_shaped());
        assert!(!Currency::new("$").is_iso_shaped());
    }

    #[test]
    fn test_pair_display() {
        let pair = CurrencyPair::new(Currency::usd(), Currency::eur());
        assert_eq!(pair.to_string(), "USD/EUR");
    }

    #[test]
    fn test_round_to_decimal() {
        assert_eq!(round_to_decimal(91.37931034, 2), Some(dec!(91.38)));
        assert_eq!(round_to_decimal(100.0, 2), Some(dec!(100.00)));
        // 2.675 is stored as 2.67499999...
        assert_eq!(round_to_decimal(2.675, 2), Some(dec!(2.67)));
        // exact tie goes to even
        assert_eq!(round_to_decimal(0.125, 2), Some(dec!(0.12)));
        assert_eq!(round_to_decimal(f64::NAN, 2), None);
    }

    #[test]
    fn test_format_dp() {
        assert_eq!(format_dp(0.00754716981, 4), "0.0075");
        assert_eq!(format_dp(91.4, 2), "91.40");
        assert_eq!(format_dp(3.7735849, 2), "3.77");
    }

    #[test]
    fn test_round_dp() {
        assert_eq!(round_dp(3.7735849, 2), 3.77);
        assert!(round_dp(f64::INFINITY, 2).is_infinite());
    }
}
