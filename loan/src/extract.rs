//! Loan query extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NUMBER: Regex = Regex::new(r"\d{1,3}(?:,\d{2,3})+(?:\.\d+)?|\d+(?:\.\d+)?").unwrap();
    static ref RATE: Regex = Regex::new(r"(\d+(?:\.\d+)?)\s*%").unwrap();
    static ref TENURE: Regex =
        Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(months?|mos?|years?|yrs?|y)\b").unwrap();
}

/// Loan terms found in a query. Any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoanDetails {
    /// Principal.
    pub amount: Option<f64>,
    /// Annual interest rate in percent.
    pub annual_rate: Option<f64>,
    /// Tenure in years.
    pub tenure_years: Option<f64>,
}

/// Find the principal, rate and tenure in free text.
///
/// The rate is a number followed by `%`, the tenure a number followed by a
/// year or month unit, and the amount the first other number. Magnitude words
/// such as "lakh" are not applied.
pub fn extract_loan_details(text: &str) -> LoanDetails {
    let rate = RATE.captures(text).and_then(|c| c.get(1));
    let tenure = TENURE.captures(text);

    let annual_rate = rate.and_then(|m| m.as_str().parse().ok());

    let tenure_start = tenure.as_ref().and_then(|c| c.get(1)).map(|m| m.start());
    let tenure_years = tenure.as_ref().and_then(|c| {
        let value: f64 = c.get(1)?.as_str().parse().ok()?;
        let unit = c.get(2)?.as_str().to_lowercase();
        Some(if unit.starts_with("mo") { value / 12.0 } else { value })
    });

    let rate_start = rate.map(|m| m.start());
    let amount = NUMBER
        .find_iter(text)
        .filter(|m| Some(m.start()) != rate_start && Some(m.start()) != tenure_start)
        .find_map(|m| m.as_str().replace(',', "").parse().ok());

    LoanDetails {
        amount,
        annual_rate,
        tenure_years,
    }
}
