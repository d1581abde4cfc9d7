//! Rate table: quoted selling rates against the reference currency.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tellerbot_common::Currency;
use tracing::{debug, info, warn};

use crate::alias::AliasTable;
use crate::error::{FxError, FxResult, LoadError};

/// One record of the published rate list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// Currency code or display name.
    #[serde(rename = "Currency")]
    pub currency: String,
    /// Reference-currency units paid for `unit` units of the currency.
    #[serde(rename = "Selling/Rs.")]
    pub selling: f64,
    /// Quoting unit, when the record states it.
    #[serde(rename = "Unit", default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<u32>,
    /// Snapshot date of the quote.
    #[serde(rename = "Date", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl QuoteRecord {
    pub fn new(currency: impl Into<String>, selling: f64) -> Self {
        Self {
            currency: currency.into(),
            selling,
            unit: None,
            date: None,
        }
    }

    pub fn with_unit(mut self, unit: u32) -> Self {
        self.unit = Some(unit);
        self
    }
}

/// Quoting units for currencies priced per 10 or per 100 units.
#[derive(Debug, Clone)]
pub struct UnitTable {
    units: HashMap<Currency, u32>,
}

impl UnitTable {
    /// A table where every currency is quoted per single unit.
    pub fn empty() -> Self {
        Self {
            units: HashMap::new(),
        }
    }

    /// Built-in units: JPY per 10, KRW per 100.
    pub fn builtin() -> Self {
        Self::empty().with_unit(Currency::jpy(), 10).with_unit(Currency::new("KRW"), 100)
    }

    pub fn with_unit(mut self, currency: Currency, unit: u32) -> Self {
        self.units.insert(currency, unit);
        self
    }

    /// Quoting unit for a currency, 1 when not listed.
    pub fn unit(&self, currency: &Currency) -> u32 {
        self.units.get(currency).copied().unwrap_or(1)
    }
}

impl Default for UnitTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// A loaded quote for one currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyQuote {
    /// Canonical code.
    pub code: Currency,
    /// Display name.
    pub name: String,
    /// Reference-currency units per `unit` units of this currency.
    pub selling_rate: f64,
    /// Quoting unit.
    pub unit: u32,
    /// Snapshot date, when published.
    pub as_of: Option<NaiveDate>,
}

impl CurrencyQuote {
    /// The stored selling rate, rejected unless positive and finite.
    pub fn checked_selling_rate(&self) -> FxResult<f64> {
        if self.selling_rate.is_finite() && self.selling_rate > 0.0 {
            Ok(self.selling_rate)
        } else {
            Err(FxError::InvalidRate {
                currency: self.code.clone(),
                rate: self.selling_rate,
            })
        }
    }

    /// Reference-currency units for a single unit of this currency.
    pub fn reference_per_unit(&self) -> FxResult<f64> {
        Ok(self.checked_selling_rate()? / f64::from(self.unit))
    }
}

/// Immutable table of quotes against one reference currency.
#[derive(Debug, Clone)]
pub struct RateTable {
    reference: Currency,
    quotes: BTreeMap<Currency, CurrencyQuote>,
}

impl RateTable {
    /// Build a table from published records.
    ///
    /// Record currencies are resolved through `aliases`, so a record may carry
    /// either a code or a display name. A record for the reference currency is
    /// skipped. Records with unusable rates are kept and fail per query.
    pub fn build(
        reference: Currency,
        records: Vec<QuoteRecord>,
        aliases: &AliasTable,
        units: &UnitTable,
        origin: &str,
    ) -> Result<Self, LoadError> {
        let mut quotes = BTreeMap::new();

        for record in records {
            let code = aliases.resolve(&record.currency);

            if code == reference {
                debug!(origin, currency = %code, "Skipping quote for reference currency");
                continue;
            }

            if !code.is_iso_shaped() {
                warn!(origin, currency = %code, "Quote currency is not a recognised code");
            }

            let unit = record.unit.unwrap_or_else(|| units.unit(&code));
            if unit == 0 {
                return Err(LoadError::InvalidUnit {
                    origin: origin.to_string(),
                    currency: code,
                });
            }

            if !(record.selling.is_finite() && record.selling > 0.0) {
                warn!(
                    origin,
                    currency = %code,
                    selling = record.selling,
                    "Quote has an unusable selling rate"
                );
            }

            let name = display_name(&record.currency, &code, aliases);
            let quote = CurrencyQuote {
                code: code.clone(),
                name,
                selling_rate: record.selling,
                unit,
                as_of: record.date,
            };

            if quotes.insert(code.clone(), quote).is_some() {
                return Err(LoadError::DuplicateQuote {
                    origin: origin.to_string(),
                    currency: code,
                });
            }
        }

        if quotes.is_empty() {
            return Err(LoadError::Empty(origin.to_string()));
        }

        info!(
            origin,
            reference = %reference,
            quotes = quotes.len(),
            "Rate table loaded"
        );

        Ok(Self { reference, quotes })
    }

    /// The currency every quote is expressed in.
    pub fn reference(&self) -> &Currency {
        &self.reference
    }

    /// Quote for a currency.
    pub fn quote(&self, currency: &Currency) -> FxResult<&CurrencyQuote> {
        self.quotes
            .get(currency)
            .ok_or_else(|| FxError::UnknownCurrency(currency.clone()))
    }

    /// Quote and quoting unit for a currency.
    pub fn lookup(&self, currency: &Currency) -> FxResult<(&CurrencyQuote, u32)> {
        let quote = self.quote(currency)?;
        Ok((quote, quote.unit))
    }

    /// All quotes, ordered by code.
    pub fn quotes(&self) -> impl Iterator<Item = &CurrencyQuote> {
        self.quotes.values()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

fn display_name(record_currency: &str, code: &Currency, aliases: &AliasTable) -> String {
    let text = record_currency.trim();
    if !text.eq_ignore_ascii_case(code.code()) {
        return text.to_string();
    }
    aliases
        .display_name(code)
        .map(str::to_string)
        .unwrap_or_else(|| code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(records: Vec<QuoteRecord>) -> Result<RateTable, LoadError> {
        RateTable::build(
            Currency::npr(),
            records,
            &AliasTable::builtin(),
            &UnitTable::builtin(),
            "test",
        )
    }

    #[test]
    fn test_build_resolves_names_and_codes() {
        let table = build(vec![
            QuoteRecord::new("USD", 132.50),
            QuoteRecord::new("Euro", 145.00),
        ])
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.quote(&Currency::usd()).unwrap().name, "US Dollar");
        assert_eq!(table.quote(&Currency::eur()).unwrap().name, "Euro");
        assert!(table.quote(&Currency::npr()).is_err());
    }

    #[test]
    fn test_units_from_table_and_record() {
        let table = build(vec![
            QuoteRecord::new("JPY", 9.10),
            QuoteRecord::new("KRW", 10.0).with_unit(1000),
        ])
        .unwrap();

        let (_, jpy_unit) = table.lookup(&Currency::jpy()).unwrap();
        assert_eq!(jpy_unit, 10);
        assert_eq!(table.quote(&Currency::new("KRW")).unwrap().unit, 1000);
    }

    #[test]
    fn test_reference_per_unit_scales_by_unit() {
        let table = build(vec![QuoteRecord::new("JPY", 9.10)]).unwrap();
        let per_unit = table.quote(&Currency::jpy()).unwrap().reference_per_unit().unwrap();
        assert!((per_unit - 0.91).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_currency() {
        let table = build(vec![QuoteRecord::new("USD", 132.50)]).unwrap();
        let err = table.quote(&Currency::new("XYZ")).unwrap_err();
        assert!(matches!(err, FxError::UnknownCurrency(ref c) if c.code() == "XYZ"));
    }

    #[test]
    fn test_reference_record_is_skipped() {
        let table = build(vec![
            QuoteRecord::new("NPR", 1.0),
            QuoteRecord::new("USD", 132.50),
        ])
        .unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_duplicate_quote_fails() {
        let result = build(vec![
            QuoteRecord::new("USD", 132.50),
            QuoteRecord::new("US Dollar", 133.00),
        ]);
        assert!(matches!(result, Err(LoadError::DuplicateQuote { .. })));
    }

    #[test]
    fn test_empty_and_zero_unit_fail() {
        assert!(matches!(build(vec![]), Err(LoadError::Empty(_))));
        assert!(matches!(
            build(vec![QuoteRecord::new("USD", 132.50).with_unit(0)]),
            Err(LoadError::InvalidUnit { .. })
        ));
    }

    #[test]
    fn test_unusable_rate_fails_on_use() {
        let table = build(vec![QuoteRecord::new("USD", 0.0)]).unwrap();
        let quote = table.quote(&Currency::usd()).unwrap();
        assert!(matches!(
            quote.reference_per_unit(),
            Err(FxError::InvalidRate { .. })
        ));
    }
}
