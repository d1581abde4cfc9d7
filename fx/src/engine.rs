//! Main exchange rate engine.

use tellerbot_common::{Currency, CurrencyPair};
use tracing::{debug, info, instrument, warn};

use crate::alias::AliasTable;
use crate::config::FxConfig;
use crate::conversion::{ConversionRequest, ConversionResult};
use crate::error::{FxError, FxResult};
use crate::extract::extract;
use crate::provider::{JsonFileSource, QuoteSource};
use crate::table::{CurrencyQuote, RateTable, UnitTable};

/// Converts between currencies quoted against a single reference currency.
///
/// Every pair is derived through the reference, so rates are consistent:
/// `rate(a, b) * rate(b, a) == 1` and `rate(a, b) * rate(b, c) == rate(a, c)`
/// up to floating-point precision. The engine is immutable once built and can
/// be shared between threads.
#[derive(Debug, Clone)]
pub struct ExchangeRateEngine {
    aliases: AliasTable,
    table: RateTable,
}

impl ExchangeRateEngine {
    /// Create an engine from prepared tables.
    pub fn new(aliases: AliasTable, table: RateTable) -> Self {
        Self { aliases, table }
    }

    /// Load quotes from a source using the built-in alias and unit tables.
    pub fn from_source(source: &dyn QuoteSource, reference: Currency) -> FxResult<Self> {
        Self::with_tables(source, reference, AliasTable::builtin(), &UnitTable::builtin())
    }

    /// Load quotes from a source with custom alias and unit tables.
    #[instrument(skip_all, fields(source = source.name(), reference = %reference))]
    pub fn with_tables(
        source: &dyn QuoteSource,
        reference: Currency,
        aliases: AliasTable,
        units: &UnitTable,
    ) -> FxResult<Self> {
        let records = source.fetch()?;
        let table = RateTable::build(reference, records, &aliases, units, source.name())?;
        Ok(Self::new(aliases, table))
    }

    /// Load the rate file named by the configuration.
    pub fn from_config(config: &FxConfig) -> FxResult<Self> {
        let source = JsonFileSource::new(&config.rates_path);
        Self::from_source(&source, config.reference_currency.clone())
    }

    /// The currency all quotes are expressed in.
    pub fn reference(&self) -> &Currency {
        self.table.reference()
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn table(&self) -> &RateTable {
        &self.table
    }

    /// Loaded quotes, ordered by code.
    pub fn quotes(&self) -> impl Iterator<Item = &CurrencyQuote> {
        self.table.quotes()
    }

    /// Resolve free text to a canonical code.
    pub fn resolve(&self, text: &str) -> Currency {
        self.aliases.resolve(text)
    }

    /// Units of `to` for one unit of `from`.
    pub fn rate(&self, from: &Currency, to: &Currency) -> FxResult<f64> {
        if from == to {
            return Ok(1.0);
        }

        let reference = self.table.reference();
        let rate = if from == reference {
            let (quote, unit) = self.table.lookup(to)?;
            f64::from(unit) / quote.checked_selling_rate()?
        } else if to == reference {
            let (quote, unit) = self.table.lookup(from)?;
            quote.checked_selling_rate()? / f64::from(unit)
        } else {
            let from_per_unit = self.table.quote(from)?.reference_per_unit()?;
            let to_per_unit = self.table.quote(to)?.reference_per_unit()?;
            from_per_unit / to_per_unit
        };

        if !(rate.is_finite() && rate > 0.0) {
            return Err(FxError::InvalidRate {
                currency: to.clone(),
                rate,
            });
        }

        debug!(from = %from, to = %to, rate, "Derived rate");
        Ok(rate)
    }

    /// Convert an amount between two canonical codes.
    #[instrument(skip(self), fields(from = %from, to = %to))]
    pub fn convert(&self, amount: f64, from: &Currency, to: &Currency) -> FxResult<ConversionResult> {
        if !(amount.is_finite() && amount > 0.0) {
            return Err(FxError::InvalidAmount(amount));
        }

        let rate = self.rate(from, to)?;
        let result = ConversionResult::new(CurrencyPair::new(from.clone(), to.clone()), amount, rate);
        if !result.converted_amount.is_finite() {
            return Err(FxError::InvalidAmount(amount));
        }

        info!(
            rate = result.rate,
            converted_amount = result.converted_amount,
            "Conversion completed"
        );

        Ok(result)
    }

    /// Resolve the currency references of a request and convert it.
    pub fn convert_request(&self, request: &ConversionRequest) -> FxResult<ConversionResult> {
        let from = self.resolve(&request.source);
        let to = self.resolve(&request.target);
        self.convert(request.amount, &from, &to)
    }

    /// Extract a request from free text and convert it.
    pub fn answer(&self, text: &str) -> FxResult<ConversionResult> {
        let request = extract(text, &self.aliases)?;
        self.convert_request(&request)
    }

    /// Answer a free-text conversion query with text for the user.
    ///
    /// Per-query failures become a follow-up prompt or an apology; nothing is raised.
    #[instrument(skip(self))]
    pub fn convert_query(&self, text: &str) -> String {
        match self.answer(text) {
            Ok(result) => result.to_string(),
            Err(err) => {
                match &err {
                    FxError::Incomplete(missing) => debug!(missing = %missing, "Query incomplete"),
                    other => warn!(code = other.error_code(), error = %other, "Conversion failed"),
                }
                err.user_message()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MemorySource;

    fn setup_engine() -> ExchangeRateEngine {
        let source = MemorySource::new("test")
            .with_quote("USD", 132.50)
            .with_quote("EUR", 145.00)
            .with_quote("JPY", 9.10);
        ExchangeRateEngine::from_source(&source, Currency::npr()).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        ((a - b) / b).abs() < 1e-9
    }

    #[test]
    fn test_identity() {
        let engine = setup_engine();
        assert_eq!(engine.rate(&Currency::usd(), &Currency::usd()).unwrap(), 1.0);
        assert_eq!(engine.rate(&Currency::npr(), &Currency::npr()).unwrap(), 1.0);
        assert_eq!(
            engine.rate(&Currency::new("XYZ"), &Currency::new("XYZ")).unwrap(),
            1.0
        );
    }

    #[test]
    fn test_cross_rate() {
        let engine = setup_engine();
        let result = engine.convert(100.0, &Currency::usd(), &Currency::eur()).unwrap();

        assert!(close(result.rate, 132.50 / 145.00));
        assert_eq!(result.rounded_amount(), 91.38);
        assert_eq!(result.converted_amount, 100.0 * result.rate);
    }

    #[test]
    fn test_from_reference() {
        let engine = setup_engine();
        let result = engine.convert(500.0, &Currency::npr(), &Currency::usd()).unwrap();

        assert!(close(result.rate, 1.0 / 132.50));
        assert_eq!(result.rounded_amount(), 3.77);
    }

    #[test]
    fn test_to_reference_uses_unit() {
        let engine = setup_engine();
        let rate = engine.rate(&Currency::jpy(), &Currency::npr()).unwrap();
        assert!(close(rate, 0.91));

        let rate = engine.rate(&Currency::npr(), &Currency::jpy()).unwrap();
        assert!(close(rate, 10.0 / 9.10));
    }

    #[test]
    fn test_unknown_currency() {
        let engine = setup_engine();
        let err = engine
            .convert(10.0, &Currency::usd(), &Currency::new("XYZ"))
            .unwrap_err();

        assert!(matches!(err, FxError::UnknownCurrency(ref c) if c.code() == "XYZ"));
    }

    #[test]
    fn test_invalid_rate_is_reported() {
        let source = MemorySource::new("test")
            .with_quote("USD", 132.50)
            .with_quote("EUR", 0.0);
        let engine = ExchangeRateEngine::from_source(&source, Currency::npr()).unwrap();

        let err = engine.rate(&Currency::usd(), &Currency::eur()).unwrap_err();
        assert!(matches!(err, FxError::InvalidRate { ref currency, .. } if currency == &Currency::eur()));

        let err = engine.rate(&Currency::npr(), &Currency::eur()).unwrap_err();
        assert!(matches!(err, FxError::InvalidRate { .. }));
    }

    #[test]
    fn test_invalid_amount() {
        let engine = setup_engine();
        assert!(matches!(
            engine.convert(-5.0, &Currency::usd(), &Currency::eur()),
            Err(FxError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_overflowing_amount_is_rejected() {
        let engine = setup_engine();
        let amount = f64::MAX / 2.0;

        assert!(matches!(
            engine.convert(amount, &Currency::usd(), &Currency::npr()),
            Err(FxError::InvalidAmount(a)) if a == amount
        ));

        let query = format!("convert {} USD to NPR", "9".repeat(307));
        let reply = engine.convert_query(&query);
        assert_eq!(reply, "Please provide a valid positive amount to convert.");
    }

    #[test]
    fn test_convert_query_with_aliases() {
        let engine = setup_engine();
        let reply = engine.convert_query("Please convert 100 dollars to euro");

        assert!(reply.contains("Exchange Rate: 1 USD = 0.9138 EUR"));
        assert!(reply.ends_with("Converted amount: 91.38 EUR"));
    }

    #[test]
    fn test_convert_query_with_plural_name() {
        let source = MemorySource::new("test")
            .with_quote("USD", 132.50)
            .with_quote("HKD", 17.00);
        let engine = ExchangeRateEngine::from_source(&source, Currency::npr()).unwrap();

        let reply = engine.convert_query("convert 100 hong kong dollars to usd");
        assert!(reply.contains("Amount: 100 HKD"));
        assert!(reply.contains("Exchange Rate: 1 HKD = 0.1283 USD"));
    }

    #[test]
    fn test_convert_query_from_reference() {
        let engine = setup_engine();
        let reply = engine.convert_query("convert 500 nrs to $");

        assert!(reply.contains("Amount: 500 NPR"));
        assert!(reply.contains("Exchange Rate: 1 NPR = 0.0075 USD"));
        assert!(reply.ends_with("Converted amount: 3.77 USD"));
    }

    #[test]
    fn test_convert_query_incomplete() {
        let engine = setup_engine();
        assert_eq!(
            engine.convert_query("convert to USD"),
            "I need more information. Please provide the amount and source currency."
        );
    }

    #[test]
    fn test_convert_query_unknown_currency() {
        let engine = setup_engine();
        assert_eq!(
            engine.convert_query("convert 10 USD to XYZ"),
            "Sorry, I don't have exchange rate information for XYZ."
        );
    }

    #[test]
    fn test_convert_query_same_currency() {
        let engine = setup_engine();
        let reply = engine.convert_query("20 usd to dollars");

        assert!(reply.contains("Exchange Rate: 1 USD = 1.0000 USD"));
        assert!(reply.ends_with("Converted amount: 20.00 USD"));
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ExchangeRateEngine>();
    }
}
