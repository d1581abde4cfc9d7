//! Tellerbot FX Engine
//!
//! Currency conversion against a published rate list quoted in one
//! reference currency.
//!
//! # Features
//!
//! - Alias resolution from names, symbols and codes to canonical codes
//! - Cross rates derived through the reference currency
//! - Quoting units for currencies priced per 10 or per 100 units
//! - Free-text query extraction with follow-up prompts for missing pieces
//!
//! # Example
//!
//! ```rust,ignore
//! use tellerbot_common::Currency;
//! use tellerbot_fx::{ExchangeRateEngine, JsonFileSource};
//!
//! let source = JsonFileSource::new("data/exchange_rates.json");
//! let engine = ExchangeRateEngine::from_source(&source, Currency::npr())?;
//!
//! let rate = engine.rate(&Currency::usd(), &Currency::eur())?;
//! let reply = engine.convert_query("convert 100 USD to EUR");
//! ```

pub mod alias;
pub mod config;
pub mod conversion;
pub mod engine;
pub mod error;
pub mod extract;
pub mod provider;
pub mod table;

pub use alias::AliasTable;
pub use config::FxConfig;
pub use conversion::{ConversionRequest, ConversionResult};
pub use engine::ExchangeRateEngine;
pub use error::{FxError, FxResult, LoadError};
pub use extract::{extract, parse_query, QueryDetails};
pub use provider::{JsonFileSource, MemorySource, QuoteSource};
pub use table::{CurrencyQuote, QuoteRecord, RateTable, UnitTable};
