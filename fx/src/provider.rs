//! Quote sources the rate table is loaded from.

use std::path::PathBuf;

use tracing::debug;

use crate::error::LoadError;
use crate::table::QuoteRecord;

/// Trait for sources of published quote records.
pub trait QuoteSource {
    /// Name used in logs and load errors.
    fn name(&self) -> &str;

    /// Read every record from the source.
    fn fetch(&self) -> Result<Vec<QuoteRecord>, LoadError>;
}

/// Parse a JSON list of quote records.
pub fn parse_records(json: &str, origin: &str) -> Result<Vec<QuoteRecord>, LoadError> {
    serde_json::from_str(json).map_err(|source| LoadError::Malformed {
        origin: origin.to_string(),
        source,
    })
}

/// Quotes read from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    name: String,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }
}

impl QuoteSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<Vec<QuoteRecord>, LoadError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })?;
        let records = parse_records(&contents, &self.name)?;
        debug!(path = %self.path.display(), records = records.len(), "Read quote records");
        Ok(records)
    }
}

/// Quotes held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    name: String,
    records: Vec<QuoteRecord>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
        }
    }

    /// Add a record.
    pub fn with_record(mut self, record: QuoteRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Add a per-unit quote.
    pub fn with_quote(self, currency: &str, selling: f64) -> Self {
        self.with_record(QuoteRecord::new(currency, selling))
    }
}

impl QuoteSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<Vec<QuoteRecord>, LoadError> {
        Ok(self.records.clone())
    }
}
