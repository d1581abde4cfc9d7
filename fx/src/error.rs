//! FX engine error types.

use std::path::PathBuf;

use tellerbot_common::{Currency, MissingFields};
use thiserror::Error;

/// Errors that can occur while loading a rate table.
///
/// All of these are fatal: an engine is never built from a table that failed to load.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Rate file could not be read.
    #[error("Failed to read rate table {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rate file is not a JSON list of quote records.
    #[error("Malformed rate table {origin}: {source}")]
    Malformed {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// Rate table holds no usable quotes.
    #[error("Rate table {0} contains no quotes")]
    Empty(String),

    /// Two records resolve to the same currency.
    #[error("Duplicate quote for {currency} in rate table {origin}")]
    DuplicateQuote { origin: String, currency: Currency },

    /// A record declares a quoting unit of zero.
    #[error("Quoting unit for {currency} in rate table {origin} must be at least 1")]
    InvalidUnit { origin: String, currency: Currency },
}

/// Errors that can occur in the FX engine.
#[derive(Debug, Error)]
pub enum FxError {
    /// No quote exists for the currency.
    #[error("No exchange rate information for {0}")]
    UnknownCurrency(Currency),

    /// The stored selling rate cannot be used for arithmetic.
    #[error("Invalid stored rate {rate} for {currency}")]
    InvalidRate { currency: Currency, rate: f64 },

    /// Amount to convert is not a positive finite number.
    #[error("Invalid amount {0}")]
    InvalidAmount(f64),

    /// The query did not name every piece of a conversion.
    #[error("Incomplete conversion request, missing {0}")]
    Incomplete(MissingFields),

    /// The rate table failed to load.
    #[error(transparent)]
    Load(#[from] LoadError),
}

impl FxError {
    /// Whether the error is a per-query condition that can be reported to the user.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, FxError::Load(_))
    }

    /// Get error code for logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            FxError::UnknownCurrency(_) => "UNKNOWN_CURRENCY",
            FxError::InvalidRate { .. } => "INVALID_RATE",
            FxError::InvalidAmount(_) => "INVALID_AMOUNT",
            FxError::Incomplete(_) => "INCOMPLETE",
            FxError::Load(_) => "LOAD_ERROR",
        }
    }

    /// Text shown to the user in place of a conversion summary.
    pub fn user_message(&self) -> String {
        match self {
            FxError::UnknownCurrency(currency) => {
                format!("Sorry, I don't have exchange rate information for {}.", currency)
            }
            FxError::InvalidRate { currency, .. } => {
                format!("Sorry, the stored exchange rate for {} is not usable.", currency)
            }
            FxError::InvalidAmount(_) => "Please provide a valid positive amount to convert.".to_string(),
            FxError::Incomplete(missing) => missing.prompt(),
            FxError::Load(_) => "Exchange rates are not available right now.".to_string(),
        }
    }
}

/// Result type for FX operations.
pub type FxResult<T> = Result<T, FxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = FxError::UnknownCurrency(Currency::new("XYZ"));
        assert_eq!(
            err.user_message(),
            "Sorry, I don't have exchange rate information for XYZ."
        );
        assert!(err.is_recoverable());

        let mut missing = MissingFields::new();
        missing.check(true, "amount");
        let err = FxError::Incomplete(missing);
        assert_eq!(
            err.user_message(),
            "I need more information. Please provide the amount."
        );
        assert_eq!(err.error_code(), "INCOMPLETE");
    }

    #[test]
    fn test_load_error_is_fatal() {
        let err: FxError = LoadError::Empty("rates.json".to_string()).into();
        assert!(!err.is_recoverable());
        assert_eq!(err.to_string(), "Rate table rates.json contains no quotes");
    }
}
