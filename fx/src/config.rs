//! FX engine configuration.

use std::path::PathBuf;

use tellerbot_common::Currency;

/// Default location of the published rate list.
pub const DEFAULT_RATES_PATH: &str = "data/exchange_rates.json";

/// Configuration for the exchange rate engine.
#[derive(Debug, Clone)]
pub struct FxConfig {
    /// Path to the JSON rate list.
    pub rates_path: PathBuf,
    /// Currency the rate list is quoted in.
    pub reference_currency: Currency,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            rates_path: PathBuf::from(DEFAULT_RATES_PATH),
            reference_currency: Currency::npr(),
        }
    }
}

impl FxConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("TELLERBOT_RATES_PATH") {
            config.rates_path = PathBuf::from(path);
        }

        if let Ok(code) = std::env::var("TELLERBOT_REFERENCE_CURRENCY") {
            config.reference_currency = Currency::new(code);
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.rates_path.as_os_str().is_empty() {
            return Err("Rates path cannot be empty".to_string());
        }

        if !self.reference_currency.is_iso_shaped() {
            return Err(format!(
                "Reference currency {} is not a three-letter code",
                self.reference_currency
            ));
        }

        Ok(())
    }
}
