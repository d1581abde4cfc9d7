//! Command-line configuration.

use std::path::PathBuf;

use tellerbot_common::Currency;
use tellerbot_fx::FxConfig;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Plain,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "plain" | "text" | "pretty" => Some(LogFormat::Plain),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// Main configuration for the binary.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Exchange rate engine configuration.
    pub fx: FxConfig,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fx: FxConfig::default(),
            log_format: LogFormat::Plain,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self {
            fx: FxConfig::from_env(),
            ..Self::default()
        };

        if let Ok(format) = std::env::var("TELLERBOT_LOG_FORMAT") {
            if let Some(format) = LogFormat::parse(&format) {
                config.log_format = format;
            }
        }

        config
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, rates: Option<PathBuf>, reference: Option<&str>) -> Self {
        if let Some(path) = rates {
            self.fx.rates_path = path;
        }
        if let Some(code) = reference {
            self.fx.reference_currency = Currency::new(code);
        }
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.fx.validate()
    }
}
