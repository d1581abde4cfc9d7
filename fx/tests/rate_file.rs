//! Loading a published rate file end to end.

use std::io::Write;

use tellerbot_common::Currency;
use tellerbot_fx::{ExchangeRateEngine, FxConfig, FxError, LoadError};

fn write_rates(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

fn config_for(file: &tempfile::NamedTempFile) -> FxConfig {
    FxConfig {
        rates_path: file.path().to_path_buf(),
        ..Default::default()
    }
}

#[test]
fn test_engine_from_rate_file() {
    let file = write_rates(
        r#"[
            {"Currency": "US Dollar", "Buying/Rs.": 131.90, "Selling/Rs.": 132.50},
            {"Currency": "EUR", "Buying/Rs.": 144.40, "Selling/Rs.": 145.00},
            {"Currency": "Japanese Yen", "Selling/Rs.": 9.10}
        ]"#,
    );

    let engine = ExchangeRateEngine::from_config(&config_for(&file)).unwrap();

    assert_eq!(engine.reference(), &Currency::npr());
    assert_eq!(engine.quotes().count(), 3);
    assert_eq!(engine.table().quote(&Currency::jpy()).unwrap().unit, 10);

    let reply = engine.convert_query("convert 100 usd to eur");
    assert!(reply.ends_with("Converted amount: 91.38 EUR"));

    let reply = engine.convert_query("1000 yen to NPR");
    assert!(reply.contains("Exchange Rate: 1 JPY = 0.9100 NPR"));
    assert!(reply.ends_with("Converted amount: 910.00 NPR"));
}

#[test]
fn test_missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = FxConfig {
        rates_path: dir.path().join("missing.json"),
        ..Default::default()
    };

    let err = ExchangeRateEngine::from_config(&config).unwrap_err();
    assert!(matches!(err, FxError::Load(LoadError::Io { .. })));
    assert!(!err.is_recoverable());
}

#[test]
fn test_malformed_record_is_fatal() {
    let file = write_rates(r#"[{"Currency": "USD", "Selling/Rs.": "n/a"}]"#);

    let err = ExchangeRateEngine::from_config(&config_for(&file)).unwrap_err();
    assert!(matches!(err, FxError::Load(LoadError::Malformed { .. })));
}

#[test]
fn test_empty_list_is_fatal() {
    let file = write_rates("[]");

    let err = ExchangeRateEngine::from_config(&config_for(&file)).unwrap_err();
    assert!(matches!(err, FxError::Load(LoadError::Empty(_))));
}
