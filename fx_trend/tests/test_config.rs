use fx_trend::config::{CacheConfig, OutputFormat, ReportConfig};
use fx_trend::models::ForecastMethod;
use fx_trend::TrendError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

#[test]
fn test_defaults() {
    let config = ReportConfig::default();

    assert_eq!(config.base, "EUR");
    assert_eq!(config.target, "GBP");
    assert_eq!(config.days, 30);
    assert_eq!(config.predict, 7);
    assert_eq!(config.format, OutputFormat::Text);
    assert_eq!(config.method, ForecastMethod::Combined);
    assert_eq!(config.alpha, 0.3);
    assert_eq!(config.cache, CacheConfig::default());
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_document_uses_defaults() {
    assert_eq!(ReportConfig::from_toml_str("").unwrap(), ReportConfig::default());
}

#[test]
fn test_partial_document() {
    let config = ReportConfig::from_toml_str(
        r#"
        target = "CHF"
        days = 60
        method = "linear"
        format = "json"

        [cache]
        ttl_hours = 6
        "#,
    )
    .unwrap();

    assert_eq!(config.base, "EUR");
    assert_eq!(config.target, "CHF");
    assert_eq!(config.days, 60);
    assert_eq!(config.method, ForecastMethod::Linear);
    assert_eq!(config.format, OutputFormat::Json);
    assert_eq!(config.cache.ttl_hours, 6);
    assert!(config.cache.enabled);
    assert_eq!(config.cache.dir, PathBuf::from("./data/cache"));
    assert_eq!(config.cache.ttl().unwrap(), chrono::Duration::hours(6));
}

#[test]
fn test_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "base = \"USD\"\npredict = 14").unwrap();

    let config = ReportConfig::from_file(file.path()).unwrap();
    assert_eq!(config.base, "USD");
    assert_eq!(config.predict, 14);

    assert!(matches!(
        ReportConfig::from_file("missing.toml"),
        Err(TrendError::IoError(_))
    ));
}

#[test]
fn test_malformed_document() {
    assert!(matches!(
        ReportConfig::from_toml_str("days = \"many\""),
        Err(TrendError::ConfigError(_))
    ));
}

#[rstest]
#[case("base = \"JPY\"")]
#[case("target = \"XXX\"")]
#[case("days = 0")]
#[case("alpha = 1.0")]
#[case("alpha = 0.0")]
#[case("[cache]\nttl_hours = -1")]
fn test_validate_rejects(#[case] doc: &str) {
    let config = ReportConfig::from_toml_str(doc).unwrap();
    assert!(matches!(
        config.validate(),
        Err(TrendError::InvalidParameter(_))
    ));
}

#[rstest]
#[case("linear", ForecastMethod::Linear)]
#[case("Exponential", ForecastMethod::Exponential)]
#[case("combined", ForecastMethod::Combined)]
fn test_method_from_str(#[case] input: &str, #[case] expected: ForecastMethod) {
    assert_eq!(input.parse::<ForecastMethod>().unwrap(), expected);
}

#[test]
fn test_unknown_names_are_rejected() {
    assert!("arima".parse::<ForecastMethod>().is_err());
    assert!("xml".parse::<OutputFormat>().is_err());
    assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
}
