//! Integration tests for configuration loading

use std::io::Write;

use alpharsi::config::{Config, ConfigError, EngineConfig, LogFormat, SmoothingType};
use alpharsi::{AlphaRsiEngine, EngineError};
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_example_config_matches_defaults() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml.example");
    let config = Config::load(path).unwrap();
    assert_eq!(config.engine, EngineConfig::default());
    assert_eq!(config.telemetry.log_level, "info");
    assert_eq!(config.telemetry.log_format, LogFormat::Pretty);
    assert_eq!(config.telemetry.metrics_port, None);
}

#[test]
fn test_partial_config_fills_defaults() {
    let file = write_config(
        r#"
        [engine]
        smoothing_type = "ema"
        pivot_lookaround = 3

        [telemetry]
        log_format = "json"
        metrics_port = 9100
        "#,
    );
    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.engine.smoothing_type, SmoothingType::Ema);
    assert_eq!(config.engine.pivot_lookaround, 3);
    assert_eq!(config.engine.oscillator_period, 14);
    assert_eq!(config.telemetry.log_format, LogFormat::Json);
    assert_eq!(config.telemetry.metrics_port, Some(9100));
}

#[test]
fn test_empty_file_is_default() {
    let file = write_config("");
    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.engine, EngineConfig::default());
}

#[test]
fn test_overlapping_bands_rejected() {
    let file = write_config(
        r#"
        [engine]
        os_max = 70.0
        "#,
    );
    let err = Config::load(file.path()).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::OverlappingBands {
            os_max: 70.0,
            ob_min: 65.0
        })
    );
}

#[test]
fn test_unknown_smoothing_type_rejected() {
    let file = write_config(
        r#"
        [engine]
        smoothing_type = "wma"
        "#,
    );
    assert!(Config::load(file.path()).is_err());
}

#[test]
fn test_missing_file_is_error() {
    let err = Config::load("/nonexistent/alpharsi.toml").unwrap_err();
    assert!(format!("{:#}", err).contains("/nonexistent/alpharsi.toml"));
}

#[test]
fn test_load_errors_name_the_file() {
    let file = write_config("[engine]\noscillator_period = 0\n");
    let err = Config::load(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains(&file.path().display().to_string()));
    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::NonPositivePeriod {
            name: "oscillator_period"
        })
    );
}

#[test]
fn test_engine_rejects_invalid_config() {
    let config = EngineConfig {
        max_pivots: 1,
        ..Default::default()
    };
    assert_eq!(
        AlphaRsiEngine::new(config).unwrap_err(),
        EngineError::Config(ConfigError::TooFewPivots(1))
    );

    let config = EngineConfig {
        sensitivity: f64::NAN,
        ..Default::default()
    };
    assert_eq!(
        AlphaRsiEngine::new(config).unwrap_err(),
        EngineError::Config(ConfigError::NonFinite {
            name: "sensitivity"
        })
    );
}
