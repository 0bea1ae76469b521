//! Configuration loading, defaults, and validation.

use std::io::Write;

use identify_core::common::{Component, SimError};
use identify_core::config::{Config, SourceConfig};
use tempfile::NamedTempFile;

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.clock.period_ps, 10_000);
    assert_eq!(config.stimulus.reset_ps, 12_000);
    assert_eq!(config.stimulus.settle_ps, 3_000);
    assert_eq!(config.stimulus.fetch_delay_ps, 7_000);
    assert_eq!(config.stimulus.cycles, 100);
    assert_eq!(config.general.max_delta_rounds, 64);
    assert_eq!(config.general.max_time_ps, None);
    assert!(config.trace.enabled);
    assert!(matches!(config.stimulus.source, SourceConfig::Random { .. }));
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_document_is_all_defaults() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.clock.period_ps, Config::default().clock.period_ps);
}

#[test]
fn test_partial_sections_keep_other_defaults() {
    let json = r#"{
        "stimulus": { "cycles": 5, "arbiter_full_every": 3, "source": { "kind": "Random", "seed": 9 } },
        "trace": { "enabled": false }
    }"#;
    let config = Config::from_json(json).unwrap();
    assert_eq!(config.stimulus.cycles, 5);
    assert_eq!(config.stimulus.arbiter_full_every, 3);
    assert_eq!(config.stimulus.reset_ps, 12_000);
    assert_eq!(config.stimulus.source, SourceConfig::Random { seed: 9 });
    assert!(!config.trace.enabled);
}

#[test]
fn test_invalid_values_are_rejected() {
    for json in [
        r#"{ "clock": { "period_ps": 1 } }"#,
        r#"{ "general": { "max_delta_rounds": 0 } }"#,
    ] {
        let err = Config::from_json(json).unwrap_err();
        assert!(matches!(err, SimError::ConfigInvalid(_)), "{json}");
        assert_eq!(err.component(), Component::Config);
    }
}

#[test]
fn test_malformed_json() {
    let err = Config::from_json("{ clock: ").unwrap_err();
    assert!(matches!(err, SimError::ConfigParse(_)));
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{ "stimulus": { "source": { "kind": "Fixed", "words": [1, 2] } } }"#)
        .unwrap();
    file.flush().unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.stimulus.source, SourceConfig::Fixed { words: vec![1, 2] });
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SimError::ConfigIo { .. }));
}
