//! Config Validation Tests
//!
//! Typo detection for unknown keys and range validation, exercised
//! independently from the rest of the service.

use neo_sentinel::config::validation::{
    known_config_keys, suggest_correction, validate_ranges, validate_unknown_keys,
};
use neo_sentinel::config::{AppConfig, ConfigError};

use std::io::Write;

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_feed_section_warns_with_suggestion() {
    let toml_str = r#"
[feed]
windw_days = 30
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert!(warnings[0].field.contains("windw_days"));
    assert_eq!(
        warnings[0].suggestion.as_deref(),
        Some("feed.window_days"),
        "Should suggest the correct spelling"
    );
}

#[test]
fn typo_in_section_name_warns() {
    let toml_str = r#"
[modle]
path = "model.json"
"#;
    let warnings = validate_unknown_keys(toml_str);
    // Both the table and its child key are unknown
    assert_eq!(warnings.len(), 2);
    assert_eq!(warnings[0].field, "modle");
    assert_eq!(warnings[0].suggestion.as_deref(), Some("model"));
}

#[test]
fn valid_config_has_no_unknown_key_warnings() {
    let toml_str = r#"
[server]
addr = "127.0.0.1:8501"

[feed]
endpoint = "https://ssd-api.jpl.nasa.gov/cad.api"
window_days = 60
max_distance_au = 0.05
timeout_secs = 20

[model]
path = "results/models/rf_pha_classifier.json"
"#;
    assert!(validate_unknown_keys(toml_str).is_empty());
}

#[test]
fn shipped_config_file_is_clean() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/neo_sentinel.toml");
    let contents = std::fs::read_to_string(path).unwrap();
    assert!(validate_unknown_keys(&contents).is_empty());
    assert!(AppConfig::load_from_file(std::path::Path::new(path)).is_ok());
}

#[test]
fn unrelated_key_gets_no_suggestion() {
    let known = known_config_keys();
    assert_eq!(suggest_correction("telemetry.exporter", &known), None);
}

// ============================================================================
// Range Validation
// ============================================================================

#[test]
fn defaults_pass_range_validation() {
    let (errors, warnings) = validate_ranges(&AppConfig::default());
    assert!(errors.is_empty(), "{errors:?}");
    assert!(warnings.is_empty());
}

#[test]
fn every_bad_value_is_reported() {
    let mut cfg = AppConfig::default();
    cfg.server.addr = "localhost".to_string();
    cfg.feed.endpoint = "ftp://example.org/cad".to_string();
    cfg.feed.window_days = 0;
    cfg.feed.max_distance_au = f64::NAN;
    cfg.feed.timeout_secs = Some(0);
    cfg.model.path = std::path::PathBuf::new();

    let (errors, _) = validate_ranges(&cfg);
    assert_eq!(errors.len(), 6, "{errors:?}");
}

#[test]
fn negative_distance_rejected_through_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[feed]\nmax_distance_au = -0.1\n").unwrap();

    match AppConfig::load_from_file(file.path()) {
        Err(ConfigError::Validation(errors)) => {
            assert_eq!(errors.len(), 1);
            assert!(errors[0].contains("max_distance_au"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn wide_query_only_warns() {
    let mut cfg = AppConfig::default();
    cfg.feed.window_days = 400;
    cfg.feed.max_distance_au = 0.8;

    let (errors, warnings) = validate_ranges(&cfg);
    assert!(errors.is_empty());
    assert_eq!(warnings.len(), 2);
}
