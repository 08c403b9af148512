//! Config validation: unknown-key detection with "did you mean?" suggestions
//! and range checks on feed and server settings.
//!
//! The raw TOML is walked before serde deserialization so that typos such as
//! `windw_days` surface as warnings instead of silently falling back to the
//! default. Unknown keys never fail a load.

use std::collections::BTreeSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Every valid dotted key path in `AppConfig`.
///
/// Kept by hand alongside the structs in `app_config.rs`.
pub fn known_config_keys() -> BTreeSet<&'static str> {
    [
        // [server]
        "server",
        "server.addr",
        // [feed]
        "feed",
        "feed.endpoint",
        "feed.window_days",
        "feed.max_distance_au",
        "feed.timeout_secs",
        // [model]
        "model",
        "model.path",
    ]
    .into_iter()
    .collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively collect all dotted key paths in a TOML tree.
///
/// `{ feed = { endpoint = "..", window_days = 60 } }` yields
/// `["feed", "feed.endpoint", "feed.window_days"]`.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Closest known key within edit distance 3, first in key order on ties.
pub fn suggest_correction(unknown: &str, known: &BTreeSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|k| (*k, levenshtein(unknown, k)))
        .filter(|(_, dist)| *dist <= 3)
        .min_by_key(|(_, dist)| *dist)
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Warnings for every key in `raw_toml` that `AppConfig` does not know.
///
/// Parse errors are left to the serde pass and produce no warnings here.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Range Validation
// ============================================================================

/// Range checks on a parsed config.
///
/// Returns (errors, warnings): errors prevent startup, warnings are logged.
pub fn validate_ranges(config: &super::AppConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if config.server.addr.parse::<std::net::SocketAddr>().is_err() {
        errors.push(format!(
            "server.addr = '{}' is not a valid socket address (expected HOST:PORT)",
            config.server.addr
        ));
    }

    let feed = &config.feed;
    if !(feed.endpoint.starts_with("http://") || feed.endpoint.starts_with("https://")) {
        errors.push(format!(
            "feed.endpoint = '{}' must be an http(s) URL",
            feed.endpoint
        ));
    }
    if feed.window_days == 0 {
        errors.push("feed.window_days must be > 0".to_string());
    }
    if !feed.max_distance_au.is_finite() || feed.max_distance_au <= 0.0 {
        errors.push(format!(
            "feed.max_distance_au = {} must be a finite value > 0",
            feed.max_distance_au
        ));
    }
    if feed.timeout_secs == Some(0) {
        errors.push("feed.timeout_secs must be > 0 when set".to_string());
    }

    if config.model.path.as_os_str().is_empty() {
        errors.push("model.path must not be empty".to_string());
    }

    // CNEOS accepts larger windows but the feed was built around a short look-ahead
    if feed.window_days > 365 {
        warnings.push(ValidationWarning {
            field: "feed.window_days".to_string(),
            message: format!(
                "feed.window_days = {} is unusually long; responses may be large",
                feed.window_days
            ),
            suggestion: None,
        });
    }
    if feed.max_distance_au > 0.5 {
        warnings.push(ValidationWarning {
            field: "feed.max_distance_au".to_string(),
            message: format!(
                "feed.max_distance_au = {} AU is far beyond close-approach range",
                feed.max_distance_au
            ),
            suggestion: None,
        });
    }

    (errors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("feed", "feed"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("endpont", "endpoint"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [feed]
            window_days = 30
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"feed".to_string()));
        assert!(keys.contains(&"feed.window_days".to_string()));
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let warnings = validate_unknown_keys("[feed]\nwindw_days = 30\n");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "feed.windw_days");
        assert_eq!(warnings[0].suggestion.as_deref(), Some("feed.window_days"));
    }

    #[test]
    fn test_far_off_key_has_no_suggestion() {
        let warnings = validate_unknown_keys("[telemetry]\nexporter = \"otlp\"\n");
        assert!(!warnings.is_empty());
        assert!(warnings.iter().all(|w| w.suggestion.is_none()));
    }

    #[test]
    fn test_unparseable_toml_yields_no_warnings() {
        assert!(validate_unknown_keys("[feed\nendpoint =").is_empty());
    }

    #[test]
    fn test_default_config_passes_ranges() {
        let (errors, warnings) = validate_ranges(&AppConfig::default());
        assert!(errors.is_empty(), "{errors:?}");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_bad_ranges_are_errors() {
        let mut config = AppConfig::default();
        config.server.addr = "not-an-addr".to_string();
        config.feed.endpoint = "ftp://example.org".to_string();
        config.feed.window_days = 0;
        config.feed.max_distance_au = f64::NAN;
        config.feed.timeout_secs = Some(0);
        let (errors, _) = validate_ranges(&config);
        assert_eq!(errors.len(), 5, "{errors:?}");
    }

    #[test]
    fn test_wide_window_warns() {
        let mut config = AppConfig::default();
        config.feed.window_days = 1000;
        let (errors, warnings) = validate_ranges(&config);
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "feed.window_days");
    }
}
