//! Application configuration: server address, CNEOS feed query, model artifact
//!
//! Every section implements `Default`, so a missing file or a partial file
//! behaves exactly like the built-in settings for whatever it leaves out.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults::{
    CNEOS_CAD_ENDPOINT, DEFAULT_MAX_DISTANCE_AU, DEFAULT_MODEL_PATH, DEFAULT_SERVER_ADDR,
    DEFAULT_WINDOW_DAYS,
};

/// Env var naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "NEO_SENTINEL_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "neo_sentinel.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with `AppConfig::load()` which searches:
/// 1. `$NEO_SENTINEL_CONFIG`
/// 2. `./neo_sentinel.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub model: ModelConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address, `HOST:PORT`
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_SERVER_ADDR.to_string(),
        }
    }
}

/// CNEOS close-approach query settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// `cad.api` endpoint URL
    pub endpoint: String,
    /// Look-ahead window in days (`date-max=+N`)
    pub window_days: u32,
    /// Maximum nominal approach distance in AU (`dist-max`)
    pub max_distance_au: f64,
    /// Request timeout. Unset keeps the HTTP client's default (no timeout).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: CNEOS_CAD_ENDPOINT.to_string(),
            window_days: DEFAULT_WINDOW_DAYS,
            max_distance_au: DEFAULT_MAX_DISTANCE_AU,
            timeout_secs: None,
        }
    }
}

/// Classifier artifact settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the exported random-forest artifact
    pub path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

impl AppConfig {
    /// Load configuration using the standard search order:
    /// 1. `$NEO_SENTINEL_CONFIG`
    /// 2. `./neo_sentinel.toml`
    /// 3. Built-in defaults
    ///
    /// A file that cannot be read or parsed is logged and skipped. Range
    /// validation is left to the caller, after overrides are applied.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::read_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded config from {}", CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", CONFIG_ENV_VAR);
            }
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::read_file(&local) {
                Ok(config) => {
                    info!("Loaded config from ./{}", LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", LOCAL_CONFIG_FILE);
                }
            }
        }

        info!("No {} found, using built-in defaults", LOCAL_CONFIG_FILE);
        Self::default()
    }

    /// Load from a specific TOML file and validate it.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::read_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file, warning about unknown keys. No range checks.
    pub fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        for w in super::validation::validate_unknown_keys(&contents) {
            warn!("{}", w);
        }

        toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    /// Apply `NEO_SERVER_ADDR` and `NEO_MODEL_PATH` overrides.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(addr) = std::env::var("NEO_SERVER_ADDR") {
            self.server.addr = addr;
        }
        if let Ok(path) = std::env::var("NEO_MODEL_PATH") {
            self.model.path = PathBuf::from(path);
        }
        self
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate settings, collecting every problem rather than the first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = super::validation::validate_ranges(self);
        for w in &warnings {
            warn!("{}", w);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Config validation failed: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_matches_cneos_query() {
        let config = AppConfig::default();
        assert_eq!(config.feed.endpoint, "https://ssd-api.jpl.nasa.gov/cad.api");
        assert_eq!(config.feed.window_days, 60);
        assert_eq!(config.feed.max_distance_au, 0.05);
        assert!(config.feed.timeout_secs.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[feed]\nwindow_days = 30\n").unwrap();

        let config = AppConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.feed.window_days, 30);
        assert_eq!(config.feed.max_distance_au, 0.05);
        assert_eq!(config.server.addr, DEFAULT_SERVER_ADDR);
    }

    #[test]
    fn test_invalid_file_is_validation_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[feed]\nwindow_days = 0\n").unwrap();

        match AppConfig::load_from_file(file.path()) {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.iter().any(|e| e.contains("window_days")));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_read_file_leaves_ranges_to_caller() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\naddr = \"localhost\"\n").unwrap();

        let mut config = AppConfig::read_file(file.path()).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        config.server.addr = "127.0.0.1:9000".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[feed]\nwindow_days = \"sixty\"\n").unwrap();
        assert!(matches!(
            AppConfig::load_from_file(file.path()),
            Err(ConfigError::Parse(..))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = AppConfig::load_from_file(Path::new("/nonexistent/neo_sentinel.toml"));
        assert!(matches!(result, Err(ConfigError::Io(..))));
    }

    #[test]
    fn test_toml_round_trip_keeps_values() {
        let mut config = AppConfig::default();
        config.feed.timeout_secs = Some(15);
        let text = config.to_toml().unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.feed.timeout_secs, Some(15));
        assert_eq!(parsed.model.path, config.model.path);
    }
}
