//! System-wide default constants.
//!
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Server
// ============================================================================

/// Default HTTP bind address.
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8501";

// ============================================================================
// Approach Feed
// ============================================================================

/// JPL SSD/CNEOS close-approach data endpoint.
pub const CNEOS_CAD_ENDPOINT: &str = "https://ssd-api.jpl.nasa.gov/cad.api";

/// Look-ahead window for close approaches (days from now).
pub const DEFAULT_WINDOW_DAYS: u32 = 60;

/// Maximum nominal approach distance (AU). 0.05 AU is about 7.5 million km.
pub const DEFAULT_MAX_DISTANCE_AU: f64 = 0.05;

/// `User-Agent` sent to the upstream API.
pub const FEED_USER_AGENT: &str = concat!("neo-sentinel/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Model
// ============================================================================

/// Default location of the exported PHA random-forest artifact.
pub const DEFAULT_MODEL_PATH: &str = "results/models/rf_pha_classifier.json";
