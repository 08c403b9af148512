//! NEO Sentinel: Near-Earth Object Monitoring
//!
//! Close-approach monitor and potentially-hazardous-asteroid classifier.
//!
//! ## Architecture
//!
//! - **Feed**: CNEOS `cad.api` client and the raw-row → display-record transform
//! - **Pipeline**: memoized fetch/transform with explicit refresh and invalidation
//! - **Model**: random-forest PHA classifier loaded from a JSON artifact
//! - **Inference**: named orbital elements → positional features → verdict
//! - **API**: axum dashboard server

pub mod api;
pub mod cache;
pub mod config;
pub mod feed;
pub mod inference;
pub mod model;
pub mod pipeline;
pub mod types;

// Re-export configuration
pub use config::AppConfig;

// Re-export commonly used types
pub use types::{
    ApproachTable, CloseApproachDisplayRecord, HazardLabel, OrbitalFeatureVector,
    PredictionResult, RawApproachPayload,
};

// Re-export feed and pipeline components
pub use feed::{ApproachSource, FeedClient, FeedError, FeedQuery, TransformError};
pub use pipeline::{ApproachFeed, FeedView};

// Re-export model components
pub use inference::run_inference;
pub use model::{load_model, HazardPredictor, ModelError, ModelStore, RandomForest};
