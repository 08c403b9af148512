//! API route handlers
//!
//! - Close-approach feed: memoized view, forced refresh, cache invalidation
//! - PHA prediction with input bounds
//! - Service health, model metadata and active configuration

mod config;
mod feed;
mod predict;
mod status;

pub use config::*;
pub use feed::*;
pub use predict::*;
pub use status::*;

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::model::{HazardPredictor, ModelSummary};
use crate::pipeline::ApproachFeed;

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers
#[derive(Clone)]
pub struct DashboardState {
    /// Close-approach feed and its cache
    pub feed: Arc<ApproachFeed>,
    /// Loaded PHA classifier, read-only
    pub predictor: Arc<dyn HazardPredictor>,
    /// Metadata of the loaded classifier
    pub model: Arc<ModelSummary>,
    pub started_at: DateTime<Utc>,
}

impl DashboardState {
    pub fn new(
        feed: Arc<ApproachFeed>,
        predictor: Arc<dyn HazardPredictor>,
        model: ModelSummary,
    ) -> Self {
        Self {
            feed,
            predictor,
            model: Arc::new(model),
            started_at: Utc::now(),
        }
    }
}
