//! API route definitions
//!
//! - /api/v1/health - Uptime, model and feed-cache state
//! - /api/v1/approaches - Close-approach table and chart (memoized)
//! - /api/v1/approaches/refresh - Forced refetch
//! - /api/v1/approaches/cache - Cache invalidation
//! - /api/v1/predict - PHA classification
//! - /api/v1/predict/bounds - Form bounds and defaults
//! - /api/v1/model - Classifier metadata
//! - /api/v1/config - Active configuration

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;

use super::envelope::ApiErrorResponse;
use super::handlers::{self, DashboardState};

/// Upper bound on request bodies; the largest valid body is a six-field JSON object.
const MAX_BODY_BYTES: usize = 16 * 1024;

/// Create all API routes for the dashboard
pub fn api_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        // Close-approach feed
        .route("/approaches", get(handlers::get_approaches))
        .route("/approaches/refresh", post(handlers::refresh_approaches))
        .route("/approaches/cache", delete(handlers::clear_approach_cache))
        // Classifier
        .route("/predict", post(handlers::predict))
        .route("/predict/bounds", get(handlers::get_prediction_bounds))
        .route("/model", get(handlers::get_model))
        .route("/config", get(handlers::get_config))
        // Unknown API paths get an enveloped 404 instead of the dashboard page
        .fallback(|| async { ApiErrorResponse::not_found("No such API route") })
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}
