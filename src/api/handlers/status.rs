//! Service health endpoint

use axum::extract::State;
use axum::response::Response;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::DashboardState;
use crate::api::envelope::ApiResponse;
use crate::feed::FeedQuery;
use crate::model::ModelSummary;

/// Health and readiness summary
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: i64,
    /// The classifier is loaded before the server binds, so this is always present
    pub model: ModelSummary,
    pub feed: FeedHealth,
}

#[derive(Debug, Serialize)]
pub struct FeedHealth {
    /// Whether a table is cached for the configured query
    pub cached: bool,
    /// A CNEOS fetch is in flight
    pub refreshing: bool,
    pub query: FeedQuery,
}

/// GET /api/v1/health - Uptime, model and feed-cache state
pub async fn get_health(State(state): State<DashboardState>) -> Response {
    let now = Utc::now();
    ApiResponse::ok(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        started_at: state.started_at,
        uptime_seconds: (now - state.started_at).num_seconds(),
        model: (*state.model).clone(),
        feed: FeedHealth {
            cached: state.feed.is_cached(),
            refreshing: state.feed.is_busy(),
            query: state.feed.query().clone(),
        },
    })
}
