//! Close-approach feed endpoints

use axum::extract::State;
use axum::response::Response;
use serde::Serialize;

use super::DashboardState;
use crate::api::envelope::{ApiErrorResponse, ApiResponse};
use crate::pipeline::FeedView;

fn feed_response(view: FeedView) -> Response {
    match view {
        FeedView::Unavailable { code, message } => ApiErrorResponse::bad_gateway(code, message),
        view => ApiResponse::ok(view),
    }
}

/// GET /api/v1/approaches - Memoized close-approach table and chart
pub async fn get_approaches(State(state): State<DashboardState>) -> Response {
    feed_response(state.feed.view().await)
}

/// POST /api/v1/approaches/refresh - Refetch from CNEOS, bypassing the cache
///
/// A failed refresh leaves the previously cached table in place.
pub async fn refresh_approaches(State(state): State<DashboardState>) -> Response {
    feed_response(state.feed.refresh_view().await)
}

#[derive(Debug, Serialize)]
pub struct CacheClearResponse {
    /// Whether a cached table was dropped
    pub cleared: bool,
}

/// DELETE /api/v1/approaches/cache - Invalidate the feed cache
pub async fn clear_approach_cache(State(state): State<DashboardState>) -> Response {
    let cleared = state.feed.clear().await;
    ApiResponse::ok(CacheClearResponse { cleared })
}
