//! Active configuration endpoint

use axum::response::Response;

use crate::api::envelope::{ApiErrorResponse, ApiResponse};

/// GET /api/v1/config - Return the active configuration
pub async fn get_config() -> Response {
    if !crate::config::is_initialized() {
        return ApiErrorResponse::service_unavailable("Configuration not initialized");
    }
    ApiResponse::ok(crate::config::get())
}
