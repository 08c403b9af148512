//! REST API module using Axum
//!
//! Provides HTTP endpoints for the NEO Sentinel dashboard:
//! - v1 API with a consistent `{data, meta}` / `{error, meta}` envelope
//! - Dashboard page served via `rust-embed` (compiled into the binary)

pub mod envelope;
pub mod handlers;
mod routes;

pub use handlers::DashboardState;

use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use rust_embed::Embed;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Env var holding a comma-separated list of allowed CORS origins.
pub const CORS_ORIGINS_ENV_VAR: &str = "NEO_CORS_ORIGINS";

/// Dashboard assets compiled from `dashboard/dist/`.
#[derive(Embed)]
#[folder = "dashboard/dist/"]
struct DashboardAssets;

/// Embedded file at `path`, typed by its extension.
fn embedded_asset(path: &str) -> Option<Response> {
    let file = DashboardAssets::get(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Some(([(header::CONTENT_TYPE, mime.to_string())], file.data.into_owned()).into_response())
}

/// Serve a dashboard asset. Any other non-API path gets the page itself,
/// which picks its tab client-side.
async fn serve_asset(uri: Uri) -> Response {
    let path = match uri.path().trim_start_matches('/') {
        "" => "index.html",
        p => p,
    };

    embedded_asset(path)
        .or_else(|| embedded_asset("index.html"))
        // index.html was absent from dashboard/dist/ at compile time
        .unwrap_or_else(|| {
            (StatusCode::NOT_FOUND, "NEO Sentinel dashboard page is not embedded in this build.")
                .into_response()
        })
}

/// Build a CORS layer that is restrictive by default (same-origin only).
///
/// Set `NEO_CORS_ORIGINS` to a comma-separated list of allowed origins
/// for development (e.g., `http://localhost:5173`).
fn build_cors_layer() -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    match std::env::var(CORS_ORIGINS_ENV_VAR) {
        Ok(origins) => {
            let allowed: Vec<_> = origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();
            tracing::info!(origins = %origins, "CORS: allowing configured origins");
            base.allow_origin(allowed)
        }
        Err(_) => base,
    }
}

/// Create the complete application router with API and dashboard serving.
pub fn create_app(state: DashboardState) -> Router {
    let cors = build_cors_layer();

    Router::new()
        .nest("/api/v1", routes::api_routes(state))
        .fallback(serve_asset)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
