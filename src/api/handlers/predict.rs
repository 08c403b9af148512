//! PHA prediction endpoints

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use tracing::{info, warn};

use super::DashboardState;
use crate::api::envelope::{ApiErrorResponse, ApiResponse};
use crate::inference::run_inference;
use crate::types::{FeatureBound, HazardLabel, OrbitalFeatureVector, FEATURE_BOUNDS};

// ============================================================================
// Prediction
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub label: HazardLabel,
    pub is_hazardous: bool,
    /// `HAZARDOUS (PHA = 1)` or `SAFE (PHA = 0)`
    pub verdict: &'static str,
    /// Probability of the hazardous class (0.0-1.0), for either label
    pub hazard_probability: f64,
    /// `hazard_probability` as a percentage string, e.g. `87.00%`
    pub confidence: String,
    pub features: OrbitalFeatureVector,
}

/// POST /api/v1/predict - Classify one set of orbital elements
///
/// Body: `{"H": 22.0, "e": 0.5, "a": 2.0, "q": 1.0, "i": 10.0, "moid": 0.05}`.
/// Values outside the form bounds are rejected with 400.
pub async fn predict(
    State(state): State<DashboardState>,
    body: Result<Json<OrbitalFeatureVector>, JsonRejection>,
) -> Response {
    let features = match body {
        Ok(Json(features)) => features,
        Err(rejection) => return ApiErrorResponse::bad_request(rejection.body_text()),
    };

    if let Err(errors) = features.check_bounds() {
        warn!(?errors, "Rejected out-of-bounds prediction input");
        return ApiErrorResponse::invalid_input(
            format!("{} field(s) out of range", errors.len()),
            errors,
        );
    }

    let result = run_inference(state.predictor.as_ref(), &features);
    info!(
        label = %result.label,
        confidence = %result.confidence_display(),
        "PHA prediction served"
    );

    ApiResponse::ok(PredictionResponse {
        label: result.label,
        is_hazardous: result.is_hazardous(),
        verdict: result.label.verdict(),
        hazard_probability: result.hazard_probability,
        confidence: result.confidence_display(),
        features: result.features,
    })
}

// ============================================================================
// Input Bounds
// ============================================================================

#[derive(Debug, Serialize)]
pub struct BoundsResponse {
    /// One entry per feature, in model order
    pub features: &'static [FeatureBound],
    pub defaults: OrbitalFeatureVector,
}

/// GET /api/v1/predict/bounds - Input ranges, steps and defaults for the form
pub async fn get_prediction_bounds() -> Response {
    ApiResponse::ok(BoundsResponse {
        features: &FEATURE_BOUNDS,
        defaults: OrbitalFeatureVector::default(),
    })
}

/// GET /api/v1/model - Loaded classifier metadata
pub async fn get_model(State(state): State<DashboardState>) -> Response {
    ApiResponse::ok(state.model.as_ref())
}
