//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::inference::Disease;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub app: &'static str,
    pub version: &'static str,
    pub models_loaded: usize,
    pub models_expected: usize,
    pub sessions: usize,
}

/// `GET /api/health`: liveness plus a model/session summary.
pub async fn check(State(ctx): State<ApiContext>) -> Result<Json<HealthResponse>, ApiError> {
    let models_loaded = ctx.core.registry().status().loaded.len();

    Ok(Json(HealthResponse {
        status: "ok",
        app: crate::config::APP_NAME,
        version: crate::config::APP_VERSION,
        models_loaded,
        models_expected: Disease::ALL.len(),
        sessions: ctx.core.session_count()?,
    }))
}
