//! Model status panel and Model Info view.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;
use crate::inference::{Disease, ModelDescription};

#[derive(Serialize)]
pub struct StatusResponse {
    pub all_loaded: bool,
    pub loaded: Vec<Disease>,
    /// Load error per unavailable model.
    pub errors: BTreeMap<Disease, String>,
    pub ocr_engine: &'static str,
}

/// `GET /api/models/status`
pub async fn status(State(ctx): State<ApiContext>) -> Json<StatusResponse> {
    let status = ctx.core.registry().status();
    Json(StatusResponse {
        all_loaded: status.errors.is_empty(),
        loaded: status.loaded,
        errors: status.errors,
        ocr_engine: ctx.core.ocr().name(),
    })
}

/// `GET /api/models`: kind and input width of each loaded classifier.
pub async fn describe(State(ctx): State<ApiContext>) -> Json<Vec<ModelDescription>> {
    Json(ctx.core.registry().describe())
}
