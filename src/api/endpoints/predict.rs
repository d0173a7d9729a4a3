//! Prediction endpoints.
//!
//! All three routes end in the same invoker call, so every outcome lands in
//! the session history (or as a notice) the same way. They differ only in
//! where the feature vector comes from.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::advice::Condition;
use crate::api::error::ApiError;
use crate::api::types::{ActiveSession, ApiContext};
use crate::inference::{
    note_failure, predict_and_record, predict_features, resolve_model_key, Disease,
    DiseaseFeatures, ModelRegistry, Prediction, PredictionError,
};
use crate::pipeline::extraction::LabValues;
use crate::session::SessionContext;

#[derive(Deserialize)]
pub struct VectorRequest {
    pub features: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    #[serde(flatten)]
    pub prediction: Prediction,
    /// `positive` or `negative`.
    pub outcome: &'static str,
    pub condition: Condition,
    pub specialist: &'static str,
    /// Advice is only offered after a positive result.
    pub show_tips: bool,
}

impl From<Prediction> for PredictResponse {
    fn from(prediction: Prediction) -> Self {
        let condition = prediction.disease.condition();
        let positive = prediction.label == 1;
        Self {
            outcome: if positive { "positive" } else { "negative" },
            condition,
            specialist: condition.specialist(),
            show_tips: positive,
            prediction,
        }
    }
}

/// `POST /api/predict/:disease`: named fields of the disease's layout.
pub async fn named(
    State(ctx): State<ApiContext>,
    Extension(ActiveSession(id)): Extension<ActiveSession>,
    Path(key): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<PredictResponse>, ApiError> {
    let registry = ctx.core.registry();
    let outcome = ctx.core.with_session(&id, |s| {
        let disease = resolve_model_key(s, &key)?;
        match DiseaseFeatures::from_json(disease, body) {
            Ok(features) => predict_features(registry, s, &features),
            Err(e) => Err(note_failure(s, disease, PredictionError::from(e))),
        }
    })?;
    Ok(Json(outcome?.into()))
}

/// `POST /api/predict/:disease/vector`: raw vector in layout order.
pub async fn vector(
    State(ctx): State<ApiContext>,
    Extension(ActiveSession(id)): Extension<ActiveSession>,
    Path(key): Path<String>,
    Json(body): Json<VectorRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let registry = ctx.core.registry();
    let outcome = ctx.core.with_session(&id, |s| {
        let disease = resolve_model_key(s, &key)?;
        predict_and_record(registry, s, disease, &body.features)
    })?;
    Ok(Json(outcome?.into()))
}

/// `POST /api/predict/:disease/from-report`: vector built from the last scan.
pub async fn from_report(
    State(ctx): State<ApiContext>,
    Extension(ActiveSession(id)): Extension<ActiveSession>,
    Path(key): Path<String>,
) -> Result<Json<PredictResponse>, ApiError> {
    let registry = ctx.core.registry();
    let outcome = ctx.core.with_session(&id, |s| {
        let disease = resolve_model_key(s, &key)?;
        let values = s.ocr_values().cloned().unwrap_or_default();
        report_prediction(registry, s, disease, &values)
    })?;
    Ok(Json(outcome?.into()))
}

fn report_prediction(
    registry: &ModelRegistry,
    session: &mut SessionContext,
    disease: Disease,
    values: &LabValues,
) -> Result<Prediction, PredictionError> {
    match DiseaseFeatures::from_report(disease, values) {
        Ok(features) => predict_features(registry, session, &features),
        Err(e) => Err(note_failure(session, disease, e.into())),
    }
}
