//! Run a model on one sample and log the outcome to the session history.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::features::{DiseaseFeatures, FeatureError};
use super::registry::ModelRegistry;
use super::{Disease, ModelError};
use crate::session::{Notice, NoticeKind, PredictionRecord, SessionContext};

#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("No model named '{0}'")]
    UnknownModel(String),
    #[error("Model '{0}' is not loaded")]
    ModelUnavailable(Disease),
    #[error("Invalid input: {0}")]
    InvalidFeatures(#[from] FeatureError),
    #[error("Prediction failed for {disease}: {source}")]
    Failure {
        disease: Disease,
        #[source]
        source: ModelError,
    },
}

impl PredictionError {
    fn notice_kind(&self) -> NoticeKind {
        match self {
            Self::UnknownModel(_) | Self::ModelUnavailable(_) => NoticeKind::MissingModel,
            Self::InvalidFeatures(_) => NoticeKind::InvalidInput,
            Self::Failure { .. } => NoticeKind::PredictionFailure,
        }
    }
}

/// A successful, recorded prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub disease: Disease,
    pub label: u8,
    pub probability: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

/// Predict for `disease` and append the outcome to the session history.
///
/// Every failure also queues an error notice on the session; nothing is
/// recorded unless the model produced a label.
pub fn predict_and_record(
    registry: &ModelRegistry,
    ctx: &mut SessionContext,
    disease: Disease,
    features: &[f64],
) -> Result<Prediction, PredictionError> {
    run_and_record(registry, ctx, disease, features).map_err(|e| note_failure(ctx, disease, e))
}

/// Log a prediction that never reached the history and queue it as a notice.
pub fn note_failure(
    ctx: &mut SessionContext,
    disease: Disease,
    error: PredictionError,
) -> PredictionError {
    queue_failure(ctx, disease.model_key(), error)
}

/// Resolve a model key from the request. A key naming no model is handled
/// like an unloaded one: nothing is recorded and a notice is queued.
pub fn resolve_model_key(ctx: &mut SessionContext, key: &str) -> Result<Disease, PredictionError> {
    key.parse::<Disease>()
        .map_err(|_| queue_failure(ctx, key, PredictionError::UnknownModel(key.to_string())))
}

fn queue_failure(ctx: &mut SessionContext, model: &str, error: PredictionError) -> PredictionError {
    tracing::warn!(model, error = %error, "Prediction not recorded");
    ctx.push_notice(Notice::error(error.notice_kind(), error.to_string()));
    error
}

/// Typed entry point for inputs already parsed into a layout.
pub fn predict_features(
    registry: &ModelRegistry,
    ctx: &mut SessionContext,
    features: &DiseaseFeatures,
) -> Result<Prediction, PredictionError> {
    predict_and_record(registry, ctx, features.disease(), &features.to_vector())
}

/// `(label, probability)` view of an outcome; both are `None` on failure.
pub fn outcome_pair(outcome: &Result<Prediction, PredictionError>) -> (Option<u8>, Option<f64>) {
    match outcome {
        Ok(p) => (Some(p.label), p.probability),
        Err(_) => (None, None),
    }
}

fn run_and_record(
    registry: &ModelRegistry,
    ctx: &mut SessionContext,
    disease: Disease,
    features: &[f64],
) -> Result<Prediction, PredictionError> {
    let model = registry
        .get(disease)
        .ok_or(PredictionError::ModelUnavailable(disease))?;
    DiseaseFeatures::from_vector(disease, features)?;

    let label = model
        .predict(features)
        .map_err(|source| PredictionError::Failure { disease, source })?;

    let probability = match model.predict_proba(features) {
        Some(Ok(p)) if (0.0..=1.0).contains(&p) => Some(p),
        Some(Ok(p)) => {
            tracing::warn!(model = disease.model_key(), probability = p, "Probability out of range");
            None
        }
        Some(Err(e)) => {
            tracing::warn!(model = disease.model_key(), error = %e, "Probability unavailable");
            None
        }
        None => None,
    };

    let record = PredictionRecord::new(disease, features, label, probability);
    let recorded_at = record.time;
    ctx.history_mut().append(record);
    ctx.set_last_condition(disease.condition());

    tracing::info!(
        model = disease.model_key(),
        label,
        probability = ?probability,
        "Prediction recorded"
    );

    Ok(Prediction {
        disease,
        label,
        probability,
        recorded_at,
    })
}
