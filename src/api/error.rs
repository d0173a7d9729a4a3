//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::inference::{FeatureError, PredictionError};
use crate::pipeline::extraction::ExtractionError;
use crate::session::SessionError;

/// Structured error response body for the dashboard script.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Session required")]
    SessionRequired,
    #[error("Session not found")]
    SessionNotFound,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Upload exceeds {limit} bytes")]
    PayloadTooLarge { limit: u64 },
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Prediction failed: {0}")]
    PredictionFailed(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::SessionRequired => (
                StatusCode::UNAUTHORIZED,
                "SESSION_REQUIRED",
                "Start a session first (POST /api/session)".to_string(),
            ),
            ApiError::SessionNotFound => (
                StatusCode::NOT_FOUND,
                "SESSION_NOT_FOUND",
                "Session expired or never started".to_string(),
            ),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail.clone()),
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail.clone())
            }
            ApiError::PayloadTooLarge { limit } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                format!("Upload exceeds the {limit} byte limit"),
            ),
            ApiError::ModelUnavailable(detail) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "MODEL_UNAVAILABLE",
                detail.clone(),
            ),
            ApiError::InvalidInput(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_INPUT",
                detail.clone(),
            ),
            ApiError::PredictionFailed(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PREDICTION_FAILED",
                detail.clone(),
            ),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound(_) => ApiError::SessionNotFound,
            SessionError::LockPoisoned => ApiError::Internal("session lock poisoned".into()),
        }
    }
}

impl From<PredictionError> for ApiError {
    fn from(err: PredictionError) -> Self {
        match &err {
            PredictionError::UnknownModel(_) => ApiError::NotFound(err.to_string()),
            PredictionError::ModelUnavailable(_) => ApiError::ModelUnavailable(err.to_string()),
            PredictionError::InvalidFeatures(_) => ApiError::InvalidInput(err.to_string()),
            PredictionError::Failure { .. } => ApiError::PredictionFailed(err.to_string()),
        }
    }
}

impl From<FeatureError> for ApiError {
    fn from(err: FeatureError) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

impl From<ExtractionError> for ApiError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::ImageProcessing(detail) => {
                ApiError::BadRequest(format!("Unreadable image: {detail}"))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use uuid::Uuid;

    use crate::inference::{Disease, ModelError};

    async fn body_json(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn session_required_returns_401() {
        let response = ApiError::SessionRequired.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "SESSION_REQUIRED");
    }

    #[tokio::test]
    async fn unknown_session_maps_to_404() {
        let api_err: ApiError = SessionError::NotFound(Uuid::new_v4()).into();
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "SESSION_NOT_FOUND");
    }

    #[tokio::test]
    async fn missing_model_returns_503_with_key() {
        let api_err: ApiError = PredictionError::ModelUnavailable(Disease::Diabetes).into();
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "MODEL_UNAVAILABLE");
        assert!(json["error"]["message"].as_str().unwrap().contains("diabetes"));
    }

    #[tokio::test]
    async fn invalid_features_return_422() {
        let api_err: ApiError = FeatureError::NotAFlag {
            field: "sex",
            value: 3.0,
        }
        .into();
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn prediction_failure_message_is_shown() {
        let api_err: ApiError = PredictionError::Failure {
            disease: Disease::Thyroid,
            source: ModelError::Inference("shape mismatch".into()),
        }
        .into();
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("shape mismatch"));
    }

    #[tokio::test]
    async fn internal_returns_500() {
        let response = ApiError::Internal("something broke".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        // Internal errors hide details from client
        assert_eq!(json["error"]["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn undecodable_image_is_bad_request() {
        let api_err: ApiError = ExtractionError::ImageProcessing("bad magic".into()).into();
        assert_eq!(api_err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn payload_too_large_returns_413() {
        let response = ApiError::PayloadTooLarge { limit: 10 }.into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
