//! Input form descriptions, prefilled from the session's last report scan.

use axum::extract::{Path, State};
use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::types::{ActiveSession, ApiContext};
use crate::inference::{form_for, Disease, FormSpec};

/// `GET /api/forms/:disease`
pub async fn form(
    State(ctx): State<ApiContext>,
    Extension(ActiveSession(id)): Extension<ActiveSession>,
    Path(disease): Path<String>,
) -> Result<Json<FormSpec>, ApiError> {
    let disease = parse_disease(&disease)?;
    let spec = ctx
        .core
        .with_session(&id, |s| form_for(disease, s.ocr_values()))?;
    Ok(Json(spec))
}

/// Resolve a model key from the URL path.
pub(crate) fn parse_disease(key: &str) -> Result<Disease, ApiError> {
    key.parse::<Disease>().map_err(ApiError::NotFound)
}
