//! Prediction history: list, CSV download, clear.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ActiveSession, ApiContext};
use crate::config::HISTORY_EXPORT_FILE;
use crate::session::PredictionRecord;

#[derive(Serialize)]
pub struct HistoryResponse {
    pub records: Vec<PredictionRecord>,
}

#[derive(Serialize)]
pub struct ClearedResponse {
    pub cleared: usize,
}

/// `GET /api/history`: records in insertion order.
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(ActiveSession(id)): Extension<ActiveSession>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let records = ctx.core.with_session(&id, |s| s.history().all().to_vec())?;
    Ok(Json(HistoryResponse { records }))
}

/// `GET /api/history/export`: `pred_history.csv` download.
pub async fn export(
    State(ctx): State<ApiContext>,
    Extension(ActiveSession(id)): Extension<ActiveSession>,
) -> Result<impl IntoResponse, ApiError> {
    let csv = ctx.core.with_session(&id, |s| s.history().export_csv())?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{HISTORY_EXPORT_FILE}\""),
            ),
        ],
        csv,
    ))
}

/// `DELETE /api/history`
pub async fn clear(
    State(ctx): State<ApiContext>,
    Extension(ActiveSession(id)): Extension<ActiveSession>,
) -> Result<Json<ClearedResponse>, ApiError> {
    let cleared = ctx.core.with_session(&id, |s| {
        let n = s.history().len();
        s.history_mut().clear();
        n
    })?;
    tracing::info!(session = %id, cleared, "History cleared");
    Ok(Json(ClearedResponse { cleared }))
}
