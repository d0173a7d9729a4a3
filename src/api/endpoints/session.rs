//! Session lifecycle endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{ActiveSession, ApiContext};

#[derive(Serialize)]
pub struct SessionStarted {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct SessionEnded {
    pub session_id: Uuid,
    pub records_dropped: usize,
}

/// `POST /api/session`: start a fresh session with an empty history.
pub async fn start(
    State(ctx): State<ApiContext>,
) -> Result<(StatusCode, Json<SessionStarted>), ApiError> {
    let session_id = ctx.core.start_session()?;
    let created_at = ctx.core.with_session(&session_id, |s| s.created_at())?;
    Ok((
        StatusCode::CREATED,
        Json(SessionStarted {
            session_id,
            created_at,
        }),
    ))
}

/// `DELETE /api/session`: end the session, discarding its history.
pub async fn end(
    State(ctx): State<ApiContext>,
    Extension(ActiveSession(id)): Extension<ActiveSession>,
) -> Result<Json<SessionEnded>, ApiError> {
    let ended = ctx.core.end_session(&id)?;
    Ok(Json(SessionEnded {
        session_id: id,
        records_dropped: ended.history().len(),
    }))
}
