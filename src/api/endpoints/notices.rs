//! Pending user-visible notices.

use axum::extract::State;
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ActiveSession, ApiContext};
use crate::session::Notice;

#[derive(Serialize)]
pub struct NoticesResponse {
    pub notices: Vec<Notice>,
}

/// `GET /api/notices`: hands over and clears the session's queue.
pub async fn drain(
    State(ctx): State<ApiContext>,
    Extension(ActiveSession(id)): Extension<ActiveSession>,
) -> Result<Json<NoticesResponse>, ApiError> {
    let notices = ctx.core.with_session(&id, |s| s.drain_notices())?;
    Ok(Json(NoticesResponse { notices }))
}
