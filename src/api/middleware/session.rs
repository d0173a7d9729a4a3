//! Session resolution middleware.
//!
//! Reads the session id from the `X-Session-Id` header, checks it against
//! the session store, and injects `ActiveSession` into request extensions
//! for downstream handlers.

use axum::http::{header, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{ActiveSession, ApiContext};
use crate::config::SESSION_HEADER;

/// Require a live session on every session-scoped route.
///
/// Accesses `ApiContext` from request extensions (injected by Extension layer).
/// Responses carry `Cache-Control: no-store` since they hold per-user data.
pub async fn require_session(req: Request<axum::body::Body>, next: Next) -> Response {
    match require_session_inner(req, next).await {
        Ok(resp) => resp,
        Err(err) => err.into_response(),
    }
}

async fn require_session_inner(
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx: ApiContext = req
        .extensions()
        .get::<ApiContext>()
        .cloned()
        .ok_or(ApiError::Internal("missing API context".into()))?;

    let raw = req
        .headers()
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::SessionRequired)?;
    let id = Uuid::parse_str(raw.trim())
        .map_err(|_| ApiError::BadRequest(format!("Malformed {SESSION_HEADER} header")))?;

    if !ctx.core.session_exists(&id)? {
        return Err(ApiError::SessionNotFound);
    }

    req.extensions_mut().insert(ActiveSession(id));

    let mut response = next.run(req).await;
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    Ok(response)
}
