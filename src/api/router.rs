//! Dashboard router.
//!
//! Returns a composable `Router` serving the page at `/` and the JSON API
//! under `/api/`. Session-scoped routes sit behind `require_session`;
//! model status, advice and doctor search are public.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue};
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::api::dashboard;
use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Room for multipart framing and the base64 expansion on top of the
/// configured image size.
const UPLOAD_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the dashboard router.
///
/// Middleware uses `Extension<ApiContext>` (injected as the outermost layer).
/// Endpoint handlers use `State<ApiContext>` (provided via `with_state`).
pub fn dashboard_router(core: Arc<CoreState>) -> Router {
    build_router(ApiContext::new(core))
}

fn build_router(ctx: ApiContext) -> Router {
    let max_upload = usize::try_from(ctx.core.config.max_upload_bytes).unwrap_or(usize::MAX);
    let multipart_limit = max_upload.saturating_add(UPLOAD_OVERHEAD_BYTES);
    let data_url_limit = (max_upload / 3)
        .saturating_mul(4)
        .saturating_add(UPLOAD_OVERHEAD_BYTES);

    // Session-scoped routes.
    // Extension must be outermost so the middleware can extract ApiContext.
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let protected = Router::new()
        .route("/session", delete(endpoints::session::end))
        .route(
            "/report/scan",
            post(endpoints::report::scan).layer(DefaultBodyLimit::max(multipart_limit)),
        )
        .route(
            "/report/scan-image",
            post(endpoints::report::scan_image).layer(DefaultBodyLimit::max(data_url_limit)),
        )
        .route("/report/values", get(endpoints::report::values))
        .route("/forms/:disease", get(endpoints::forms::form))
        .route("/predict/:disease", post(endpoints::predict::named))
        .route("/predict/:disease/vector", post(endpoints::predict::vector))
        .route(
            "/predict/:disease/from-report",
            post(endpoints::predict::from_report),
        )
        .route(
            "/history",
            get(endpoints::history::list).delete(endpoints::history::clear),
        )
        .route("/history/export", get(endpoints::history::export))
        .route("/notices", get(endpoints::notices::drain))
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(
            middleware::session::require_session,
        ))
        .layer(axum::Extension(ctx.clone()));

    // Public routes (no session)
    let public = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/session", post(endpoints::session::start))
        .route("/models", get(endpoints::models::describe))
        .route("/models/status", get(endpoints::models::status))
        .route("/advice", get(endpoints::advice::conditions))
        .route("/advice/:condition", get(endpoints::advice::tips))
        .route("/doctors/:condition", get(endpoints::advice::doctors))
        .with_state(ctx);

    Router::new()
        .route("/", get(dashboard::page))
        .nest("/api", protected)
        .nest("/api", public)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(TraceLayer::new_for_http())
}
