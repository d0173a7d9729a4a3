//! Report upload endpoints: lab report image → OCR → recognized values.
//!
//! `POST /api/report/scan` takes a multipart `file` field; `POST
//! /api/report/scan-image` takes a base64 data URL for clients that capture
//! from a canvas or camera. Both cache the recognized values in the session
//! so later form and from-report predictions can use them.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::{ActiveSession, ApiContext};
use crate::pipeline::extraction::{scan_report, LabValues, ReportScan};

/// Multipart field carrying the image.
const FILE_FIELD: &str = "file";

#[derive(Deserialize)]
pub struct DataUrlUpload {
    /// Base64 data URL (e.g., `data:image/png;base64,iVBOR...`) or bare base64.
    pub data: String,
}

#[derive(Serialize)]
pub struct ValuesResponse {
    /// `None` until a report has been scanned in this session.
    pub values: Option<LabValues>,
}

/// `POST /api/report/scan`: multipart upload.
pub async fn scan(
    State(ctx): State<ApiContext>,
    Extension(ActiveSession(id)): Extension<ActiveSession>,
    mut multipart: Multipart,
) -> Result<Json<ReportScan>, ApiError> {
    let limit = ctx.core.config.max_upload_bytes;
    let mut upload: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge { limit }
        } else {
            ApiError::BadRequest(format!("Multipart error: {e}"))
        }
    })? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let bytes = field.bytes().await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::PayloadTooLarge { limit }
            } else {
                ApiError::BadRequest(format!("Failed to read upload: {e}"))
            }
        })?;
        upload = Some(bytes.to_vec());
        break;
    }

    let bytes = upload.ok_or_else(|| {
        ApiError::BadRequest(format!("Missing multipart field '{FILE_FIELD}'"))
    })?;
    scan_and_cache(&ctx, id, bytes).await.map(Json)
}

/// `POST /api/report/scan-image`: base64 data URL upload.
pub async fn scan_image(
    State(ctx): State<ApiContext>,
    Extension(ActiveSession(id)): Extension<ActiveSession>,
    Json(payload): Json<DataUrlUpload>,
) -> Result<Json<ReportScan>, ApiError> {
    let bytes = decode_data_url(&payload.data)
        .map_err(|e| ApiError::BadRequest(format!("Invalid image data: {e}")))?;
    scan_and_cache(&ctx, id, bytes).await.map(Json)
}

/// `GET /api/report/values`: values cached by the last scan.
pub async fn values(
    State(ctx): State<ApiContext>,
    Extension(ActiveSession(id)): Extension<ActiveSession>,
) -> Result<Json<ValuesResponse>, ApiError> {
    let values = ctx.core.with_session(&id, |s| s.ocr_values().cloned())?;
    Ok(Json(ValuesResponse { values }))
}

async fn scan_and_cache(
    ctx: &ApiContext,
    id: uuid::Uuid,
    bytes: Vec<u8>,
) -> Result<ReportScan, ApiError> {
    let limit = ctx.core.config.max_upload_bytes;
    if bytes.is_empty() {
        return Err(ApiError::BadRequest("Empty upload".into()));
    }
    if bytes.len() as u64 > limit {
        return Err(ApiError::PayloadTooLarge { limit });
    }

    // Image decoding and the Tesseract process both block.
    let engine = ctx.core.ocr();
    let scan = tokio::task::spawn_blocking(move || scan_report(engine.as_ref(), &bytes))
        .await
        .map_err(|e| ApiError::Internal(format!("Scan task: {e}")))??;

    ctx.core.with_session(&id, |s| {
        s.set_ocr_values(scan.values.clone());
        if let Some(notice) = &scan.notice {
            s.push_notice(notice.clone());
        }
    })?;

    tracing::info!(
        session = %id,
        width = scan.image.width,
        height = scan.image.height,
        values = scan.values.len(),
        "Report scanned"
    );
    Ok(scan)
}

/// Accepts `data:<mime>;base64,<payload>` or a bare base64 payload.
fn decode_data_url(data_url: &str) -> Result<Vec<u8>, String> {
    let base64_data = match data_url.find(',') {
        Some(idx) => &data_url[idx + 1..],
        None => data_url,
    };

    base64::engine::general_purpose::STANDARD
        .decode(base64_data.trim())
        .map_err(|e| format!("Base64 decode failed: {e}"))
}
