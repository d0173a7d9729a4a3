use serde::{Deserialize, Serialize};

use super::lab_values::LabValues;
use super::ExtractionError;
use crate::session::Notice;

/// Raw OCR result from the engine
#[derive(Debug, Clone, PartialEq)]
pub struct OcrPageResult {
    pub text: String,
    /// Mean word confidence in 0.0-1.0, when the engine reports one.
    pub confidence: Option<f32>,
    pub word_count: usize,
}

/// OCR engine abstraction (allows mocking for tests)
pub trait OcrEngine: Send + Sync {
    fn ocr_image(&self, image_bytes: &[u8]) -> Result<OcrPageResult, ExtractionError>;

    /// Short engine name for logs and the status panel.
    fn name(&self) -> &'static str;
}

/// Dimensions of the decoded upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

/// Everything the upload page shows after scanning one report image.
#[derive(Debug, Clone, Serialize)]
pub struct ReportScan {
    pub image: ImageInfo,
    /// Extracted text; empty when OCR failed.
    pub text: String,
    pub confidence: Option<f32>,
    pub values: LabValues,
    /// First numeric tokens of the text, only filled when no value was recognized.
    pub numeric_tokens: Vec<String>,
    /// Set when OCR failed and an empty text was substituted.
    pub notice: Option<Notice>,
}
