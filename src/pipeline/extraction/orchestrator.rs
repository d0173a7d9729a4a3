//! Report scan orchestration: decode → normalize → OCR → value extraction.

use super::lab_values::{extract_named_values, LabValues, ReadingSource};
use super::numbers::extract_numbers_from_text;
use super::types::{ImageInfo, OcrEngine, ReportScan};
use super::ExtractionError;
use crate::session::{Notice, NoticeKind};

/// Numeric tokens shown when nothing was recognized.
const MAX_PREVIEW_TOKENS: usize = 20;

/// Decode an uploaded report and convert it to an RGB PNG for the OCR engine.
pub fn normalize_image(upload: &[u8]) -> Result<(Vec<u8>, ImageInfo), ExtractionError> {
    let decoded = image::load_from_memory(upload)
        .map_err(|e| ExtractionError::ImageProcessing(e.to_string()))?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut png = Vec::new();
    image::DynamicImage::ImageRgb8(rgb)
        .write_to(&mut png, image::ImageOutputFormat::Png)
        .map_err(|e| ExtractionError::ImageProcessing(e.to_string()))?;

    Ok((png, ImageInfo { width, height }))
}

/// Scan one report image.
///
/// Only an undecodable upload is an error. An OCR failure is downgraded to
/// an empty text plus an `OcrFailure` notice.
pub fn scan_report(engine: &dyn OcrEngine, upload: &[u8]) -> Result<ReportScan, ExtractionError> {
    let (png, image) = normalize_image(upload)?;

    let (text, confidence, notice) = match engine.ocr_image(&png) {
        Ok(page) => {
            tracing::info!(
                engine = engine.name(),
                words = page.word_count,
                "Report OCR complete"
            );
            (page.text, page.confidence, None)
        }
        Err(e) => {
            tracing::warn!(engine = engine.name(), error = %e, "Report OCR failed");
            (
                String::new(),
                None,
                Some(Notice::error(NoticeKind::OcrFailure, format!("OCR failed: {e}"))),
            )
        }
    };

    let values = extract_named_values(&text);
    let notice = notice.or_else(|| values_notice(&values));
    let numeric_tokens = if values.is_empty() {
        extract_numbers_from_text(&text)
            .into_iter()
            .take(MAX_PREVIEW_TOKENS)
            .collect()
    } else {
        Vec::new()
    };

    Ok(ReportScan {
        image,
        text,
        confidence,
        values,
        numeric_tokens,
        notice,
    })
}

/// Tell the user when nothing was recognized or when some values are guesses.
fn values_notice(values: &LabValues) -> Option<Notice> {
    if values.is_empty() {
        return Some(Notice::info(
            NoticeKind::NoLabValues,
            "No structured values detected in the report",
        ));
    }
    let guessed: Vec<&str> = values
        .iter()
        .filter(|&(key, _)| {
            values
                .reading(key)
                .is_some_and(|r| r.source == ReadingSource::PriorityFill)
        })
        .map(|(key, _)| key.as_str())
        .collect();
    if guessed.is_empty() {
        return None;
    }
    Some(Notice::warning(
        NoticeKind::UnverifiedValues,
        format!(
            "Assigned by position, confirm before predicting: {}",
            guessed.join(", ")
        ),
    ))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::pipeline::extraction::{LabKey, MockOcrEngine};
    use crate::session::NoticeLevel;

    /// A small valid PNG for upload tests.
    pub(crate) fn sample_png() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(4, 3, image::Rgb([255, 255, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut bytes, image::ImageOutputFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn normalize_reports_dimensions() {
        let (png, info) = normalize_image(&sample_png()).unwrap();
        assert_eq!(info, ImageInfo { width: 4, height: 3 });
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn undecodable_upload_is_rejected() {
        let engine = MockOcrEngine::new("Glucose 100");
        let err = scan_report(&engine, b"definitely not an image").unwrap_err();
        assert!(matches!(err, ExtractionError::ImageProcessing(_)));
    }

    #[test]
    fn scan_extracts_values() {
        let engine = MockOcrEngine::new("Fasting Blood Glucose: 132 mg/dL\nCholesterol - 210");
        let scan = scan_report(&engine, &sample_png()).unwrap();
        assert_eq!(scan.values.get(LabKey::Glucose), Some(132.0));
        assert_eq!(scan.values.get(LabKey::Cholesterol), Some(210.0));
        assert!(scan.numeric_tokens.is_empty());
        assert!(scan.notice.is_none());
    }

    #[test]
    fn ocr_failure_becomes_notice_with_empty_text() {
        let engine = MockOcrEngine::failing("tesseract not installed");
        let scan = scan_report(&engine, &sample_png()).unwrap();
        assert!(scan.text.is_empty());
        assert!(scan.values.is_empty());
        let notice = scan.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::OcrFailure);
        assert!(notice.message.contains("tesseract not installed"));
    }

    #[test]
    fn numeric_preview_only_when_nothing_recognized() {
        let engine = MockOcrEngine::new("Ref. no ab-cd, page of");
        let scan = scan_report(&engine, &sample_png()).unwrap();
        assert!(scan.values.is_empty());
        assert!(scan.numeric_tokens.is_empty());
        let notice = scan.notice.unwrap();
        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(notice.kind, NoticeKind::NoLabValues);

        let digits: String = (1..=30).map(|n| format!("x{n} ")).collect();
        let engine = MockOcrEngine::new(&digits);
        let scan = scan_report(&engine, &sample_png()).unwrap();
        // Priority fill resolves values, so no preview is needed
        assert!(!scan.values.is_empty());
        assert!(scan.numeric_tokens.is_empty());
    }

    #[test]
    fn positional_guesses_are_flagged() {
        let engine = MockOcrEngine::new("TSH: 2.0 then 1.4 then 7.7");
        let scan = scan_report(&engine, &sample_png()).unwrap();
        let notice = scan.notice.unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.kind, NoticeKind::UnverifiedValues);
        assert!(notice.message.contains("T3"));
        assert!(notice.message.contains("T4"));
        assert!(!notice.message.contains("TSH"));
    }
}
