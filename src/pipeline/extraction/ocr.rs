use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::types::{OcrEngine, OcrPageResult};
use super::ExtractionError;

/// Tesseract driven through its command-line interface.
///
/// The image is staged in a temp file and recognized with TSV output, so
/// per-word confidences are available alongside the text.
pub struct TesseractCli {
    binary: PathBuf,
    lang: String,
}

impl TesseractCli {
    pub fn new(binary: &Path) -> Self {
        Self {
            binary: binary.to_path_buf(),
            lang: "eng".to_string(),
        }
    }

    /// Set language(s) for OCR (e.g., "eng", "eng+fra")
    pub fn with_languages(mut self, langs: &str) -> Self {
        self.lang = langs.to_string();
        self
    }
}

impl OcrEngine for TesseractCli {
    fn ocr_image(&self, image_bytes: &[u8]) -> Result<OcrPageResult, ExtractionError> {
        let mut staged = tempfile::Builder::new()
            .prefix("report-")
            .suffix(".png")
            .tempfile()?;
        staged.write_all(image_bytes)?;
        staged.flush()?;

        let output = Command::new(&self.binary)
            .arg(staged.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.lang)
            .arg("tsv")
            .output()
            .map_err(|e| {
                ExtractionError::OcrInit(format!("{}: {e}", self.binary.display()))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::OcrProcessing(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let tsv = String::from_utf8_lossy(&output.stdout);
        Ok(page_from_tsv(&tsv))
    }

    fn name(&self) -> &'static str {
        "tesseract"
    }
}

/// Tesseract linked in-process through libtesseract.
/// Only available when compiled with the `ocr` feature flag.
#[cfg(feature = "ocr")]
pub struct BundledTesseract {
    tessdata_dir: PathBuf,
    lang: String,
}

#[cfg(feature = "ocr")]
impl BundledTesseract {
    /// Initialize with a tessdata directory holding at least the English model.
    pub fn new(tessdata_dir: &Path) -> Result<Self, ExtractionError> {
        if !tessdata_dir.join("eng.traineddata").exists() {
            return Err(ExtractionError::TessdataNotFound(tessdata_dir.to_path_buf()));
        }
        Ok(Self {
            tessdata_dir: tessdata_dir.to_path_buf(),
            lang: "eng".to_string(),
        })
    }

    /// Set language(s) for OCR (e.g., "eng", "eng+fra")
    pub fn with_languages(mut self, langs: &str) -> Self {
        self.lang = langs.to_string();
        self
    }
}

#[cfg(feature = "ocr")]
impl OcrEngine for BundledTesseract {
    fn ocr_image(&self, image_bytes: &[u8]) -> Result<OcrPageResult, ExtractionError> {
        let tessdata = self
            .tessdata_dir
            .to_str()
            .ok_or_else(|| ExtractionError::OcrInit("Invalid tessdata path".into()))?;

        let mut tess = tesseract::Tesseract::new(Some(tessdata), Some(self.lang.as_str()))
            .map_err(|e| ExtractionError::OcrInit(format!("{e:?}")))?
            .set_image_from_mem(image_bytes)
            .map_err(|e| ExtractionError::OcrProcessing(format!("{e:?}")))?;

        let text = tess
            .get_text()
            .map_err(|e| ExtractionError::OcrProcessing(format!("{e:?}")))?;

        // Prefer TSV for per-word confidence; fall back to the page mean.
        match tess.get_tsv_text(0) {
            Ok(tsv) => Ok(page_from_tsv(&tsv)),
            Err(e) => {
                tracing::debug!(error = ?e, "Tesseract TSV output unavailable");
                let confidence = tess.mean_text_conf();
                Ok(OcrPageResult {
                    word_count: text.split_whitespace().count(),
                    text,
                    confidence: (confidence >= 0).then(|| confidence as f32 / 100.0),
                })
            }
        }
    }

    fn name(&self) -> &'static str {
        "tesseract-bundled"
    }
}

/// Mock OCR engine for unit testing without Tesseract.
pub struct MockOcrEngine {
    outcome: Result<String, String>,
}

impl MockOcrEngine {
    pub fn new(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
        }
    }

    /// An engine whose every call fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
        }
    }
}

impl OcrEngine for MockOcrEngine {
    fn ocr_image(&self, _image_bytes: &[u8]) -> Result<OcrPageResult, ExtractionError> {
        match &self.outcome {
            Ok(text) => Ok(OcrPageResult {
                text: text.clone(),
                confidence: None,
                word_count: text.split_whitespace().count(),
            }),
            Err(message) => Err(ExtractionError::OcrProcessing(message.clone())),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// One recognized word from Tesseract TSV output.
struct TsvWord<'a> {
    line: (u32, u32, u32),
    confidence: Option<f32>,
    text: &'a str,
}

/// Rebuild page text and mean confidence from Tesseract TSV output.
/// TSV columns: level page_num block_num par_num line_num word_num left top width height conf text
/// Level 5 = individual word entries. Confidence is 0-100, scaled to 0.0-1.0.
fn page_from_tsv(tsv: &str) -> OcrPageResult {
    let words: Vec<TsvWord<'_>> = tsv.lines().skip(1).filter_map(parse_tsv_word).collect();

    let mut text = String::new();
    let mut current_line = None;
    for word in &words {
        match current_line {
            Some(line) if line == word.line => text.push(' '),
            Some(_) => text.push('\n'),
            None => {}
        }
        text.push_str(word.text);
        current_line = Some(word.line);
    }

    let scored: Vec<f32> = words.iter().filter_map(|w| w.confidence).collect();
    let confidence = if scored.is_empty() {
        None
    } else {
        Some(scored.iter().sum::<f32>() / scored.len() as f32)
    };

    OcrPageResult {
        text,
        confidence,
        word_count: words.len(),
    }
}

fn parse_tsv_word(line: &str) -> Option<TsvWord<'_>> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 12 {
        return None;
    }
    // Level 5 = word
    if fields[0].parse::<i32>().ok()? != 5 {
        return None;
    }
    let text = fields[11].trim();
    if text.is_empty() {
        return None;
    }

    // Tesseract returns -1 for words it can't assign confidence to
    let confidence = fields[10]
        .parse::<f32>()
        .ok()
        .filter(|c| *c >= 0.0)
        .map(|c| c / 100.0);

    Some(TsvWord {
        line: (
            fields[2].parse().ok()?,
            fields[3].parse().ok()?,
            fields[4].parse().ok()?,
        ),
        confidence,
        text,
    })
}
