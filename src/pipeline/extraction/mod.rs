pub mod types;
pub mod numbers;
pub mod lab_values;
pub mod ocr;
pub mod orchestrator;

pub use types::*;
pub use numbers::*;
pub use lab_values::*;
pub use ocr::*;
pub use orchestrator::*;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid number: {0:?}")]
    InvalidNumber(String),

    #[error("Tesseract OCR initialization failed: {0}")]
    OcrInit(String),

    #[error("Tessdata directory has no eng.traineddata: {0}")]
    TessdataNotFound(PathBuf),

    #[error("OCR processing failed: {0}")]
    OcrProcessing(String),

    #[error("Image processing error: {0}")]
    ImageProcessing(String),
}
