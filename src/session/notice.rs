use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// What produced a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    MissingModel,
    PredictionFailure,
    InvalidInput,
    OcrFailure,
    /// OCR succeeded but no lab value was recognized.
    NoLabValues,
    /// Some values were only assigned by position and need checking.
    UnverifiedValues,
}

/// A user-visible, non-fatal message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub kind: NoticeKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notice {
    pub fn error(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self::with_level(NoticeLevel::Error, kind, message)
    }

    pub fn info(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self::with_level(NoticeLevel::Info, kind, message)
    }

    pub fn warning(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self::with_level(NoticeLevel::Warning, kind, message)
    }

    fn with_level(level: NoticeLevel, kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            level,
            kind,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}
