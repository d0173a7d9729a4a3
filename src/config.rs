use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Diagnosis Dashboard";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exported history file name offered to the browser.
pub const HISTORY_EXPORT_FILE: &str = "pred_history.csv";

/// Sessions untouched for this long are dropped on the next session start.
pub const SESSION_IDLE_MINUTES: i64 = 60;

/// Header carrying the session id on every session-scoped request.
pub const SESSION_HEADER: &str = "x-session-id";

const DEFAULT_BIND: &str = "127.0.0.1:8501";
const DEFAULT_MODELS_DIR: &str = "Models";
const DEFAULT_TESSERACT: &str = "tesseract";
const DEFAULT_OCR_LANG: &str = "eng";
const DEFAULT_MAX_UPLOAD_MB: u64 = 10;

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "diagnosis_dashboard=info,tower_http=info"
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub bind_addr: SocketAddr,
    /// Directory holding the five classifier artifacts.
    pub models_dir: PathBuf,
    /// Tesseract executable (name on PATH or absolute path).
    pub tesseract_bin: PathBuf,
    /// Tessdata directory for the in-process engine (`ocr` feature).
    pub tessdata_dir: Option<PathBuf>,
    pub ocr_lang: String,
    pub max_upload_bytes: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8501)),
            models_dir: PathBuf::from(DEFAULT_MODELS_DIR),
            tesseract_bin: PathBuf::from(DEFAULT_TESSERACT),
            tessdata_dir: None,
            ocr_lang: DEFAULT_OCR_LANG.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
        }
    }
}

impl DashboardConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup("DASHBOARD_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                var: "DASHBOARD_BIND",
                value: bind_raw.clone(),
                reason: e.to_string(),
            })?;

        let max_upload_mb = match lookup("DASHBOARD_MAX_UPLOAD_MB") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => {
                    return Err(ConfigError::InvalidValue {
                        var: "DASHBOARD_MAX_UPLOAD_MB",
                        value: raw,
                        reason: "must be at least 1".into(),
                    })
                }
                Ok(mb) => mb,
                Err(e) => {
                    return Err(ConfigError::InvalidValue {
                        var: "DASHBOARD_MAX_UPLOAD_MB",
                        value: raw,
                        reason: e.to_string(),
                    })
                }
            },
            None => DEFAULT_MAX_UPLOAD_MB,
        };

        Ok(Self {
            bind_addr,
            models_dir: lookup("DASHBOARD_MODELS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODELS_DIR)),
            tesseract_bin: lookup("DASHBOARD_TESSERACT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TESSERACT)),
            tessdata_dir: lookup("DASHBOARD_TESSDATA").map(PathBuf::from),
            ocr_lang: lookup("DASHBOARD_OCR_LANG").unwrap_or_else(|| DEFAULT_OCR_LANG.to_string()),
            max_upload_bytes: max_upload_mb * 1024 * 1024,
        })
    }
}
