//! Shared application state behind every HTTP handler.
//!
//! The model registry and OCR engine are built once at startup and only
//! read afterwards. Per-user state lives in the session store; handlers
//! reach it through `with_session` so no lock guard is held across an
//! `.await`.

use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::config::DashboardConfig;
use crate::inference::ModelRegistry;
use crate::pipeline::extraction::{OcrEngine, TesseractCli};
use crate::session::{SessionContext, SessionError, SessionStore};

// ═══════════════════════════════════════════════════════════
// CoreState
// ═══════════════════════════════════════════════════════════

pub struct CoreState {
    pub config: DashboardConfig,
    registry: ModelRegistry,
    ocr: Arc<dyn OcrEngine>,
    sessions: RwLock<SessionStore>,
}

impl CoreState {
    pub fn new(config: DashboardConfig, registry: ModelRegistry, ocr: Arc<dyn OcrEngine>) -> Self {
        Self {
            config,
            registry,
            ocr,
            sessions: RwLock::new(SessionStore::default()),
        }
    }

    /// Load models from the configured directory and pick an OCR engine.
    /// Never fails: unavailable models are recorded.
    pub fn from_config(config: DashboardConfig) -> Self {
        let registry = ModelRegistry::load_from_dir(&config.models_dir);
        let ocr = build_ocr_engine(&config);
        Self::new(config, registry, ocr)
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn ocr(&self) -> Arc<dyn OcrEngine> {
        Arc::clone(&self.ocr)
    }

    // ── Sessions ─────────────────────────────────────────

    pub fn start_session(&self) -> Result<Uuid, SessionError> {
        let mut store = self.sessions.write().map_err(|_| SessionError::LockPoisoned)?;
        let id = store.create();
        tracing::info!(session = %id, active = store.len(), "Session started");
        Ok(id)
    }

    /// Tear down a session, dropping its history and cached values.
    pub fn end_session(&self, id: &Uuid) -> Result<SessionContext, SessionError> {
        let mut store = self.sessions.write().map_err(|_| SessionError::LockPoisoned)?;
        let ctx = store.end(id)?;
        tracing::info!(session = %id, records = ctx.history().len(), "Session ended");
        Ok(ctx)
    }

    pub fn session_exists(&self, id: &Uuid) -> Result<bool, SessionError> {
        let store = self.sessions.read().map_err(|_| SessionError::LockPoisoned)?;
        Ok(store.contains(id))
    }

    /// Run `f` against one session's context.
    pub fn with_session<T>(
        &self,
        id: &Uuid,
        f: impl FnOnce(&mut SessionContext) -> T,
    ) -> Result<T, SessionError> {
        let mut store = self.sessions.write().map_err(|_| SessionError::LockPoisoned)?;
        let ctx = store.get_mut(id)?;
        Ok(f(ctx))
    }

    pub fn session_count(&self) -> Result<usize, SessionError> {
        let store = self.sessions.read().map_err(|_| SessionError::LockPoisoned)?;
        Ok(store.len())
    }
}

/// Build the OCR engine, respecting feature flags.
///
/// With the `ocr` feature and a usable tessdata directory Tesseract runs
/// in-process; otherwise the configured executable is used.
fn build_ocr_engine(config: &DashboardConfig) -> Arc<dyn OcrEngine> {
    #[cfg(feature = "ocr")]
    {
        if let Some(tessdata) = &config.tessdata_dir {
            match crate::pipeline::extraction::BundledTesseract::new(tessdata) {
                Ok(engine) => {
                    tracing::info!(tessdata = %tessdata.display(), "Tesseract OCR linked in-process");
                    return Arc::new(engine.with_languages(&config.ocr_lang));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Falling back to the tesseract executable");
                }
            }
        }
    }

    Arc::new(TesseractCli::new(&config.tesseract_bin).with_languages(&config.ocr_lang))
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::inference::{Disease, MockClassifier};
    use crate::pipeline::extraction::MockOcrEngine;

    /// Core state with a mock OCR engine and the given registry.
    pub(crate) fn test_core(registry: ModelRegistry, ocr_text: &str) -> Arc<CoreState> {
        Arc::new(CoreState::new(
            DashboardConfig::default(),
            registry,
            Arc::new(MockOcrEngine::new(ocr_text)),
        ))
    }

    #[test]
    fn sessions_start_and_end() {
        let core = test_core(ModelRegistry::new(), "");
        let id = core.start_session().unwrap();
        assert!(core.session_exists(&id).unwrap());
        assert_eq!(core.session_count().unwrap(), 1);

        core.end_session(&id).unwrap();
        assert!(!core.session_exists(&id).unwrap());
        assert!(matches!(core.end_session(&id), Err(SessionError::NotFound(_))));
    }

    #[test]
    fn with_session_mutates_only_that_session() {
        let registry = ModelRegistry::new()
            .with_model(Disease::Thyroid, Box::new(MockClassifier::new(7, 1)));
        let core = test_core(registry, "");
        let a = core.start_session().unwrap();
        let b = core.start_session().unwrap();

        let outcome = core
            .with_session(&a, |ctx| {
                crate::inference::predict_and_record(
                    core.registry(),
                    ctx,
                    Disease::Thyroid,
                    &[40.0, 1.0, 0.0, 3.5, 1.0, 100.0, 8.0],
                )
            })
            .unwrap();
        assert!(outcome.is_ok());

        assert_eq!(core.with_session(&a, |ctx| ctx.history().len()).unwrap(), 1);
        assert_eq!(core.with_session(&b, |ctx| ctx.history().len()).unwrap(), 0);
    }

    #[test]
    fn unknown_session_rejected() {
        let core = test_core(ModelRegistry::new(), "");
        let err = core.with_session(&Uuid::new_v4(), |_| ()).unwrap_err();
        assert!(matches!(err, SessionError::NotFound(_)));
    }

    #[test]
    fn from_config_records_missing_models() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig {
            models_dir: dir.path().to_path_buf(),
            ..DashboardConfig::default()
        };
        let core = CoreState::from_config(config);
        assert_eq!(core.registry().status().errors.len(), 5);
        assert_eq!(core.ocr().name(), "tesseract");
    }

    #[test]
    fn unusable_tessdata_falls_back_to_executable() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig {
            tessdata_dir: Some(dir.path().to_path_buf()),
            ..DashboardConfig::default()
        };
        assert_eq!(build_ocr_engine(&config).name(), "tesseract");
    }
}
