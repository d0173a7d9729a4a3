//! Startup-loaded, read-only set of disease classifiers.
//!
//! Every artifact loads independently. A missing or broken file is
//! recorded against its disease and never stops the others from loading.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::classifier::{Classifier, ModelInfo};
use super::features::DiseaseFeatures;
use super::linear::LinearModel;
use super::{Disease, ModelError};

struct LoadedModel {
    classifier: Box<dyn Classifier>,
    source: Option<PathBuf>,
}

#[derive(Default)]
pub struct ModelRegistry {
    models: BTreeMap<Disease, LoadedModel>,
    errors: BTreeMap<Disease, String>,
}

/// Status panel contents: which models are usable and why the rest are not.
#[derive(Debug, Clone, Serialize)]
pub struct ModelStatus {
    pub loaded: Vec<Disease>,
    pub errors: BTreeMap<Disease, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelDescription {
    pub disease: Disease,
    pub name: &'static str,
    pub source: Option<PathBuf>,
    #[serde(flatten)]
    pub info: ModelInfo,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load all five artifacts from `dir`.
    pub fn load_from_dir(dir: &Path) -> Self {
        let mut registry = Self::new();
        for disease in Disease::ALL {
            match load_artifact(dir, disease) {
                Ok((classifier, path)) => {
                    tracing::info!(
                        model = disease.model_key(),
                        path = %path.display(),
                        kind = classifier.describe().kind,
                        "Model loaded"
                    );
                    registry.models.insert(
                        disease,
                        LoadedModel {
                            classifier,
                            source: Some(path),
                        },
                    );
                }
                Err(e) => {
                    tracing::warn!(model = disease.model_key(), error = %e, "Model unavailable");
                    registry.errors.insert(disease, e.to_string());
                }
            }
        }
        registry
    }

    /// Register an already-built classifier, replacing any earlier error.
    pub fn with_model(mut self, disease: Disease, classifier: Box<dyn Classifier>) -> Self {
        self.errors.remove(&disease);
        self.models.insert(
            disease,
            LoadedModel {
                classifier,
                source: None,
            },
        );
        self
    }

    /// Record a load failure for `disease`.
    pub fn with_error(mut self, disease: Disease, error: impl Into<String>) -> Self {
        self.models.remove(&disease);
        self.errors.insert(disease, error.into());
        self
    }

    pub fn get(&self, disease: Disease) -> Option<&dyn Classifier> {
        self.models.get(&disease).map(|m| m.classifier.as_ref())
    }

    pub fn status(&self) -> ModelStatus {
        ModelStatus {
            loaded: self.models.keys().copied().collect(),
            errors: self.errors.clone(),
        }
    }

    pub fn describe(&self) -> Vec<ModelDescription> {
        self.models
            .iter()
            .map(|(&disease, model)| ModelDescription {
                disease,
                name: disease.display_name(),
                source: model.source.clone(),
                info: model.classifier.describe(),
            })
            .collect()
    }
}

fn load_artifact(dir: &Path, disease: Disease) -> Result<(Box<dyn Classifier>, PathBuf), ModelError> {
    let expected = DiseaseFeatures::len(disease);
    let json_path = dir.join(format!("{}.json", disease.artifact_stem()));

    #[cfg(feature = "onnx-models")]
    {
        let onnx_path = dir.join(format!("{}.onnx", disease.artifact_stem()));
        if !json_path.exists() && onnx_path.exists() {
            let model = super::onnx::OnnxClassifier::load(&onnx_path, expected)?;
            return Ok((Box::new(model), onnx_path));
        }
    }

    let model = LinearModel::load(&json_path)?;
    if model.feature_count() != expected {
        return Err(ModelError::Load(format!(
            "{} has {} coefficients, {} layout has {expected} fields",
            json_path.display(),
            model.feature_count(),
            disease.model_key()
        )));
    }
    Ok((Box::new(model), json_path))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    /// Write a logistic regression artifact with `n` zero coefficients.
    pub(crate) fn write_artifact(dir: &Path, disease: Disease, n: usize, intercept: f64) {
        let body = json!({
            "format": "logistic_regression",
            "coefficients": vec![0.0; n],
            "intercept": intercept,
        });
        std::fs::write(
            dir.join(format!("{}.json", disease.artifact_stem())),
            body.to_string(),
        )
        .unwrap();
    }

    #[test]
    fn empty_dir_records_every_model_missing() {
        let dir = tempfile::tempdir().unwrap();
        let registry = ModelRegistry::load_from_dir(dir.path());

        let status = registry.status();
        assert!(status.loaded.is_empty());
        assert_eq!(status.errors.len(), 5);
        assert!(status.errors[&Disease::Thyroid].starts_with("Missing file: "));
        assert!(status.errors[&Disease::Thyroid].contains("Thyroid_model.json"));
    }

    #[test]
    fn one_broken_artifact_does_not_block_others() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), Disease::HeartDisease, 13, 1.0);
        write_artifact(dir.path(), Disease::Thyroid, 7, -1.0);
        std::fs::write(dir.path().join("diabetes_model.json"), b"{ not json").unwrap();

        let registry = ModelRegistry::load_from_dir(dir.path());
        assert!(registry.get(Disease::HeartDisease).is_some());
        assert!(registry.get(Disease::Thyroid).is_some());
        assert!(registry.get(Disease::Diabetes).is_none());

        let status = registry.status();
        assert!(status.errors[&Disease::Diabetes].starts_with("Failed to load: "));
        assert_eq!(status.loaded, vec![Disease::HeartDisease, Disease::Thyroid]);
    }

    #[test]
    fn wrong_width_artifact_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), Disease::Diabetes, 5, 0.0);

        let registry = ModelRegistry::load_from_dir(dir.path());
        assert!(registry.get(Disease::Diabetes).is_none());
        assert!(registry.status().errors[&Disease::Diabetes].contains("8 fields"));
    }

    #[test]
    fn describe_lists_loaded_models() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), Disease::Parkinsons, 22, 0.0);

        let described = ModelRegistry::load_from_dir(dir.path()).describe();
        assert_eq!(described.len(), 1);
        assert_eq!(described[0].disease, Disease::Parkinsons);
        assert_eq!(described[0].info.feature_count, 22);
        assert!(described[0].info.supports_probability);
        assert!(described[0].source.as_ref().unwrap().ends_with("parkinsons_model.json"));
    }

    #[test]
    fn with_model_clears_recorded_error() {
        let registry = ModelRegistry::new()
            .with_error(Disease::LungCancer, "Missing file: x")
            .with_model(
                Disease::LungCancer,
                Box::new(crate::inference::MockClassifier::new(15, 0)),
            );
        assert!(registry.get(Disease::LungCancer).is_some());
        assert!(registry.status().errors.is_empty());
    }
}
