//! Linear classifiers exported as JSON.
//!
//! Artifact shape:
//!
//! ```json
//! {
//!   "format": "logistic_regression",
//!   "coefficients": [0.12, 0.034, ...],
//!   "intercept": -5.4,
//!   "scaler": { "mean": [...], "scale": [...] },
//!   "threshold": 0.5
//! }
//! ```
//!
//! `format` is `logistic_regression` or `linear_svc`. `scaler` and
//! `threshold` are optional. Only logistic regression estimates probabilities.

use std::path::Path;

use serde::Deserialize;

use super::classifier::{Classifier, ModelInfo};
use super::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinearKind {
    LogisticRegression,
    LinearSvc,
}

/// Per-feature standardization applied before the dot product.
#[derive(Debug, Clone, Deserialize)]
struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct LinearArtifact {
    format: LinearKind,
    coefficients: Vec<f64>,
    intercept: f64,
    #[serde(default)]
    scaler: Option<StandardScaler>,
    #[serde(default = "default_threshold")]
    threshold: f64,
}

fn default_threshold() -> f64 {
    0.5
}

#[derive(Debug, Clone)]
pub struct LinearModel {
    kind: LinearKind,
    coefficients: Vec<f64>,
    intercept: f64,
    scaler: Option<StandardScaler>,
    threshold: f64,
}

impl LinearModel {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::MissingFile(path.to_path_buf()));
        }
        let bytes = std::fs::read(path).map_err(|e| ModelError::Load(e.to_string()))?;
        Self::from_json(&bytes)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, ModelError> {
        let artifact: LinearArtifact =
            serde_json::from_slice(bytes).map_err(|e| ModelError::Load(e.to_string()))?;

        let n = artifact.coefficients.len();
        if n == 0 {
            return Err(ModelError::Load("artifact has no coefficients".into()));
        }
        let all_finite = artifact
            .coefficients
            .iter()
            .chain(std::iter::once(&artifact.intercept))
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(ModelError::Load("non-finite coefficient".into()));
        }
        if let Some(scaler) = &artifact.scaler {
            if scaler.mean.len() != n || scaler.scale.len() != n {
                return Err(ModelError::Load(format!(
                    "scaler has {} means and {} scales for {n} coefficients",
                    scaler.mean.len(),
                    scaler.scale.len()
                )));
            }
        }
        if !(0.0..=1.0).contains(&artifact.threshold) {
            return Err(ModelError::Load(format!(
                "threshold {} outside 0..=1",
                artifact.threshold
            )));
        }

        Ok(Self {
            kind: artifact.format,
            coefficients: artifact.coefficients,
            intercept: artifact.intercept,
            scaler: artifact.scaler,
            threshold: artifact.threshold,
        })
    }

    fn decision(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.coefficients.len() {
            return Err(ModelError::FeatureCount {
                expected: self.coefficients.len(),
                found: features.len(),
            });
        }

        let score = features
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let x = match &self.scaler {
                    // Zero variance features are left unscaled
                    Some(s) if s.scale[i] != 0.0 => (x - s.mean[i]) / s.scale[i],
                    Some(s) => x - s.mean[i],
                    None => x,
                };
                x * self.coefficients[i]
            })
            .sum::<f64>()
            + self.intercept;

        if score.is_finite() {
            Ok(score)
        } else {
            Err(ModelError::Inference(format!("decision score is {score}")))
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for LinearModel {
    fn predict(&self, features: &[f64]) -> Result<u8, ModelError> {
        let score = self.decision(features)?;
        let positive = match self.kind {
            LinearKind::LogisticRegression => sigmoid(score) > self.threshold,
            LinearKind::LinearSvc => score > 0.0,
        };
        Ok(u8::from(positive))
    }

    fn predict_proba(&self, features: &[f64]) -> Option<Result<f64, ModelError>> {
        match self.kind {
            LinearKind::LogisticRegression => Some(self.decision(features).map(sigmoid)),
            LinearKind::LinearSvc => None,
        }
    }

    fn feature_count(&self) -> usize {
        self.coefficients.len()
    }

    fn describe(&self) -> ModelInfo {
        ModelInfo {
            kind: match self.kind {
                LinearKind::LogisticRegression => "logistic_regression",
                LinearKind::LinearSvc => "linear_svc",
            },
            feature_count: self.coefficients.len(),
            supports_probability: self.kind == LinearKind::LogisticRegression,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model(value: serde_json::Value) -> Result<LinearModel, ModelError> {
        LinearModel::from_json(value.to_string().as_bytes())
    }

    #[test]
    fn logistic_predicts_and_estimates_probability() {
        let m = model(json!({
            "format": "logistic_regression",
            "coefficients": [1.0, -1.0],
            "intercept": 0.0
        }))
        .unwrap();

        assert_eq!(m.predict(&[3.0, 1.0]).unwrap(), 1);
        assert_eq!(m.predict(&[1.0, 3.0]).unwrap(), 0);

        let p = m.predict_proba(&[2.0, 0.0]).unwrap().unwrap();
        assert!((p - sigmoid(2.0)).abs() < 1e-12);
        assert!(m.describe().supports_probability);
    }

    #[test]
    fn boundary_score_is_negative_class() {
        let m = model(json!({
            "format": "logistic_regression",
            "coefficients": [1.0],
            "intercept": 0.0
        }))
        .unwrap();
        assert_eq!(m.predict(&[0.0]).unwrap(), 0);
    }

    #[test]
    fn custom_threshold_applies() {
        let m = model(json!({
            "format": "logistic_regression",
            "coefficients": [1.0],
            "intercept": 0.0,
            "threshold": 0.9
        }))
        .unwrap();
        // sigmoid(1.0) ≈ 0.73
        assert_eq!(m.predict(&[1.0]).unwrap(), 0);
        assert_eq!(m.predict(&[3.0]).unwrap(), 1);
    }

    #[test]
    fn svc_has_no_probability() {
        let m = model(json!({
            "format": "linear_svc",
            "coefficients": [0.5, 0.5],
            "intercept": -1.0
        }))
        .unwrap();
        assert_eq!(m.kind, LinearKind::LinearSvc);
        assert_eq!(m.predict(&[2.0, 2.0]).unwrap(), 1);
        assert_eq!(m.predict(&[1.0, 0.5]).unwrap(), 0);
        assert!(m.predict_proba(&[1.0, 1.0]).is_none());
    }

    #[test]
    fn scaler_standardizes_inputs() {
        let m = model(json!({
            "format": "linear_svc",
            "coefficients": [1.0],
            "intercept": 0.0,
            "scaler": { "mean": [100.0], "scale": [10.0] }
        }))
        .unwrap();
        assert_eq!(m.predict(&[110.0]).unwrap(), 1);
        assert_eq!(m.predict(&[90.0]).unwrap(), 0);
    }

    #[test]
    fn wrong_feature_count_is_an_error() {
        let m = model(json!({
            "format": "linear_svc",
            "coefficients": [1.0, 1.0, 1.0],
            "intercept": 0.0
        }))
        .unwrap();
        assert!(matches!(
            m.predict(&[1.0]),
            Err(ModelError::FeatureCount { expected: 3, found: 1 })
        ));
    }

    #[test]
    fn unknown_format_fails_to_load() {
        let err = model(json!({
            "format": "random_forest",
            "coefficients": [1.0],
            "intercept": 0.0
        }))
        .unwrap_err();
        assert!(matches!(err, ModelError::Load(_)));
    }

    #[test]
    fn mismatched_scaler_fails_to_load() {
        let err = model(json!({
            "format": "logistic_regression",
            "coefficients": [1.0, 2.0],
            "intercept": 0.0,
            "scaler": { "mean": [0.0], "scale": [1.0] }
        }))
        .unwrap_err();
        assert!(matches!(err, ModelError::Load(m) if m.contains("scaler")));
    }

    #[test]
    fn empty_coefficients_fail_to_load() {
        let err = model(json!({
            "format": "linear_svc",
            "coefficients": [],
            "intercept": 0.0
        }))
        .unwrap_err();
        assert!(matches!(err, ModelError::Load(_)));
    }

    #[test]
    fn missing_file_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diabetes_model.json");
        let err = LinearModel::load(&path).unwrap_err();
        assert_eq!(err.to_string(), format!("Missing file: {}", path.display()));
    }
}
