use serde::Serialize;

use super::ModelError;

/// A loaded binary classifier over one fixed-order feature vector.
///
/// Models are shared read-only for the process lifetime, so every method
/// takes `&self`.
pub trait Classifier: Send + Sync {
    /// Predicted label (0 or 1) for a single sample.
    fn predict(&self, features: &[f64]) -> Result<u8, ModelError>;

    /// Probability of the positive class, when the model can estimate one.
    fn predict_proba(&self, _features: &[f64]) -> Option<Result<f64, ModelError>> {
        None
    }

    fn feature_count(&self) -> usize;

    fn describe(&self) -> ModelInfo;
}

/// What the Model Info view shows about one classifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub kind: &'static str,
    pub feature_count: usize,
    pub supports_probability: bool,
}

/// Mock classifier for testing without model artifacts.
pub struct MockClassifier {
    label: u8,
    probability: Option<f64>,
    feature_count: usize,
    failure: Option<String>,
}

impl MockClassifier {
    pub fn new(feature_count: usize, label: u8) -> Self {
        Self {
            label,
            probability: None,
            feature_count,
            failure: None,
        }
    }

    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = Some(probability);
        self
    }

    /// Every prediction fails with `message`.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    fn check(&self, features: &[f64]) -> Result<(), ModelError> {
        if let Some(message) = &self.failure {
            return Err(ModelError::Inference(message.clone()));
        }
        if features.len() != self.feature_count {
            return Err(ModelError::FeatureCount {
                expected: self.feature_count,
                found: features.len(),
            });
        }
        Ok(())
    }
}

impl Classifier for MockClassifier {
    fn predict(&self, features: &[f64]) -> Result<u8, ModelError> {
        self.check(features)?;
        Ok(self.label)
    }

    fn predict_proba(&self, features: &[f64]) -> Option<Result<f64, ModelError>> {
        let probability = self.probability?;
        Some(self.check(features).map(|()| probability))
    }

    fn feature_count(&self) -> usize {
        self.feature_count
    }

    fn describe(&self) -> ModelInfo {
        ModelInfo {
            kind: "mock",
            feature_count: self.feature_count,
            supports_probability: self.probability.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_without_probability_returns_none() {
        let model = MockClassifier::new(3, 1);
        assert_eq!(model.predict(&[0.0; 3]).unwrap(), 1);
        assert!(model.predict_proba(&[0.0; 3]).is_none());
        assert!(!model.describe().supports_probability);
    }

    #[test]
    fn mock_checks_feature_count() {
        let model = MockClassifier::new(3, 0).with_probability(0.2);
        assert!(matches!(
            model.predict(&[0.0; 2]),
            Err(ModelError::FeatureCount { expected: 3, found: 2 })
        ));
        assert!(model.predict_proba(&[0.0; 2]).unwrap().is_err());
    }

    #[test]
    fn failing_mock_reports_inference_error() {
        let model = MockClassifier::new(1, 0).failing("boom");
        assert!(matches!(model.predict(&[0.0]), Err(ModelError::Inference(m)) if m == "boom"));
    }
}
