//! ONNX classifiers (skl2onnx export), behind the `onnx-models` feature.
//!
//! Expected graph: one float input of shape `[batch, n_features]`, output 0
//! the int64 label, optional output 1 the float class probabilities
//! `[batch, 2]` (exported with `zipmap=False`).

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;

use super::classifier::{Classifier, ModelInfo};
use super::ModelError;

/// Uses interior mutability (Mutex) because `Session::run` requires `&mut self`
/// but `Classifier` exposes `&self` so models can be shared read-only.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    feature_count: usize,
    has_probabilities: bool,
}

impl OnnxClassifier {
    /// Load a model whose input width must equal `feature_count`.
    pub fn load(path: &Path, feature_count: usize) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::MissingFile(path.to_path_buf()));
        }

        let session = Session::builder()
            .map_err(|e: ort::Error| ModelError::Load(e.to_string()))?
            .with_intra_threads(1)
            .map_err(|e: ort::Error| ModelError::Load(e.to_string()))?
            .commit_from_file(path)
            .map_err(|e: ort::Error| ModelError::Load(format!("ONNX load failed: {e}")))?;

        let mut classifier = Self {
            session: Mutex::new(session),
            feature_count,
            has_probabilities: false,
        };

        // Probe once so a width mismatch fails at load time
        let (_, probe) = classifier
            .run(&vec![0.0; feature_count])
            .map_err(|e| ModelError::Load(format!("probe inference: {e}")))?;
        classifier.has_probabilities = probe.is_some();

        tracing::info!(
            path = %path.display(),
            has_probabilities = classifier.has_probabilities,
            "ONNX classifier loaded"
        );
        Ok(classifier)
    }

    /// Run the graph on one sample: (label, positive-class probability).
    fn run(&self, features: &[f64]) -> Result<(u8, Option<f64>), ModelError> {
        use ort::value::TensorRef;

        if features.len() != self.feature_count {
            return Err(ModelError::FeatureCount {
                expected: self.feature_count,
                found: features.len(),
            });
        }

        let row: Vec<f32> = features.iter().map(|&v| v as f32).collect();
        let input = ndarray::Array2::from_shape_vec((1, self.feature_count), row)
            .map_err(|e| ModelError::Inference(e.to_string()))?;
        let tensor = TensorRef::from_array_view(&input)
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| ModelError::Inference("Session lock poisoned".to_string()))?;

        let outputs = session
            .run(ort::inputs![tensor])
            .map_err(|e| ModelError::Inference(format!("ONNX inference failed: {e}")))?;

        let (_, labels) = outputs[0]
            .try_extract_tensor::<i64>()
            .map_err(|e| ModelError::Inference(format!("Label extraction: {e}")))?;
        let raw = labels
            .first()
            .copied()
            .ok_or_else(|| ModelError::Inference("Empty label output".to_string()))?;
        let label = binary_label(raw as f64)?;

        let probability = if outputs.len() > 1 {
            let (shape, probs) = outputs[1]
                .try_extract_tensor::<f32>()
                .map_err(|e| ModelError::Inference(format!("Probability extraction: {e}")))?;
            if shape.len() != 2 || shape[1] != 2 {
                return Err(ModelError::Inference(format!(
                    "Unexpected probability shape: {shape:?}, expected [1, 2]"
                )));
            }
            Some(f64::from(probs[1]))
        } else {
            None
        };

        Ok((label, probability))
    }
}

/// Convert a raw model output to a 0/1 label.
fn binary_label(raw: f64) -> Result<u8, ModelError> {
    if raw == 0.0 {
        Ok(0)
    } else if raw == 1.0 {
        Ok(1)
    } else {
        Err(ModelError::UnexpectedLabel(raw))
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, features: &[f64]) -> Result<u8, ModelError> {
        self.run(features).map(|(label, _)| label)
    }

    fn predict_proba(&self, features: &[f64]) -> Option<Result<f64, ModelError>> {
        if !self.has_probabilities {
            return None;
        }
        match self.run(features) {
            Ok((_, probability)) => probability.map(Ok),
            Err(e) => Some(Err(e)),
        }
    }

    fn feature_count(&self) -> usize {
        self.feature_count
    }

    fn describe(&self) -> ModelInfo {
        ModelInfo {
            kind: "onnx",
            feature_count: self.feature_count,
            supports_probability: self.has_probabilities,
        }
    }
}
