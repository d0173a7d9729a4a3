pub mod classifier;
pub mod disease;
pub mod features;
pub mod invoker;
pub mod linear;
#[cfg(feature = "onnx-models")]
pub mod onnx;
pub mod registry;

pub use classifier::{Classifier, MockClassifier, ModelInfo};
pub use disease::Disease;
pub use features::{
    form_for, DiabetesFeatures, DiseaseFeatures, FeatureError, FieldKind, FieldSpec, FormField,
    FormSpec, HeartFeatures, LungCancerFeatures, ParkinsonsFeatures, ThyroidFeatures,
};
pub use invoker::{
    note_failure, outcome_pair, predict_and_record, predict_features, resolve_model_key,
    Prediction, PredictionError,
};
pub use linear::LinearModel;
pub use registry::{ModelDescription, ModelRegistry, ModelStatus};

use std::path::PathBuf;

/// Errors from loading or running a classifier.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Missing file: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("Failed to load: {0}")]
    Load(String),
    #[error("Model expects {expected} features, got {found}")]
    FeatureCount { expected: usize, found: usize },
    #[error("Model produced a label outside 0/1: {0}")]
    UnexpectedLabel(f64),
    #[error("Inference failed: {0}")]
    Inference(String),
}
