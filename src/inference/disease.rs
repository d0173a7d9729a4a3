use serde::{Deserialize, Serialize};

use crate::advice::Condition;

/// The five diseases with a trained classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disease {
    Diabetes,
    HeartDisease,
    Parkinsons,
    LungCancer,
    Thyroid,
}

impl Disease {
    pub const ALL: [Disease; 5] = [
        Disease::Diabetes,
        Disease::HeartDisease,
        Disease::Parkinsons,
        Disease::LungCancer,
        Disease::Thyroid,
    ];

    /// Identifier used in URLs, history records and the CSV export.
    pub fn model_key(&self) -> &'static str {
        match self {
            Self::Diabetes => "diabetes",
            Self::HeartDisease => "heart_disease",
            Self::Parkinsons => "parkinsons",
            Self::LungCancer => "lung_cancer",
            Self::Thyroid => "thyroid",
        }
    }

    /// File name (without extension) of the artifact in the models directory.
    pub fn artifact_stem(&self) -> &'static str {
        match self {
            Self::Diabetes => "diabetes_model",
            Self::HeartDisease => "heart_disease_model",
            Self::Parkinsons => "parkinsons_model",
            Self::LungCancer => "lungs_disease_model",
            Self::Thyroid => "Thyroid_model",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Diabetes => "Diabetes",
            Self::HeartDisease => "Heart Disease",
            Self::Parkinsons => "Parkinson's",
            Self::LungCancer => "Lung Cancer",
            Self::Thyroid => "Hypo-Thyroid",
        }
    }

    /// Advice table shown after a prediction for this disease.
    pub fn condition(&self) -> Condition {
        match self {
            Self::Diabetes => Condition::Diabetes,
            Self::HeartDisease => Condition::Heart,
            Self::Parkinsons => Condition::Parkinsons,
            Self::LungCancer => Condition::Lungs,
            Self::Thyroid => Condition::Thyroid,
        }
    }
}

impl std::fmt::Display for Disease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.model_key())
    }
}

impl std::str::FromStr for Disease {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.model_key() == s)
            .ok_or_else(|| format!("Unknown model: {s}"))
    }
}
