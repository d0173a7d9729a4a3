//! Named-field feature layouts, one per disease model.
//!
//! Each layout fixes the order the model was trained on. Vectors are only
//! built from a validated layout, and raw vectors are only accepted after
//! being parsed back into one.

use serde::{Deserialize, Serialize};

use super::Disease;
use crate::pipeline::extraction::{LabKey, LabValues};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeatureError {
    #[error("{disease} expects {expected} features, got {found}")]
    LengthMismatch {
        disease: Disease,
        expected: usize,
        found: usize,
    },
    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} is not a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} must be 0 or 1, got {value}")]
    NotAFlag { field: &'static str, value: f64 },
    #[error("Malformed input: {0}")]
    Malformed(String),
}

/// Accepted values for one field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Range { min: f64, max: f64 },
    /// 0 = no / female, 1 = yes / male.
    Flag,
    /// Any finite value.
    Measure,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub default: f64,
}

impl FieldSpec {
    pub fn check(&self, value: f64) -> Result<(), FeatureError> {
        if !value.is_finite() {
            return Err(FeatureError::NotFinite { field: self.name });
        }
        match self.kind {
            FieldKind::Range { min, max } if !(min..=max).contains(&value) => {
                Err(FeatureError::OutOfRange {
                    field: self.name,
                    value,
                    min,
                    max,
                })
            }
            FieldKind::Flag if value != 0.0 && value != 1.0 => Err(FeatureError::NotAFlag {
                field: self.name,
                value,
            }),
            _ => Ok(()),
        }
    }
}

const fn range(min: f64, max: f64) -> FieldKind {
    FieldKind::Range { min, max }
}

const FLAG: FieldKind = FieldKind::Flag;
const MEASURE: FieldKind = FieldKind::Measure;

/// Generate a layout struct with its field table, vector conversions and
/// validation. Fields are listed in model order.
macro_rules! feature_layout {
    (
        $(#[$meta:meta])*
        $name:ident => $disease:expr, {
            $($field:ident: $label:literal, $kind:expr, $default:expr;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
        #[serde(deny_unknown_fields)]
        pub struct $name {
            $(pub $field: f64),+
        }

        impl $name {
            pub const DISEASE: Disease = $disease;

            pub const FIELDS: &'static [FieldSpec] = &[
                $(FieldSpec {
                    name: stringify!($field),
                    label: $label,
                    kind: $kind,
                    default: $default,
                }),+
            ];

            /// Values the input form starts with.
            pub fn form_defaults() -> Self {
                Self { $($field: $default),+ }
            }

            pub fn to_vector(&self) -> Vec<f64> {
                vec![$(self.$field),+]
            }

            pub fn from_vector(values: &[f64]) -> Result<Self, FeatureError> {
                if values.len() != Self::FIELDS.len() {
                    return Err(FeatureError::LengthMismatch {
                        disease: Self::DISEASE,
                        expected: Self::FIELDS.len(),
                        found: values.len(),
                    });
                }
                let mut it = values.iter().copied();
                let layout = Self { $($field: it.next().unwrap_or_default()),+ };
                layout.validate()?;
                Ok(layout)
            }

            pub fn validate(&self) -> Result<(), FeatureError> {
                Self::FIELDS
                    .iter()
                    .zip(self.to_vector())
                    .try_for_each(|(spec, value)| spec.check(value))
            }
        }
    };
}

feature_layout!(
    /// Pima diabetes survey.
    DiabetesFeatures => Disease::Diabetes, {
        pregnancies: "Number of Pregnancies", range(0.0, 50.0), 0.0;
        glucose: "Glucose Level", range(0.0, 1000.0), 100.0;
        blood_pressure: "Blood Pressure", range(0.0, 300.0), 70.0;
        skin_thickness: "Skin Thickness", range(0.0, 100.0), 20.0;
        insulin: "Insulin Level", range(0.0, 2000.0), 80.0;
        bmi: "BMI", range(0.0, 100.0), 28.0;
        diabetes_pedigree_function: "Diabetes Pedigree Function", range(0.0, 10.0), 0.5;
        age: "Age", range(0.0, 120.0), 30.0;
    }
);

feature_layout!(
    /// Cleveland heart disease attributes.
    HeartFeatures => Disease::HeartDisease, {
        age: "Age", range(0.0, 120.0), 45.0;
        sex: "Sex (1 = Male, 0 = Female)", FLAG, 1.0;
        chest_pain_type: "Chest Pain Type (0-3)", range(0.0, 3.0), 0.0;
        resting_bp: "Resting Blood Pressure (mm Hg)", range(0.0, 300.0), 120.0;
        cholesterol: "Serum Cholesterol (mg/dL)", range(0.0, 1000.0), 200.0;
        fasting_blood_sugar: "Fasting Blood Sugar > 120 mg/dL", FLAG, 0.0;
        resting_ecg: "Resting ECG Results (0-2)", range(0.0, 2.0), 0.0;
        max_heart_rate: "Max Heart Rate Achieved", range(0.0, 300.0), 140.0;
        exercise_angina: "Exercise Induced Angina", FLAG, 0.0;
        st_depression: "ST Depression Induced by Exercise", range(0.0, 10.0), 1.0;
        st_slope: "Slope of ST Segment (0-2)", range(0.0, 2.0), 1.0;
        major_vessels: "Major Vessels Colored by Fluoroscopy (0-3)", range(0.0, 3.0), 0.0;
        thal: "Thal (0 = Normal, 1 = Fixed Defect, 2 = Reversible Defect)", range(0.0, 3.0), 1.0;
    }
);

feature_layout!(
    /// Voice measurements. The model was trained with a trailing D2 column
    /// that the form does not ask for.
    ParkinsonsFeatures => Disease::Parkinsons, {
        fo_hz: "MDVP:Fo(Hz)", MEASURE, 150.0;
        fhi_hz: "MDVP:Fhi(Hz)", MEASURE, 200.0;
        flo_hz: "MDVP:Flo(Hz)", MEASURE, 100.0;
        jitter_percent: "MDVP:Jitter(%)", MEASURE, 0.005;
        jitter_abs: "MDVP:Jitter(Abs)", MEASURE, 0.00006;
        rap: "MDVP:RAP", MEASURE, 0.003;
        ppq: "MDVP:PPQ", MEASURE, 0.004;
        jitter_ddp: "Jitter:DDP", MEASURE, 0.009;
        shimmer: "MDVP:Shimmer", MEASURE, 0.03;
        shimmer_db: "MDVP:Shimmer(dB)", MEASURE, 0.3;
        shimmer_apq3: "Shimmer:APQ3", MEASURE, 0.02;
        shimmer_apq5: "Shimmer:APQ5", MEASURE, 0.03;
        apq: "MDVP:APQ", MEASURE, 0.03;
        shimmer_dda: "Shimmer:DDA", MEASURE, 0.09;
        nhr: "NHR", MEASURE, 0.02;
        hnr: "HNR", MEASURE, 20.0;
        rpde: "RPDE", MEASURE, 0.5;
        dfa: "DFA", MEASURE, 0.65;
        spread1: "spread1", MEASURE, -5.0;
        spread2: "spread2", MEASURE, 0.5;
        ppe: "PPE", MEASURE, 0.2;
        d2: "D2", MEASURE, 0.0;
    }
);

feature_layout!(
    /// Lung cancer survey; every answer but age is yes/no.
    LungCancerFeatures => Disease::LungCancer, {
        gender: "Gender (1 = Male, 0 = Female)", FLAG, 1.0;
        age: "Age", range(0.0, 120.0), 40.0;
        smoking: "Smoking", FLAG, 0.0;
        yellow_fingers: "Yellow Fingers", FLAG, 0.0;
        anxiety: "Anxiety", FLAG, 0.0;
        peer_pressure: "Peer Pressure", FLAG, 0.0;
        chronic_disease: "Chronic Disease", FLAG, 0.0;
        fatigue: "Fatigue", FLAG, 0.0;
        allergy: "Allergy", FLAG, 0.0;
        wheezing: "Wheezing", FLAG, 0.0;
        alcohol_consuming: "Alcohol Consumption", FLAG, 0.0;
        coughing: "Coughing", FLAG, 0.0;
        shortness_of_breath: "Shortness of Breath", FLAG, 0.0;
        swallowing_difficulty: "Swallowing Difficulty", FLAG, 0.0;
        chest_pain: "Chest Pain", FLAG, 0.0;
    }
);

feature_layout!(
    ThyroidFeatures => Disease::Thyroid, {
        age: "Age", range(0.0, 120.0), 40.0;
        sex: "Sex (1 = Male, 0 = Female)", FLAG, 1.0;
        on_thyroxine: "On Thyroxine", FLAG, 0.0;
        tsh: "TSH Level (mU/L)", range(0.0, 500.0), 0.0;
        t3_measured: "T3 Measured", FLAG, 0.0;
        t3: "T3 Level (ng/dL)", range(0.0, 1000.0), 0.0;
        tt4: "T4 Level (mcg/dL)", range(0.0, 1000.0), 0.0;
    }
);

/// A validated input for any of the five models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DiseaseFeatures {
    Diabetes(DiabetesFeatures),
    Heart(HeartFeatures),
    Parkinsons(ParkinsonsFeatures),
    LungCancer(LungCancerFeatures),
    Thyroid(ThyroidFeatures),
}

impl DiseaseFeatures {
    pub fn disease(&self) -> Disease {
        match self {
            Self::Diabetes(_) => Disease::Diabetes,
            Self::Heart(_) => Disease::HeartDisease,
            Self::Parkinsons(_) => Disease::Parkinsons,
            Self::LungCancer(_) => Disease::LungCancer,
            Self::Thyroid(_) => Disease::Thyroid,
        }
    }

    pub fn fields(disease: Disease) -> &'static [FieldSpec] {
        match disease {
            Disease::Diabetes => DiabetesFeatures::FIELDS,
            Disease::HeartDisease => HeartFeatures::FIELDS,
            Disease::Parkinsons => ParkinsonsFeatures::FIELDS,
            Disease::LungCancer => LungCancerFeatures::FIELDS,
            Disease::Thyroid => ThyroidFeatures::FIELDS,
        }
    }

    pub fn len(disease: Disease) -> usize {
        Self::fields(disease).len()
    }

    pub fn to_vector(&self) -> Vec<f64> {
        match self {
            Self::Diabetes(f) => f.to_vector(),
            Self::Heart(f) => f.to_vector(),
            Self::Parkinsons(f) => f.to_vector(),
            Self::LungCancer(f) => f.to_vector(),
            Self::Thyroid(f) => f.to_vector(),
        }
    }

    /// Parse and validate a raw, model-ordered vector.
    pub fn from_vector(disease: Disease, values: &[f64]) -> Result<Self, FeatureError> {
        Ok(match disease {
            Disease::Diabetes => Self::Diabetes(DiabetesFeatures::from_vector(values)?),
            Disease::HeartDisease => Self::Heart(HeartFeatures::from_vector(values)?),
            Disease::Parkinsons => Self::Parkinsons(ParkinsonsFeatures::from_vector(values)?),
            Disease::LungCancer => Self::LungCancer(LungCancerFeatures::from_vector(values)?),
            Disease::Thyroid => Self::Thyroid(ThyroidFeatures::from_vector(values)?),
        })
    }

    /// Parse and validate a named-field JSON object. Every field is required.
    pub fn from_json(disease: Disease, value: serde_json::Value) -> Result<Self, FeatureError> {
        fn parse<T: serde::de::DeserializeOwned>(
            value: serde_json::Value,
        ) -> Result<T, FeatureError> {
            serde_json::from_value(value).map_err(|e| FeatureError::Malformed(e.to_string()))
        }

        let features = match disease {
            Disease::Diabetes => Self::Diabetes(parse(value)?),
            Disease::HeartDisease => Self::Heart(parse(value)?),
            Disease::Parkinsons => Self::Parkinsons(parse(value)?),
            Disease::LungCancer => Self::LungCancer(parse(value)?),
            Disease::Thyroid => Self::Thyroid(parse(value)?),
        };
        features.validate()?;
        Ok(features)
    }

    pub fn validate(&self) -> Result<(), FeatureError> {
        match self {
            Self::Diabetes(f) => f.validate(),
            Self::Heart(f) => f.validate(),
            Self::Parkinsons(f) => f.validate(),
            Self::LungCancer(f) => f.validate(),
            Self::Thyroid(f) => f.validate(),
        }
    }

    /// Form starting values: layout defaults overridden by scanned lab values.
    pub fn prefilled(disease: Disease, ocr: Option<&LabValues>) -> Self {
        let lab = |key: LabKey, fallback: f64| ocr.and_then(|v| v.get(key)).unwrap_or(fallback);
        match disease {
            Disease::Diabetes => {
                let mut f = DiabetesFeatures::form_defaults();
                f.glucose = lab(LabKey::Glucose, f.glucose);
                Self::Diabetes(f)
            }
            Disease::HeartDisease => {
                let mut f = HeartFeatures::form_defaults();
                f.cholesterol = lab(LabKey::Cholesterol, f.cholesterol);
                Self::Heart(f)
            }
            Disease::Parkinsons => Self::Parkinsons(ParkinsonsFeatures::form_defaults()),
            Disease::LungCancer => Self::LungCancer(LungCancerFeatures::form_defaults()),
            Disease::Thyroid => {
                let mut f = ThyroidFeatures::form_defaults();
                f.tsh = lab(LabKey::Tsh, f.tsh);
                f.t3 = lab(LabKey::T3, f.t3);
                f.tt4 = lab(LabKey::T4, f.tt4);
                Self::Thyroid(f)
            }
        }
    }

    /// Input built straight from a scanned report, without the form.
    ///
    /// Unscanned slots use fixed report defaults rather than form defaults.
    pub fn from_report(disease: Disease, values: &LabValues) -> Result<Self, FeatureError> {
        let lab = |key: LabKey, fallback: f64| values.get(key).unwrap_or(fallback);
        let vector = match disease {
            Disease::Diabetes => vec![
                0.0,
                lab(LabKey::Glucose, 120.0),
                70.0,
                20.0,
                80.0,
                26.0,
                0.5,
                30.0,
            ],
            Disease::HeartDisease => vec![
                45.0,
                1.0,
                0.0,
                120.0,
                lab(LabKey::Cholesterol, 200.0),
                0.0,
                0.0,
                140.0,
                0.0,
                1.0,
                1.0,
                0.0,
                1.0,
            ],
            Disease::Parkinsons => vec![0.0; ParkinsonsFeatures::FIELDS.len()],
            Disease::LungCancer => {
                let mut v = vec![0.0; LungCancerFeatures::FIELDS.len()];
                v[0] = 1.0;
                v[1] = 45.0;
                v
            }
            Disease::Thyroid => vec![
                40.0,
                1.0,
                0.0,
                lab(LabKey::Tsh, 3.5),
                1.0,
                lab(LabKey::T3, 100.0),
                lab(LabKey::T4, 8.0),
            ],
        };
        Self::from_vector(disease, &vector)
    }
}

/// One input of a rendered form.
#[derive(Debug, Clone, Serialize)]
pub struct FormField {
    #[serde(flatten)]
    pub spec: FieldSpec,
    pub value: f64,
    /// The value came from the last report scan.
    pub from_report: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormSpec {
    pub disease: Disease,
    pub title: &'static str,
    pub fields: Vec<FormField>,
}

/// Form fields that a scanned report can fill, by disease.
const REPORT_FIELDS: &[(Disease, &str, LabKey)] = &[
    (Disease::Diabetes, "glucose", LabKey::Glucose),
    (Disease::HeartDisease, "cholesterol", LabKey::Cholesterol),
    (Disease::Thyroid, "tsh", LabKey::Tsh),
    (Disease::Thyroid, "t3", LabKey::T3),
    (Disease::Thyroid, "tt4", LabKey::T4),
];

fn report_key(disease: Disease, field: &str) -> Option<LabKey> {
    REPORT_FIELDS
        .iter()
        .find(|(d, name, _)| *d == disease && *name == field)
        .map(|&(_, _, key)| key)
}

/// Field specs and starting values for a disease's input form.
pub fn form_for(disease: Disease, ocr: Option<&LabValues>) -> FormSpec {
    let values = DiseaseFeatures::prefilled(disease, ocr).to_vector();
    let fields = DiseaseFeatures::fields(disease)
        .iter()
        .zip(values)
        .map(|(spec, value)| FormField {
            spec: *spec,
            value,
            from_report: report_key(disease, spec.name)
                .and_then(|key| ocr.and_then(|v| v.get(key)))
                .is_some(),
        })
        .collect();

    FormSpec {
        disease,
        title: disease.display_name(),
        fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::extraction::ReadingSource;
    use serde_json::json;

    fn lab_values(pairs: &[(LabKey, f64)]) -> LabValues {
        let mut values = LabValues::new();
        for &(key, value) in pairs {
            values.insert(key, value, ReadingSource::Labeled);
        }
        values
    }

    #[test]
    fn layout_lengths_are_fixed() {
        assert_eq!(DiseaseFeatures::len(Disease::Diabetes), 8);
        assert_eq!(DiseaseFeatures::len(Disease::HeartDisease), 13);
        assert_eq!(DiseaseFeatures::len(Disease::Parkinsons), 22);
        assert_eq!(DiseaseFeatures::len(Disease::LungCancer), 15);
        assert_eq!(DiseaseFeatures::len(Disease::Thyroid), 7);
    }

    #[test]
    fn form_defaults_pass_validation() {
        for disease in Disease::ALL {
            DiseaseFeatures::prefilled(disease, None).validate().unwrap();
        }
    }

    #[test]
    fn heart_vector_keeps_model_order() {
        let heart = HeartFeatures::form_defaults();
        assert_eq!(
            heart.to_vector(),
            vec![45.0, 1.0, 0.0, 120.0, 200.0, 0.0, 0.0, 140.0, 0.0, 1.0, 1.0, 0.0, 1.0]
        );
    }

    #[test]
    fn from_vector_preserves_positions() {
        let raw = [0.0, 120.0, 70.0, 20.0, 80.0, 26.0, 0.5, 30.0];
        let features = DiseaseFeatures::from_vector(Disease::Diabetes, &raw).unwrap();
        assert_eq!(features.to_vector(), raw.to_vec());
        match features {
            DiseaseFeatures::Diabetes(f) => {
                assert_eq!(f.glucose, 120.0);
                assert_eq!(f.age, 30.0);
            }
            other => panic!("Expected diabetes input, got {other:?}"),
        }
    }

    #[test]
    fn wrong_length_rejected() {
        let err = DiseaseFeatures::from_vector(Disease::Thyroid, &[1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            FeatureError::LengthMismatch {
                disease: Disease::Thyroid,
                expected: 7,
                found: 2
            }
        );
    }

    #[test]
    fn out_of_range_rejected() {
        let mut raw = DiabetesFeatures::form_defaults().to_vector();
        raw[7] = 130.0;
        let err = DiseaseFeatures::from_vector(Disease::Diabetes, &raw).unwrap_err();
        assert!(matches!(err, FeatureError::OutOfRange { field: "age", .. }));
    }

    #[test]
    fn flag_must_be_zero_or_one() {
        let mut raw = LungCancerFeatures::form_defaults().to_vector();
        raw[2] = 2.0;
        let err = DiseaseFeatures::from_vector(Disease::LungCancer, &raw).unwrap_err();
        assert!(matches!(err, FeatureError::NotAFlag { field: "smoking", .. }));
    }

    #[test]
    fn nan_rejected_even_for_unbounded_fields() {
        let mut raw = ParkinsonsFeatures::form_defaults().to_vector();
        raw[18] = f64::NAN;
        let err = DiseaseFeatures::from_vector(Disease::Parkinsons, &raw).unwrap_err();
        assert_eq!(err, FeatureError::NotFinite { field: "spread1" });
    }

    #[test]
    fn parkinsons_accepts_negative_spread() {
        let f = ParkinsonsFeatures::form_defaults();
        assert_eq!(f.spread1, -5.0);
        assert_eq!(f.d2, 0.0);
        f.validate().unwrap();
    }

    #[test]
    fn json_input_requires_every_field() {
        let err = DiseaseFeatures::from_json(Disease::Thyroid, json!({ "age": 40 })).unwrap_err();
        assert!(matches!(err, FeatureError::Malformed(_)));
    }

    #[test]
    fn json_input_rejects_unknown_fields() {
        let mut body = serde_json::to_value(ThyroidFeatures::form_defaults()).unwrap();
        body["shoe_size"] = json!(42);
        let err = DiseaseFeatures::from_json(Disease::Thyroid, body).unwrap_err();
        assert!(matches!(err, FeatureError::Malformed(_)));
    }

    #[test]
    fn json_input_validated() {
        let mut body = serde_json::to_value(HeartFeatures::form_defaults()).unwrap();
        body["sex"] = json!(0.5);
        let err = DiseaseFeatures::from_json(Disease::HeartDisease, body).unwrap_err();
        assert!(matches!(err, FeatureError::NotAFlag { field: "sex", .. }));
    }

    #[test]
    fn prefill_uses_scanned_values() {
        let ocr = lab_values(&[(LabKey::Glucose, 145.0), (LabKey::Tsh, 6.2), (LabKey::T4, 9.1)]);

        let diabetes = DiseaseFeatures::prefilled(Disease::Diabetes, Some(&ocr)).to_vector();
        assert_eq!(diabetes[1], 145.0);

        let thyroid = DiseaseFeatures::prefilled(Disease::Thyroid, Some(&ocr)).to_vector();
        assert_eq!(thyroid[3], 6.2);
        assert_eq!(thyroid[5], 0.0);
        assert_eq!(thyroid[6], 9.1);
    }

    #[test]
    fn report_vectors_use_report_defaults() {
        let empty = LabValues::new();
        assert_eq!(
            DiseaseFeatures::from_report(Disease::Diabetes, &empty)
                .unwrap()
                .to_vector(),
            vec![0.0, 120.0, 70.0, 20.0, 80.0, 26.0, 0.5, 30.0]
        );
        assert_eq!(
            DiseaseFeatures::from_report(Disease::Thyroid, &empty)
                .unwrap()
                .to_vector(),
            vec![40.0, 1.0, 0.0, 3.5, 1.0, 100.0, 8.0]
        );

        let lung = DiseaseFeatures::from_report(Disease::LungCancer, &empty)
            .unwrap()
            .to_vector();
        assert_eq!(&lung[..2], &[1.0, 45.0]);
        assert!(lung[2..].iter().all(|&v| v == 0.0));

        let parkinsons = DiseaseFeatures::from_report(Disease::Parkinsons, &empty)
            .unwrap()
            .to_vector();
        assert_eq!(parkinsons, vec![0.0; 22]);
    }

    #[test]
    fn report_vector_picks_up_cholesterol() {
        let ocr = lab_values(&[(LabKey::Cholesterol, 210.0)]);
        let heart = DiseaseFeatures::from_report(Disease::HeartDisease, &ocr)
            .unwrap()
            .to_vector();
        assert_eq!(heart[4], 210.0);
    }

    #[test]
    fn implausible_scan_fails_validation() {
        let ocr = lab_values(&[(LabKey::Glucose, 5000.0)]);
        let err = DiseaseFeatures::from_report(Disease::Diabetes, &ocr).unwrap_err();
        assert!(matches!(err, FeatureError::OutOfRange { field: "glucose", .. }));
    }

    #[test]
    fn form_marks_scanned_fields() {
        let ocr = lab_values(&[(LabKey::Cholesterol, 240.0)]);
        let form = form_for(Disease::HeartDisease, Some(&ocr));
        assert_eq!(form.fields.len(), 13);
        let chol = form.fields.iter().find(|f| f.spec.name == "cholesterol").unwrap();
        assert_eq!(chol.value, 240.0);
        assert!(chol.from_report);
        assert!(form.fields.iter().filter(|f| f.from_report).count() == 1);
    }

    #[test]
    fn scanned_value_equal_to_default_is_still_marked() {
        let default = DiabetesFeatures::form_defaults().glucose;
        let ocr = lab_values(&[(LabKey::Glucose, default)]);
        let form = form_for(Disease::Diabetes, Some(&ocr));
        let glucose = form.fields.iter().find(|f| f.spec.name == "glucose").unwrap();
        assert_eq!(glucose.value, default);
        assert!(glucose.from_report);

        let unscanned = form_for(Disease::Diabetes, None);
        assert!(unscanned.fields.iter().all(|f| !f.from_report));
    }

    #[test]
    fn report_fields_name_real_layout_fields() {
        for &(disease, name, _) in REPORT_FIELDS {
            assert!(
                DiseaseFeatures::fields(disease).iter().any(|f| f.name == name),
                "{name} not in {disease:?} layout"
            );
        }
    }
}
