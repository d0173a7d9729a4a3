//! Named lab value extraction from free-form OCR text.
//!
//! Three passes, each only touching keys still unresolved:
//! 1. labeled patterns (`<synonym> [:\s-]* <number>`),
//! 2. positional lookup: first number within a short window after the key name,
//! 3. priority fill when fewer than three keys resolved: remaining numbers,
//!    left to right, in the order T3, T4, TSH, Glucose, Cholesterol.
//!
//! Values are unverified by construction; the dashboard asks the user to
//! confirm them before predicting.

use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::numbers::{numeric_tokens, safe_float};

/// Characters scanned after a key name in the positional pass.
const POSITIONAL_WINDOW_CHARS: usize = 120;

/// Priority fill is skipped once this many keys are resolved.
const MIN_RESOLVED_BEFORE_FILL: usize = 3;

/// Canonical lab keys recognized in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LabKey {
    Glucose,
    Cholesterol,
    #[serde(rename = "TSH")]
    Tsh,
    T3,
    T4,
}

impl LabKey {
    /// Pattern order of the labeled pass.
    pub const ALL: [LabKey; 5] = [
        LabKey::Glucose,
        LabKey::Cholesterol,
        LabKey::Tsh,
        LabKey::T3,
        LabKey::T4,
    ];

    /// Order used by the positional and priority-fill passes.
    pub const FALLBACK_ORDER: [LabKey; 5] = [
        LabKey::T3,
        LabKey::T4,
        LabKey::Tsh,
        LabKey::Glucose,
        LabKey::Cholesterol,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Glucose => "Glucose",
            Self::Cholesterol => "Cholesterol",
            Self::Tsh => "TSH",
            Self::T3 => "T3",
            Self::T4 => "T4",
        }
    }
}

impl std::fmt::Display for LabKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LabKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LabKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown lab key: {s}"))
    }
}

/// Which pass resolved a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingSource {
    Labeled,
    Positional,
    PriorityFill,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabReading {
    pub value: f64,
    pub source: ReadingSource,
}

/// Sparse key → reading map produced by one extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabValues {
    readings: BTreeMap<LabKey, LabReading>,
}

impl LabValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: LabKey) -> Option<f64> {
        self.readings.get(&key).map(|r| r.value)
    }

    pub fn reading(&self, key: LabKey) -> Option<&LabReading> {
        self.readings.get(&key)
    }

    pub fn contains(&self, key: LabKey) -> bool {
        self.readings.contains_key(&key)
    }

    pub fn insert(&mut self, key: LabKey, value: f64, source: ReadingSource) {
        self.readings.insert(key, LabReading { value, source });
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LabKey, f64)> + '_ {
        self.readings.iter().map(|(k, r)| (*k, r.value))
    }

    /// Plain key → value view (canonical key names).
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        self.iter().map(|(k, v)| (k.as_str(), v)).collect()
    }
}

struct LabPattern {
    key: LabKey,
    regex: Regex,
}

/// Labeled patterns, applied to lowercased text.
static LAB_PATTERNS: LazyLock<Vec<LabPattern>> = LazyLock::new(|| {
    vec![
        pattern(
            LabKey::Glucose,
            r"(?i)(?:fasting\s*blood\s*glucose|fasting\s*glucose|glucose|fbg|blood\s*sugar)[:\s\-]*([0-9]+\.?[0-9]*)",
        ),
        pattern(
            LabKey::Cholesterol,
            r"(?i)(?:cholesterol|chol)[:\s\-]*([0-9]+\.?[0-9]*)",
        ),
        pattern(
            LabKey::Tsh,
            r"(?i)(?:tsh|thyroid stimulating hormone|thyroid-stimulating hormone)[:\s\-]*([0-9]+\.?[0-9]*)",
        ),
        pattern(
            LabKey::T3,
            r"(?i)(?:t3[, ]*total|t3 total|t3[, ]*serum)[:\s\-]*([0-9]+\.?[0-9]*)",
        ),
        pattern(
            LabKey::T4,
            r"(?i)(?:t4[, ]*total|t4 total|t4[, ]*serum|t4[, ]*mcg)[:\s\-]*([0-9]+\.?[0-9]*)",
        ),
    ]
});

fn pattern(key: LabKey, re: &str) -> LabPattern {
    LabPattern {
        key,
        regex: Regex::new(re).unwrap(),
    }
}

/// Extract canonical lab values from OCR text.
///
/// Never fails: unparseable captures leave the key unset.
pub fn extract_named_values(text: &str) -> LabValues {
    let text_low = text.to_lowercase();
    let mut found = LabValues::new();
    // Spans already attributed to a key; the priority fill skips them.
    let mut consumed: Vec<Range<usize>> = Vec::new();

    for pat in LAB_PATTERNS.iter() {
        let Some(caps) = pat.regex.captures(&text_low) else {
            continue;
        };
        let Some(number) = caps.get(1) else {
            continue;
        };
        match safe_float(number.as_str()) {
            Ok(value) => {
                found.insert(pat.key, value, ReadingSource::Labeled);
                consumed.push(number.range());
            }
            Err(e) => {
                tracing::debug!(key = %pat.key, error = %e, "Labeled lab value not numeric");
            }
        }
    }

    if found.len() == LabKey::ALL.len() {
        return found;
    }

    for key in LabKey::FALLBACK_ORDER {
        if found.contains(key) {
            continue;
        }
        let name = key.as_str().to_lowercase();
        let Some(idx) = text_low.find(&name) else {
            continue;
        };
        let window_start = idx + name.len();
        let window_end = text_low[window_start..]
            .char_indices()
            .nth(POSITIONAL_WINDOW_CHARS)
            .map(|(offset, _)| window_start + offset)
            .unwrap_or(text_low.len());

        let candidate = numeric_tokens(&text_low)
            .filter(|t| t.start >= window_start && t.start < window_end)
            .find(|t| !consumed.iter().any(|span| t.overlaps(span)));

        if let Some(token) = candidate {
            if let Ok(value) = safe_float(token.text) {
                found.insert(key, value, ReadingSource::Positional);
                consumed.push(token.span());
            }
        }
    }

    if found.len() < MIN_RESOLVED_BEFORE_FILL {
        let mut remaining = numeric_tokens(&text_low)
            .filter(|t| !consumed.iter().any(|span| t.overlaps(span)));

        for key in LabKey::FALLBACK_ORDER {
            if found.contains(key) {
                continue;
            }
            let Some(token) = remaining.next() else {
                break;
            };
            if let Ok(value) = safe_float(token.text) {
                found.insert(key, value, ReadingSource::PriorityFill);
            }
        }
    }

    found
}
