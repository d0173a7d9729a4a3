//! Append-only prediction history with CSV export.
//!
//! The log only grows until `clear`, which swaps in an empty sequence.
//! Records are handed out by shared reference only.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::inference::Disease;

/// CSV header, one column per record field.
pub const CSV_COLUMNS: [&str; 5] = ["time", "model", "inputs", "prediction", "prob"];

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("CSV is not valid UTF-8")]
    Encoding,
    #[error("Unexpected CSV header: {0}")]
    Header(String),
    #[error("Row {row}: {reason}")]
    Row { row: usize, reason: String },
}

/// One logged model invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub time: DateTime<Utc>,
    pub model: Disease,
    /// Copy of the feature vector the model saw.
    pub inputs: Vec<f64>,
    pub prediction: u8,
    pub prob: Option<f64>,
}

impl PredictionRecord {
    /// Record an outcome now; `inputs` is copied into the record.
    pub fn new(model: Disease, inputs: &[f64], prediction: u8, prob: Option<f64>) -> Self {
        Self {
            time: Utc::now(),
            model,
            inputs: inputs.to_vec(),
            prediction,
            prob,
        }
    }

    fn csv_fields(&self) -> [String; 5] {
        let inputs = self
            .inputs
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        [
            self.time.to_rfc3339_opts(SecondsFormat::Micros, true),
            self.model.model_key().to_string(),
            format!("[{inputs}]"),
            self.prediction.to_string(),
            self.prob.map(|p| p.to_string()).unwrap_or_default(),
        ]
    }

    fn from_csv_fields(row: usize, fields: &[String]) -> Result<Self, HistoryError> {
        let bad = |reason: String| HistoryError::Row { row, reason };
        if fields.len() != CSV_COLUMNS.len() {
            return Err(bad(format!(
                "expected {} fields, found {}",
                CSV_COLUMNS.len(),
                fields.len()
            )));
        }

        let time = DateTime::parse_from_rfc3339(&fields[0])
            .map_err(|e| bad(format!("time: {e}")))?
            .with_timezone(&Utc);
        let model = fields[1].parse::<Disease>().map_err(bad)?;
        let inputs = serde_json::from_str::<Vec<f64>>(&fields[2])
            .map_err(|e| bad(format!("inputs: {e}")))?;
        let prediction = fields[3]
            .parse::<u8>()
            .map_err(|e| bad(format!("prediction: {e}")))?;
        let prob = match fields[4].as_str() {
            "" => None,
            raw => Some(raw.parse::<f64>().map_err(|e| bad(format!("prob: {e}")))?),
        };

        Ok(Self {
            time,
            model,
            inputs,
            prediction,
            prob,
        })
    }
}

/// Ordered, append-only log of prediction records.
#[derive(Debug, Default)]
pub struct HistoryLog {
    records: Vec<PredictionRecord>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: PredictionRecord) {
        self.records.push(record);
    }

    pub fn all(&self) -> &[PredictionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replace the log with an empty one.
    pub fn clear(&mut self) {
        self.records = Vec::new();
    }

    /// UTF-8 CSV: header row plus one row per record, oldest first.
    pub fn export_csv(&self) -> Vec<u8> {
        let mut out = String::new();
        write_csv_row(&mut out, CSV_COLUMNS.iter().copied());
        for record in &self.records {
            let fields = record.csv_fields();
            write_csv_row(&mut out, fields.iter().map(String::as_str));
        }
        out.into_bytes()
    }
}

/// Read records back from `export_csv` output.
pub fn parse_history_csv(bytes: &[u8]) -> Result<Vec<PredictionRecord>, HistoryError> {
    let text = std::str::from_utf8(bytes).map_err(|_| HistoryError::Encoding)?;
    let mut rows = parse_csv_rows(text).into_iter();

    let header = rows.next().unwrap_or_default();
    if header.iter().map(String::as_str).ne(CSV_COLUMNS.iter().copied()) {
        return Err(HistoryError::Header(header.join(",")));
    }

    rows.enumerate()
        .map(|(i, fields)| PredictionRecord::from_csv_fields(i + 1, &fields))
        .collect()
}

fn write_csv_row<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(',');
        }
        if field.contains([',', '"', '\n', '\r']) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push('\n');
}

/// Split CSV text into rows of unquoted fields (RFC 4180 quoting).
fn parse_csv_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log() -> HistoryLog {
        let mut log = HistoryLog::new();
        log.append(PredictionRecord::new(
            Disease::Diabetes,
            &[0.0, 120.0, 70.0, 20.0, 80.0, 26.0, 0.5, 30.0],
            1,
            Some(0.81),
        ));
        log.append(PredictionRecord::new(
            Disease::HeartDisease,
            &[45.0, 1.0, 0.0, 120.0, 200.0, 0.0, 0.0, 140.0, 0.0, 1.0, 1.0, 0.0, 1.0],
            0,
            None,
        ));
        log.append(PredictionRecord::new(
            Disease::Thyroid,
            &[40.0, 1.0, 0.0, 3.5, 1.0, 100.0, 8.0],
            0,
            Some(0.12),
        ));
        log
    }

    #[test]
    fn record_copies_inputs() {
        let mut inputs = vec![1.0, 2.0];
        let record = PredictionRecord::new(Disease::Diabetes, &inputs, 0, None);
        inputs[0] = 99.0;
        assert_eq!(record.inputs, vec![1.0, 2.0]);
    }

    #[test]
    fn append_preserves_order() {
        let log = sample_log();
        let models: Vec<Disease> = log.all().iter().map(|r| r.model).collect();
        assert_eq!(
            models,
            vec![Disease::Diabetes, Disease::HeartDisease, Disease::Thyroid]
        );
    }

    #[test]
    fn export_has_header_plus_one_line_per_record() {
        let log = sample_log();
        let csv = String::from_utf8(log.export_csv()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "time,model,inputs,prediction,prob");
    }

    #[test]
    fn missing_probability_is_empty_cell() {
        let log = sample_log();
        let csv = String::from_utf8(log.export_csv()).unwrap();
        let heart_row = csv.lines().nth(2).unwrap();
        assert!(heart_row.ends_with(",0,"), "row was {heart_row}");
    }

    #[test]
    fn export_then_parse_reproduces_models_and_labels() {
        let log = sample_log();
        let parsed = parse_history_csv(&log.export_csv()).unwrap();
        assert_eq!(parsed.len(), 3);
        for (original, reloaded) in log.all().iter().zip(&parsed) {
            assert_eq!(original.model, reloaded.model);
            assert_eq!(original.prediction, reloaded.prediction);
            assert_eq!(original.prob, reloaded.prob);
            assert_eq!(original.inputs, reloaded.inputs);
        }
    }

    #[test]
    fn clear_then_export_is_header_only() {
        let mut log = sample_log();
        log.clear();
        assert!(log.is_empty());
        let csv = String::from_utf8(log.export_csv()).unwrap();
        assert_eq!(csv.lines().count(), 1);
        assert!(parse_history_csv(csv.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn quoted_fields_survive_parsing() {
        let rows = parse_csv_rows("a,\"b, \"\"c\"\"\",\n1,2,3\n");
        assert_eq!(rows[0], vec!["a", "b, \"c\"", ""]);
        assert_eq!(rows[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn wrong_header_rejected() {
        let err = parse_history_csv(b"when,what\n").unwrap_err();
        assert!(matches!(err, HistoryError::Header(_)));
    }

    #[test]
    fn malformed_row_reports_position() {
        let csv = "time,model,inputs,prediction,prob\n2026-01-01T00:00:00Z,diabetes,[1],7x,\n";
        let err = parse_history_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, HistoryError::Row { row: 1, .. }));
    }
}
