//! Tolerant numeric parsing for OCR output.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::ExtractionError;

static NUMBER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d+)?").unwrap());

/// Leftovers that survive character stripping but are not numbers.
const NON_NUMERIC_LEFTOVERS: [&str; 5] = ["", ".", "-", "--", "..."];

/// A numeric token and its byte span in the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericToken<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl NumericToken<'_> {
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn overlaps(&self, span: &Range<usize>) -> bool {
        self.start < span.end && span.start < self.end
    }
}

/// Parse a number the way OCR text tends to present it.
///
/// Whitespace is trimmed, a comma decimal separator becomes a period and
/// every character other than digits, `.`, `-`, `e`, `E` is dropped.
pub fn safe_float(raw: &str) -> Result<f64, ExtractionError> {
    let cleaned: String = raw
        .trim()
        .replace(',', ".")
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | 'e' | 'E'))
        .collect();

    if NON_NUMERIC_LEFTOVERS.contains(&cleaned.as_str()) {
        return Err(ExtractionError::InvalidNumber(raw.to_string()));
    }

    cleaned
        .parse::<f64>()
        .map_err(|_| ExtractionError::InvalidNumber(raw.to_string()))
}

/// Numeric tokens of `text` in order of appearance, with their spans.
pub fn numeric_tokens(text: &str) -> impl Iterator<Item = NumericToken<'_>> + '_ {
    NUMBER_TOKEN
        .find_iter(text)
        .filter(|m| !matches!(m.as_str().trim(), "" | "." | ","))
        .map(|m| NumericToken {
            text: m.as_str(),
            start: m.start(),
            end: m.end(),
        })
}

/// Numeric substrings of `text` (`\d+(?:[.,]\d+)?`) in order of appearance.
pub fn extract_numbers_from_text(text: &str) -> Vec<String> {
    numeric_tokens(text).map(|t| t.text.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_float_plain_values() {
        assert_eq!(safe_float("145").unwrap(), 145.0);
        assert_eq!(safe_float("  5.4 ").unwrap(), 5.4);
        assert_eq!(safe_float("-2.5").unwrap(), -2.5);
        assert_eq!(safe_float("1e3").unwrap(), 1000.0);
    }

    #[test]
    fn safe_float_comma_decimal_separator() {
        assert_eq!(safe_float("7,25").unwrap(), 7.25);
    }

    #[test]
    fn safe_float_strips_units_and_noise() {
        assert_eq!(safe_float("132 mg/dL").unwrap(), 132.0);
        assert_eq!(safe_float("~98%").unwrap(), 98.0);
    }

    #[test]
    fn safe_float_rejects_leftovers() {
        for raw in ["", ".", "-", "--", "..."] {
            assert!(
                matches!(safe_float(raw), Err(ExtractionError::InvalidNumber(_))),
                "{raw:?} should be rejected"
            );
        }
        // Units alone clean down to nothing
        assert!(safe_float("mg/dL").is_err());
    }

    #[test]
    fn safe_float_rejects_unparseable_remainder() {
        assert!(safe_float("1.2.3").is_err());
        assert!(safe_float("e").is_err());
    }

    #[test]
    fn safe_float_idempotent_on_clean_values() {
        for raw in ["145", "0.5", "7,25", "-3.75", "1e-3", "210.0", "0.00006"] {
            let once = safe_float(raw).unwrap();
            let twice = safe_float(&once.to_string()).unwrap();
            assert_eq!(once, twice, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn numbers_in_order_of_appearance() {
        let text = "TSH 2.5 mIU/L, T3 1,2 ng/mL and T4 8";
        assert_eq!(
            extract_numbers_from_text(text),
            vec!["2.5", "3", "1,2", "4", "8"]
        );
    }

    #[test]
    fn numbers_empty_for_text_without_digits() {
        assert!(extract_numbers_from_text("no values here").is_empty());
        assert!(extract_numbers_from_text("").is_empty());
    }

    #[test]
    fn numeric_tokens_carry_spans() {
        let text = "a 12 b 3.5";
        let tokens: Vec<_> = numeric_tokens(text).collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(&text[tokens[0].span()], "12");
        assert_eq!(tokens[1].start, 7);
        assert!(tokens[1].overlaps(&(8..9)));
        assert!(!tokens[0].overlaps(&(4..6)));
    }

    #[test]
    fn numeric_tokens_restartable() {
        let text = "1 22 333";
        let first: Vec<_> = numeric_tokens(text).collect();
        let second: Vec<_> = numeric_tokens(text).collect();
        assert_eq!(first, second);
    }
}
