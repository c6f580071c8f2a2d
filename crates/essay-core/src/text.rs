//! Boundary validation for essay text
//!
//! [`EssayText`] is the only way text enters the pipeline. Anything empty,
//! whitespace-only, or longer than [`MAX_ESSAY_CHARS`] is rejected here, so
//! neither the scorer nor the remote gateway ever sees it.

use serde::Serialize;
use serde_json::Value;

use crate::error::{AnalysisError, Result};

/// Maximum accepted essay length, in characters
pub const MAX_ESSAY_CHARS: usize = 50_000;

/// Non-empty, length-bounded essay text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EssayText(String);

impl EssayText {
    /// Validate raw text
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(AnalysisError::invalid_input(
                "Invalid request: essay text cannot be empty",
            ));
        }

        // Characters, not bytes
        if raw.chars().count() > MAX_ESSAY_CHARS {
            return Err(AnalysisError::invalid_input(format!(
                "Invalid request: essay text is too long (maximum {} characters)",
                format_thousands(MAX_ESSAY_CHARS)
            )));
        }

        Ok(Self(raw.to_string()))
    }

    /// Validate a JSON value that should hold the essay text
    ///
    /// `None` and non-string values are rejected as invalid input.
    pub fn from_json(value: Option<&Value>) -> Result<Self> {
        match value {
            Some(Value::String(raw)) => Self::parse(raw),
            _ => Err(AnalysisError::invalid_input(
                "Invalid request: essay text is required and must be a string",
            )),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for EssayText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn format_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_empty_text_rejected() {
        let err = EssayText::parse("").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
        assert!(err.message.contains("cannot be empty"));
    }

    #[test]
    fn test_whitespace_only_rejected() {
        let err = EssayText::parse("  \n\t  ").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
    }

    #[test]
    fn test_exact_limit_accepted() {
        let text = "a".repeat(MAX_ESSAY_CHARS);
        let essay = EssayText::parse(&text).unwrap();
        assert_eq!(essay.char_count(), MAX_ESSAY_CHARS);
    }

    #[test]
    fn test_one_over_limit_rejected() {
        let text = "a".repeat(MAX_ESSAY_CHARS + 1);
        let err = EssayText::parse(&text).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
        assert!(err.message.contains("50,000"));
    }

    #[test]
    fn test_limit_counts_chars_not_bytes() {
        // 'é' is two bytes in UTF-8
        let text = "é".repeat(MAX_ESSAY_CHARS);
        assert!(text.len() > MAX_ESSAY_CHARS);
        assert!(EssayText::parse(&text).is_ok());
    }

    #[test]
    fn test_text_is_kept_verbatim() {
        let essay = EssayText::parse("  padded essay  ").unwrap();
        assert_eq!(essay.as_str(), "  padded essay  ");
    }

    #[test]
    fn test_from_json_rejects_missing_and_non_string() {
        for value in [None, Some(json!(42)), Some(json!(null)), Some(json!(["a"]))] {
            let err = EssayText::from_json(value.as_ref()).unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidInput);
            assert!(err.message.contains("must be a string"));
        }
    }

    #[test]
    fn test_from_json_accepts_string() {
        let value = json!("An essay about rivers.");
        let essay = EssayText::from_json(Some(&value)).unwrap();
        assert_eq!(essay.as_str(), "An essay about rivers.");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(50_000), "50,000");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000_000), "1,000,000");
    }
}
