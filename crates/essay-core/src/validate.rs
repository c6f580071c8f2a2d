//! Response validation and normalization
//!
//! Candidate payloads (a backend body, or a serialized heuristic result) are
//! checked field by field before a typed result is handed to the caller.
//! Failures are always [`ErrorKind::InvalidResponse`](crate::ErrorKind).
//!
//! Scores are range-checked here, never clamped.

use serde_json::{Map, Value};

use crate::error::{AnalysisError, Result};
use crate::model::{AnalysisResult, EssayAnalysisResponse, PillarScore};
use crate::pillars::Pillar;
use crate::scoring::{MAX_SCORE, MIN_SCORE};

/// Target shape of a candidate payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// [`EssayAnalysisResponse`] from the remote analyzer
    Remote,
    /// [`AnalysisResult`] from the heuristic scorer
    Local,
}

impl ResponseShape {
    /// Required fields, in the order they are checked
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            ResponseShape::Remote => &[
                "grammarFeedback",
                "structureFeedback",
                "contentFeedback",
                "spellingFeedback",
                "overallScore",
            ],
            ResponseShape::Local => &["pillars", "overallScore", "essayLength"],
        }
    }

    /// Inclusive range of a valid `overallScore`
    pub fn score_range(self) -> (f64, f64) {
        match self {
            ResponseShape::Remote => (0.0, 100.0),
            ResponseShape::Local => (MIN_SCORE, MAX_SCORE),
        }
    }

    /// Whether numeric strings are accepted for scores
    fn coerces_strings(self) -> bool {
        matches!(self, ResponseShape::Remote)
    }
}

/// Optional per-dimension ratings on the remote shape
const REMOTE_RATING_FIELDS: [&str; 4] = [
    "grammarRating",
    "structureRating",
    "contentRating",
    "spellingRating",
];

const RATING_RANGE: (f64, f64) = (0.0, 5.0);

/// Check that every required field of `shape` is present
///
/// Stops at the first missing field.
pub fn check_required_fields(
    payload: &Value,
    shape: ResponseShape,
) -> Result<&Map<String, Value>> {
    let obj = payload
        .as_object()
        .ok_or_else(|| AnalysisError::invalid_response("response must be an object"))?;

    for field in shape.required_fields() {
        if !obj.contains_key(*field) {
            return Err(AnalysisError::missing_field(field));
        }
    }

    Ok(obj)
}

/// Validate and normalize a remote analyzer payload
pub fn validate_remote(payload: &Value) -> Result<EssayAnalysisResponse> {
    let shape = ResponseShape::Remote;
    let obj = check_required_fields(payload, shape)?;

    let overall_score = score_field(obj, "overallScore", shape, shape.score_range())?;

    let mut ratings = [None; 4];
    for (slot, field) in ratings.iter_mut().zip(REMOTE_RATING_FIELDS) {
        *slot = match obj.get(field) {
            None | Some(Value::Null) => None,
            Some(_) => Some(score_field(obj, field, shape, RATING_RANGE)?),
        };
    }
    let [grammar_rating, structure_rating, content_rating, spelling_rating] = ratings;

    Ok(EssayAnalysisResponse {
        grammar_feedback: string_field(obj, "grammarFeedback")?,
        structure_feedback: string_field(obj, "structureFeedback")?,
        content_feedback: string_field(obj, "contentFeedback")?,
        spelling_feedback: string_field(obj, "spellingFeedback")?,
        overall_score,
        grammar_rating,
        structure_rating,
        content_rating,
        spelling_rating,
        session_id: obj
            .get("session_id")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

/// Validate a heuristic result payload
pub fn validate_local(payload: &Value) -> Result<AnalysisResult> {
    let shape = ResponseShape::Local;
    let obj = check_required_fields(payload, shape)?;

    let overall_score = score_field(obj, "overallScore", shape, shape.score_range())?;

    let essay_length = obj
        .get("essayLength")
        .and_then(Value::as_u64)
        .ok_or_else(|| {
            AnalysisError::invalid_response("essayLength must be a non-negative integer")
        })?;

    let entries = obj
        .get("pillars")
        .and_then(Value::as_array)
        .ok_or_else(|| AnalysisError::invalid_response("pillars must be an array"))?;

    if entries.len() != Pillar::ALL.len() {
        return Err(AnalysisError::invalid_response(format!(
            "expected {} pillars, got {}",
            Pillar::ALL.len(),
            entries.len()
        )));
    }

    let pillars = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| validate_pillar(i, entry))
        .collect::<Result<Vec<_>>>()?;

    Ok(AnalysisResult {
        pillars,
        overall_score,
        essay_length: essay_length as usize,
    })
}

/// Round-trip an already built heuristic result through [`validate_local`]
pub fn validate_analysis_result(result: &AnalysisResult) -> Result<AnalysisResult> {
    let payload = serde_json::to_value(result)
        .map_err(|e| AnalysisError::invalid_response(format!("unserializable result: {}", e)))?;
    validate_local(&payload)
}

fn validate_pillar(index: usize, entry: &Value) -> Result<PillarScore> {
    let obj = entry.as_object().ok_or_else(|| {
        AnalysisError::invalid_response(format!("pillar {} must be an object", index))
    })?;

    for field in ["name", "score", "description"] {
        if !obj.contains_key(field) {
            return Err(AnalysisError::missing_field(&format!(
                "pillars[{}].{}",
                index, field
            )));
        }
    }

    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .and_then(Pillar::from_name)
        .ok_or_else(|| {
            AnalysisError::invalid_response(format!("pillar {} has an unknown name", index))
        })?;

    let score = obj
        .get("score")
        .and_then(|v| coerce_number(v, false))
        .filter(|s| (MIN_SCORE..=MAX_SCORE).contains(s))
        .ok_or_else(|| {
            AnalysisError::invalid_response(format!(
                "pillar '{}' score must be a number between {} and {}",
                name, MIN_SCORE, MAX_SCORE
            ))
        })?;

    Ok(PillarScore {
        name,
        score,
        description: string_field(obj, "description")?,
    })
}

fn string_field(obj: &Map<String, Value>, field: &str) -> Result<String> {
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(AnalysisError::invalid_response(format!(
            "{} must be a string",
            field
        ))),
        None => Err(AnalysisError::missing_field(field)),
    }
}

fn score_field(
    obj: &Map<String, Value>,
    field: &str,
    shape: ResponseShape,
    (min, max): (f64, f64),
) -> Result<f64> {
    let value = obj
        .get(field)
        .ok_or_else(|| AnalysisError::missing_field(field))?;

    let score = coerce_number(value, shape.coerces_strings())
        .ok_or_else(|| AnalysisError::invalid_response(format!("{} must be a number", field)))?;

    if !(min..=max).contains(&score) {
        return Err(AnalysisError::invalid_response(format!(
            "{} must be between {} and {}, got {}",
            field, min, max, score
        )));
    }

    Ok(score)
}

/// Numeric value of `value`, parsing strings when allowed. Non-finite
/// results are rejected.
pub fn coerce_number(value: &Value, parse_strings: bool) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) if parse_strings => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    n.is_finite().then_some(n)
}
