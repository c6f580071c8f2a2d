//! Failure classification
//!
//! Turns transport faults and backend error payloads into [`AnalysisError`]s
//! of the closed [`ErrorKind`](crate::ErrorKind) taxonomy. Input and
//! validation failures are already typed when they are raised; everything
//! that comes off the wire goes through here.

use std::time::Duration;

use serde_json::Value;

use crate::error::AnalysisError;

/// Longest raw body excerpt quoted in an error message
const MAX_BODY_EXCERPT: usize = 200;

/// Remote process on the other end of a failed exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Peer {
    /// The external AI analysis backend
    AnalysisBackend,
    /// A running essay gateway, seen from [`EssayAnalysisClient`](crate::EssayAnalysisClient)
    Gateway,
}

impl Peer {
    pub fn label(self) -> &'static str {
        match self {
            Peer::AnalysisBackend => "analysis backend",
            Peer::Gateway => "essay gateway",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Peer::AnalysisBackend => "Analysis backend",
            Peer::Gateway => "Essay gateway",
        }
    }
}

/// Classify a `reqwest` failure talking to `peer`
///
/// Timeouts are checked first, then connection failures, and anything else
/// is a generic transport fault.
pub fn classify_transport(err: &reqwest::Error, peer: Peer, url: &str) -> AnalysisError {
    if err.is_timeout() {
        AnalysisError::timeout(format!("{} at {} did not respond in time", peer.title(), url))
            .with_details(err.to_string())
    } else if err.is_connect() {
        unavailable(peer, url).with_details(err.to_string())
    } else {
        AnalysisError::transport(format!(
            "Request to {} at {} failed: {}",
            peer.label(),
            url,
            err
        ))
    }
}

/// `peer` could not be reached at all
pub fn unavailable(peer: Peer, url: &str) -> AnalysisError {
    AnalysisError::backend_unavailable(format!(
        "{} at {} is not running. Please start the {} server first.",
        peer.title(),
        url,
        peer.label()
    ))
}

/// The overall deadline for an exchange with `peer` expired
pub fn classify_elapsed(peer: Peer, timeout: Duration, url: &str) -> AnalysisError {
    AnalysisError::timeout(format!(
        "{} at {} did not respond within {}s",
        peer.title(),
        url,
        timeout.as_secs_f64()
    ))
}

/// Classify a non-success answer from the backend
///
/// The backend's own explanation is taken from the first of `detail`,
/// `error` (plus `details`), or `message` in a JSON body, else a short
/// excerpt of the raw body, else the canonical status reason. A non-empty
/// body is also kept, shortened, as the error's details.
pub fn classify_backend_status(status: reqwest::StatusCode, body: &str) -> AnalysisError {
    let message = backend_message(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string()
    });
    let err = AnalysisError::backend_rejected(status.as_u16(), message);
    match body.trim() {
        "" => err,
        raw => err.with_details(excerpt(raw)),
    }
}

/// A success status whose body is not JSON
pub fn classify_malformed_body(err: &serde_json::Error) -> AnalysisError {
    AnalysisError::invalid_response(format!("backend returned a non-JSON body: {}", err))
}

fn backend_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(obj)) => {
            if let Some(detail) = obj.get("detail") {
                return Some(value_text(detail));
            }
            if let Some(error) = obj.get("error") {
                let error = value_text(error);
                return Some(match obj.get("details") {
                    Some(details) => format!("{} - {}", error, value_text(details)),
                    None => error,
                });
            }
            obj.get("message").map(value_text)
        }
        _ => Some(excerpt(trimmed)),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= MAX_BODY_EXCERPT {
        return text.to_string();
    }
    let mut out: String = text.chars().take(MAX_BODY_EXCERPT).collect();
    out.push('…');
    out
}
