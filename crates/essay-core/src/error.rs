//! Error types for essay analysis
//!
//! Every failure that leaves the core is an [`AnalysisError`] tagged with one
//! of the closed [`ErrorKind`] variants. Constructors live here; mapping of
//! transport faults and backend payloads into these lives in
//! [`crate::classify`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of failure categories surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Empty, oversized, or non-string essay text
    InvalidInput,
    /// The analysis backend refused or could not accept the connection
    BackendUnavailable,
    /// The backend did not answer within the configured timeout
    Timeout,
    /// The backend answered with a non-success status
    BackendRejected,
    /// Any other network fault
    Transport,
    /// Missing field, wrong type, or out-of-range score in a result
    InvalidResponse,
}

impl ErrorKind {
    /// Stable machine-readable code for this kind
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "INVALID_INPUT",
            ErrorKind::BackendUnavailable => "BACKEND_UNAVAILABLE",
            ErrorKind::Timeout => "TIMEOUT",
            ErrorKind::BackendRejected => "BACKEND_REJECTED",
            ErrorKind::Transport => "TRANSPORT",
            ErrorKind::InvalidResponse => "INVALID_RESPONSE",
        }
    }

    /// HTTP status a server should answer with for this kind
    ///
    /// Only caller mistakes map to 400; everything the caller cannot fix is
    /// reported as 500.
    pub fn http_status(self) -> u16 {
        match self {
            ErrorKind::InvalidInput => 400,
            _ => 500,
        }
    }

    pub fn is_client_error(self) -> bool {
        self.http_status() < 500
    }
}

/// The single error representation crossing the core boundary
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{message}")]
pub struct AnalysisError {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AnalysisError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    pub fn backend_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BackendUnavailable, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Non-success answer from the backend, embedding its status and message
    pub fn backend_rejected(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(
            ErrorKind::BackendRejected,
            format!("Analysis backend error: {} - {}", status, message),
        )
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::InvalidResponse,
            format!("Invalid response: {}", message.into()),
        )
    }

    pub fn missing_field(field: &str) -> Self {
        Self::invalid_response(format!("missing required field {}", field))
    }
}

/// Result alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_invalid_input_is_client_error() {
        assert_eq!(ErrorKind::InvalidInput.http_status(), 400);
        for kind in [
            ErrorKind::BackendUnavailable,
            ErrorKind::Timeout,
            ErrorKind::BackendRejected,
            ErrorKind::Transport,
            ErrorKind::InvalidResponse,
        ] {
            assert_eq!(kind.http_status(), 500, "{:?}", kind);
            assert!(!kind.is_client_error());
        }
    }

    #[test]
    fn test_backend_rejected_embeds_status() {
        let err = AnalysisError::backend_rejected(503, "runner not initialized");
        assert_eq!(err.kind, ErrorKind::BackendRejected);
        assert!(err.message.contains("503"));
        assert!(err.message.contains("runner not initialized"));
        assert_eq!(err.details, None);
    }

    #[test]
    fn test_missing_field_names_field() {
        let err = AnalysisError::missing_field("contentFeedback");
        assert_eq!(err.kind, ErrorKind::InvalidResponse);
        assert!(err.to_string().contains("contentFeedback"));
    }

    #[test]
    fn test_error_serializes_without_empty_details() {
        let err = AnalysisError::invalid_input("essay text cannot be empty");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "InvalidInput");
        assert!(json.get("details").is_none());
    }
}
