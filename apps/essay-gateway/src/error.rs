//! Error types for the essay gateway

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use essay_core::{AnalysisError, ErrorKind};
use serde::Serialize;
use thiserror::Error;

/// Message shown for every failure the caller cannot fix
const SERVER_FAILURE_MESSAGE: &str = "Internal server error during essay analysis";

/// Server error types
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Invalid request: {0}")]
    MalformedBody(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Analysis(err) => err.kind,
            ApiError::MalformedBody(_) => ErrorKind::InvalidInput,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    kind: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = StatusCode::from_u16(kind.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = if kind.is_client_error() {
            tracing::info!("Rejected essay request: {}", self);
            ErrorResponse {
                error: self.to_string(),
                details: None,
                kind: kind.code(),
            }
        } else {
            tracing::error!("Error analyzing essay: kind={:?}, {}", kind, self);
            ErrorResponse {
                error: SERVER_FAILURE_MESSAGE.to_string(),
                details: Some(self.to_string()),
                kind: kind.code(),
            }
        };

        (status, Json(body)).into_response()
    }
}
