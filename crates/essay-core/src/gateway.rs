//! Remote analyzer gateway
//!
//! Forwards essay text to the external analysis backend and shapes whatever
//! comes back into either a raw JSON payload or a classified
//! [`AnalysisError`]. No business validation happens here; see
//! [`crate::validate`].
//!
//! One request per call, no retries. The whole exchange (connect, send,
//! read body) runs under a single deadline.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::classify::{
    classify_backend_status, classify_elapsed, classify_malformed_body, classify_transport, Peer,
};
use crate::error::{AnalysisError, Result};
use crate::text::EssayText;

/// Backend used when none is configured
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Deadline for a full backend exchange
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Identifier sent to the backend when the caller supplies none
pub const DEFAULT_CLIENT_ID: &str = "web_client";

/// Body of the backend's analyze endpoint
#[derive(Serialize)]
struct BackendRequest<'a> {
    text: &'a str,
    user_id: &'a str,
}

/// HTTP client for the remote analysis backend
#[derive(Debug, Clone)]
pub struct RemoteAnalyzer {
    http: reqwest::Client,
    backend_url: String,
    user_id: String,
    timeout: Duration,
}

impl RemoteAnalyzer {
    /// Create an analyzer for the backend at `backend_url`
    ///
    /// Trailing slashes are dropped so endpoint paths join cleanly.
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), backend_url)
    }

    /// Create an analyzer sharing an existing connection pool
    pub fn with_client(http: reqwest::Client, backend_url: impl Into<String>) -> Self {
        let backend_url = backend_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            backend_url,
            user_id: DEFAULT_CLIENT_ID.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the caller identifier forwarded as `user_id`
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn analyze_endpoint(&self) -> String {
        format!("{}/analyze", self.backend_url)
    }

    /// Send `text` to the backend and return its unvalidated JSON answer
    pub async fn fetch_raw(&self, text: &EssayText) -> Result<Value> {
        self.fetch_raw_as(text, &self.user_id).await
    }

    /// Like [`fetch_raw`](Self::fetch_raw) with an explicit caller identifier
    pub async fn fetch_raw_as(&self, text: &EssayText, user_id: &str) -> Result<Value> {
        info!(
            "Forwarding essay to analysis backend: url={}, chars={}, user_id={}",
            self.analyze_endpoint(),
            text.char_count(),
            user_id
        );

        let exchange = self.exchange(text, user_id);
        let outcome = match tokio::time::timeout(self.timeout, exchange).await {
            Ok(outcome) => outcome,
            Err(_elapsed) => Err(classify_elapsed(
                Peer::AnalysisBackend,
                self.timeout,
                &self.backend_url,
            )),
        };

        if let Err(err) = &outcome {
            warn!("Analysis backend call failed: kind={:?}, {}", err.kind, err);
        }
        outcome
    }

    async fn exchange(&self, text: &EssayText, user_id: &str) -> Result<Value> {
        let response = self
            .http
            .post(self.analyze_endpoint())
            .json(&BackendRequest {
                text: text.as_str(),
                user_id,
            })
            .send()
            .await
            .map_err(|e| classify_transport(&e, Peer::AnalysisBackend, &self.backend_url))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| classify_transport(&e, Peer::AnalysisBackend, &self.backend_url))?;

        debug!("Analysis backend answered {} ({} bytes)", status, body.len());

        if !status.is_success() {
            return Err(classify_backend_status(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| classify_malformed_body(&e))
    }
}

impl Default for RemoteAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}

/// Build the error a caller sees when a backend payload fails validation
pub(crate) fn rejected_payload(err: AnalysisError, backend_url: &str) -> AnalysisError {
    warn!(
        "Analysis backend at {} returned an invalid payload: {}",
        backend_url, err
    );
    err
}
