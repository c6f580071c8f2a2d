//! Client for a running essay gateway
//!
//! Talks to the gateway's own HTTP surface (`/api/analyze-essay`,
//! `/api/health`) rather than to the analysis backend. Input is checked
//! locally before anything is sent, and answers are validated with the same
//! rules the gateway applies to the backend.

use std::time::Duration;

use serde_json::{json, Value};
use tracing::debug;

use crate::classify::{
    classify_backend_status, classify_elapsed, classify_malformed_body, classify_transport, Peer,
};
use crate::error::{AnalysisError, Result};
use crate::model::EssayAnalysisResponse;
use crate::text::EssayText;
use crate::validate::validate_remote;

/// Gateway address used when none is given
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:3001";

/// Deadline for a full gateway exchange. Exceeds the gateway's own backend
/// deadline.
pub const DEFAULT_CLIENT_TIMEOUT: Duration = Duration::from_secs(125);

#[derive(Debug, Clone)]
pub struct EssayAnalysisClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl EssayAnalysisClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_CLIENT_TIMEOUT,
        }
    }

    /// Bound every call, health checks included, by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Ask the gateway to analyze `text`
    pub async fn analyze_essay(&self, text: &str) -> Result<EssayAnalysisResponse> {
        let text = EssayText::parse(text)?;
        match tokio::time::timeout(self.timeout, self.exchange(&text)).await {
            Ok(outcome) => outcome,
            Err(_elapsed) => Err(classify_elapsed(Peer::Gateway, self.timeout, &self.base_url)),
        }
    }

    async fn exchange(&self, text: &EssayText) -> Result<EssayAnalysisResponse> {
        let url = format!("{}/api/analyze-essay", self.base_url);
        debug!("POST {} ({} chars)", url, text.char_count());

        let response = self
            .http
            .post(&url)
            .json(&json!({ "text": text.as_str() }))
            .send()
            .await
            .map_err(|e| classify_transport(&e, Peer::Gateway, &self.base_url))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| classify_transport(&e, Peer::Gateway, &self.base_url))?;

        if status == reqwest::StatusCode::BAD_REQUEST {
            let message = error_field(&body)
                .unwrap_or_else(|| "Invalid request: rejected by the essay gateway".to_string());
            return Err(AnalysisError::invalid_input(message));
        }
        if !status.is_success() {
            return Err(classify_backend_status(status, &body));
        }

        let payload: Value =
            serde_json::from_str(&body).map_err(|e| classify_malformed_body(&e))?;
        validate_remote(&payload)
    }

    /// Whether the gateway answers its health check. Never errors.
    pub async fn check_health(&self) -> bool {
        let url = format!("{}/api/health", self.base_url);
        match tokio::time::timeout(self.timeout, self.http.get(&url).send()).await {
            Ok(Ok(resp)) => resp.status().is_success(),
            Ok(Err(e)) => {
                debug!("Health check against {} failed: {}", url, e);
                false
            }
            Err(_elapsed) => {
                debug!("Health check against {} timed out", url);
                false
            }
        }
    }
}

impl Default for EssayAnalysisClient {
    fn default() -> Self {
        Self::new(DEFAULT_GATEWAY_URL)
    }
}

fn error_field(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("error")?
        .as_str()
        .map(str::to_string)
}
