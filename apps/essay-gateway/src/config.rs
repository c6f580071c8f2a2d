//! Gateway configuration
//!
//! Every setting is a command-line flag with an environment fallback. A
//! `.env` file in the working directory is loaded before parsing.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use essay_core::gateway::{DEFAULT_BACKEND_URL, DEFAULT_CLIENT_ID};
use essay_core::RemoteAnalyzer;

/// Command-line arguments for the essay gateway
#[derive(Parser, Debug, Clone)]
#[command(name = "essay-gateway")]
#[command(about = "HTTP gateway forwarding essays to the remote analysis backend")]
pub struct Config {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Base URL of the remote analysis backend
    #[arg(long, env = "ANALYZER_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    /// Backend timeout in seconds
    #[arg(long, env = "ANALYZER_TIMEOUT_SECS", default_value_t = 120)]
    pub timeout_secs: u64,

    /// Caller identifier forwarded to the backend as `user_id`
    #[arg(long, env = "ANALYZER_CLIENT_ID", default_value = DEFAULT_CLIENT_ID)]
    pub client_id: String,

    /// Rate limit: requests per second per IP
    #[arg(long, env = "RATE_LIMIT", default_value_t = 10)]
    pub rate_limit: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Load `.env` if present, then parse flags and environment
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Remote analyzer for the configured backend
    pub fn remote_analyzer(&self) -> RemoteAnalyzer {
        RemoteAnalyzer::new(self.backend_url.as_str())
            .with_timeout(self.timeout())
            .with_user_id(self.client_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Config::command().debug_assert();
    }

    #[test]
    fn test_explicit_flags() {
        let config = Config::try_parse_from([
            "essay-gateway",
            "--port",
            "4100",
            "--host",
            "127.0.0.1",
            "--backend-url",
            "http://analyzer.internal:9000/",
            "--timeout-secs",
            "30",
            "--client-id",
            "grading-service",
        ])
        .unwrap();

        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:4100");
        assert_eq!(config.timeout(), Duration::from_secs(30));

        let analyzer = config.remote_analyzer();
        assert_eq!(analyzer.backend_url(), "http://analyzer.internal:9000");
        assert_eq!(analyzer.user_id(), "grading-service");
        assert_eq!(analyzer.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_host_is_an_error() {
        let config =
            Config::try_parse_from(["essay-gateway", "--host", "not a host", "--port", "1"])
                .unwrap();
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Config::try_parse_from(["essay-gateway", "--port", "99999"]).is_err());
    }
}
