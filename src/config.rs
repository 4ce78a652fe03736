//! Centralized configuration management for simple-mercari

use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Result, Context};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:9000";
pub const DEFAULT_USER_AGENT: &str = "simple-mercari/0.1.0";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend origin, also the base for resolving item image paths
    pub backend_url: String,
    /// File that receives tracing output
    pub log_file: PathBuf,
    /// HTTP client configuration
    pub http: HttpConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            log_file: PathBuf::from("simple-mercari.log"),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let backend_url = std::env::var("MERCARI_BACKEND_URL")
            .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());

        let log_file = std::env::var("MERCARI_LOG_FILE")
            .unwrap_or_else(|_| "simple-mercari.log".to_string())
            .into();

        let http = HttpConfig {
            timeout_seconds: parse_env_var("MERCARI_HTTP_TIMEOUT_SECONDS")?.unwrap_or(30),
            user_agent: std::env::var("MERCARI_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
        };

        Ok(Config {
            backend_url,
            log_file,
            http,
        })
    }

    /// Replace the backend origin, e.g. from a command line flag
    pub fn with_backend_url(mut self, backend_url: &str) -> Self {
        self.backend_url = backend_url.to_string();
        self
    }

    /// Backend origin without a trailing slash
    pub fn backend_origin(&self) -> &str {
        self.backend_url.trim_end_matches('/')
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    /// Resolve an item's image reference against the backend origin.
    ///
    /// Relative paths are joined with exactly one `/`. References that are
    /// already absolute URLs are returned unchanged.
    pub fn image_url(&self, image: &str) -> String {
        if image.starts_with("http://") || image.starts_with("https://") {
            return image.to_string();
        }
        format!("{}/{}", self.backend_origin(), image.trim_start_matches('/'))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.backend_url.starts_with("http://") || self.backend_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "Backend URL must start with http:// or https://: {}",
                self.backend_url
            ));
        }

        if self.http.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("HTTP timeout must be at least one second"));
        }

        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}
