//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BISTRO_API_URL` - Base URL of the REST API (default: `http://127.0.0.1:5000/api`)
//! - `BISTRO_HTTP_TIMEOUT_SECS` - Per-request timeout in seconds (default: 10)
//! - `BISTRO_TOKEN_PATH` - File holding the session token (default: `.bistro/token`)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api";
const DEFAULT_TIMEOUT_SECS: &str = "10";
const DEFAULT_TOKEN_PATH: &str = ".bistro/token";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every API path is appended to (e.g. `https://host/api`)
    pub api_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
    /// Where the session token is persisted between runs
    pub token_path: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_api_url(&get_env_or_default("BISTRO_API_URL", DEFAULT_API_URL))?;
        let timeout = parse_timeout(&get_env_or_default(
            "BISTRO_HTTP_TIMEOUT_SECS",
            DEFAULT_TIMEOUT_SECS,
        ))?;
        let token_path = PathBuf::from(get_env_or_default("BISTRO_TOKEN_PATH", DEFAULT_TOKEN_PATH));
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            api_url,
            timeout,
            token_path,
            sentry_dsn,
        })
    }

    /// Configuration pointing at `api_url` with every other setting defaulted.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `api_url` is not an absolute http(s) URL.
    pub fn for_api_url(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_api_url(api_url)?,
            timeout: Duration::from_secs(10),
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
            sentry_dsn: None,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse and check the API base URL.
fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar("BISTRO_API_URL".to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "BISTRO_API_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

/// Parse the request timeout. Zero would fail every request.
fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: String| {
        ConfigError::InvalidEnvVar("BISTRO_HTTP_TIMEOUT_SECS".to_string(), reason)
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(invalid("must be at least 1 second".to_string())),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(invalid(e.to_string())),
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
