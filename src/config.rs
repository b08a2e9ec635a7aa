//! Client configuration loaded from environment variables.
//!
//! Everything is optional: an unconfigured client points at a local
//! backend with the demo fallback disabled.

use std::env;
use std::path::PathBuf;

/// Default backend when `CTFD_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL
    pub base_url: String,
    /// Where the session token file lives
    pub token_path: PathBuf,
    /// Serve fixture data when challenge/scoreboard fetches fail
    pub demo_fallback: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Recognized variables:
    /// - `CTFD_URL` - backend base URL (default `http://localhost:8000`)
    /// - `CTFD_TOKEN_PATH` - session token file location
    /// - `CTFD_DEMO_FALLBACK` - `1`/`true` enables the demo fixture fallback
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let base_url = env::var("CTFD_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        reqwest::Url::parse(&base_url)
            .map_err(|e| ConfigError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            base_url,
            token_path: env::var("CTFD_TOKEN_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_token_path()),
            demo_fallback: env::var("CTFD_DEMO_FALLBACK")
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token_path: env::temp_dir().join("ctfd-client-test/token.json"),
            demo_fallback: false,
        }
    }
}

/// Token file under the platform's local data directory, with a relative
/// fallback when no home is available (containers, CI).
fn default_token_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ctfd-client")
        .join("token.json")
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid backend base URL: {0}")]
    InvalidBaseUrl(String),
}
