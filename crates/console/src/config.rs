//! Console configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STAMPDESK_API_BASE_URL` - Base URL of the REST API (e.g. `https://api.example.vn/api`)
//!
//! ## Optional
//! - `STAMPDESK_APP_NAME` - Title shown in headers (default: XTS Frontend)
//! - `STAMPDESK_SESSION_FILE` - Where the access token is persisted (default: .stampdesk/session.json)
//! - `STAMPDESK_PAGE_SIZE` - Rows per list page, 1-100 (default: 10)
//! - `STAMPDESK_CACHE_TTL_SECS` - Query cache lifetime in seconds (default: 300)
//! - `STAMPDESK_HTTP_TIMEOUT_SECS` - Per-request timeout in seconds (default: none)
//! - `STAMPDESK_LOG_JSON` - Emit JSON log lines when set to `1` or `true`

use std::path::PathBuf;
use std::time::Duration;

use stampdesk_core::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use thiserror::Error;
use url::Url;

const DEFAULT_APP_NAME: &str = "XTS Frontend";
const DEFAULT_SESSION_FILE: &str = ".stampdesk/session.json";
const DEFAULT_CACHE_TTL_SECS: &str = "300";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Console configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Base URL every endpoint path is appended to
    pub api_base_url: Url,
    /// Application title
    pub app_name: String,
    /// Token file location
    pub session_file: PathBuf,
    /// Rows per list page
    pub page_size: u32,
    /// Query cache time-to-live
    pub cache_ttl: Duration,
    /// Request timeout, if any
    pub http_timeout: Option<Duration>,
    /// JSON log output
    pub log_json: bool,
}

impl ConsoleConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the base URL is missing or any value fails to
    /// parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ConsoleConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);

        let raw_base_url = env.required("STAMPDESK_API_BASE_URL")?;
        let api_base_url = Url::parse(raw_base_url.trim_end_matches('/')).map_err(|e| {
            ConfigError::InvalidEnvVar("STAMPDESK_API_BASE_URL".to_string(), e.to_string())
        })?;
        if api_base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidEnvVar(
                "STAMPDESK_API_BASE_URL".to_string(),
                "must be an http(s) URL".to_string(),
            ));
        }

        let page_size = env
            .or_default("STAMPDESK_PAGE_SIZE", &DEFAULT_PAGE_SIZE.to_string())
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar("STAMPDESK_PAGE_SIZE".to_string(), e.to_string()))?;
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(ConfigError::InvalidEnvVar(
                "STAMPDESK_PAGE_SIZE".to_string(),
                format!("must be between 1 and {MAX_PAGE_SIZE}"),
            ));
        }

        let cache_ttl = env
            .or_default("STAMPDESK_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STAMPDESK_CACHE_TTL_SECS".to_string(), e.to_string())
            })?;

        let http_timeout = env
            .optional("STAMPDESK_HTTP_TIMEOUT_SECS")
            .map(|s| {
                s.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "STAMPDESK_HTTP_TIMEOUT_SECS".to_string(),
                        e.to_string(),
                    )
                })
            })
            .transpose()?;

        let log_json = env
            .optional("STAMPDESK_LOG_JSON")
            .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"));

        Ok(Self {
            api_base_url,
            app_name: env.or_default("STAMPDESK_APP_NAME", DEFAULT_APP_NAME),
            session_file: PathBuf::from(env.or_default("STAMPDESK_SESSION_FILE", DEFAULT_SESSION_FILE)),
            page_size,
            cache_ttl,
            http_timeout,
            log_json,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an optional variable. Blank values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}
