//! Bot configuration
//!
//! Loaded from YAML. Every section and field has a default, so an empty
//! file is a valid configuration:
//!
//! ```yaml
//! http:
//!   base_url: https://www.pinterest.com
//!   timeout_seconds: 30
//!   max_retries: 3
//!   retry_backoff:
//!     type: exponential
//!     initial_ms: 500
//!     max_ms: 30000
//! rate_limit:
//!   enabled: true
//!   requests_per_second: 2
//!   burst_size: 5
//! feed:
//!   end_marker: "-end-"
//!   limit: 0
//! credentials:
//!   username: alice@example.com
//!   password: secret
//! ```

use crate::auth::Credentials;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig, DEFAULT_BASE_URL};
use crate::pagination::FeedConfig;
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding `credentials.username`
pub const USERNAME_ENV: &str = "PINBOT_USERNAME";
/// Environment variable overriding `credentials.password`
pub const PASSWORD_ENV: &str = "PINBOT_PASSWORD";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete bot configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub http: HttpConfig,
    pub rate_limit: RateLimitConfig,
    pub feed: FeedConfig,
    pub credentials: Credentials,
}

impl BotConfig {
    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {e}",
                    path.display()
                ))
            }
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse a config from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // serde_yaml rejects an empty document
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Override credentials from `PINBOT_USERNAME` / `PINBOT_PASSWORD`
    #[must_use]
    pub fn apply_env(self) -> Self {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Override credentials from an arbitrary variable source
    #[must_use]
    pub fn apply_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(username) = lookup(USERNAME_ENV).filter(|v| !v.is_empty()) {
            self.credentials.username = username;
        }
        if let Some(password) = lookup(PASSWORD_ENV).filter(|v| !v.is_empty()) {
            self.credentials.password = password;
        }
        self
    }

    /// Check values serde cannot check
    pub fn validate(&self) -> Result<()> {
        if self.http.base_url.is_empty() {
            return Err(Error::missing_field("http.base_url"));
        }
        url::Url::parse(&self.http.base_url)
            .map_err(|e| Error::config(format!("http.base_url is not a URL: {e}")))?;

        if self.http.timeout_seconds == 0 {
            return Err(Error::config("http.timeout_seconds must be positive"));
        }
        if self.feed.cursor_field.is_empty() {
            return Err(Error::missing_field("feed.cursor_field"));
        }
        Ok(())
    }

    /// Transport settings for [`crate::http::HttpClient`]
    pub fn http_client_config(&self) -> HttpClientConfig {
        let http = &self.http;
        let mut builder = HttpClientConfig::builder()
            .base_url(&http.base_url)
            .timeout(Duration::from_secs(http.timeout_seconds))
            .max_retries(http.max_retries)
            .backoff(
                http.retry_backoff.backoff_type,
                Duration::from_millis(http.retry_backoff.initial_ms),
                Duration::from_millis(http.retry_backoff.max_ms),
            );

        if let Some(agent) = &http.user_agent {
            builder = builder.user_agent(agent);
        }
        for (key, value) in &http.headers {
            builder = builder.header(key, value);
        }

        let builder = if self.rate_limit.enabled {
            builder.rate_limit(RateLimiterConfig::new(
                self.rate_limit.requests_per_second,
                self.rate_limit.burst_size,
            ))
        } else {
            builder.no_rate_limit()
        };
        builder.build()
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// Transport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_backoff: BackoffConfig,
    /// Overrides the default `pinbot/<version>` agent
    pub user_agent: Option<String>,
    /// Extra headers sent with every request
    pub headers: HashMap<String, String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 30,
            max_retries: 3,
            retry_backoff: BackoffConfig::default(),
            user_agent: None,
            headers: HashMap::new(),
        }
    }
}

/// Delay between retries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackoffConfig {
    #[serde(rename = "type")]
    pub backoff_type: BackoffType,
    pub initial_ms: u64,
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: 500,
            max_ms: 30_000,
        }
    }
}

/// Client-side throttling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub requests_per_second: u32,
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        let limiter = RateLimiterConfig::default();
        Self {
            enabled: true,
            requests_per_second: limiter.requests_per_second,
            burst_size: limiter.burst_size,
        }
    }
}
