//! HTTP client with retry and rate limiting
//!
//! Provides the transport every provider goes through:
//! - Automatic retries with configurable backoff
//! - Rate limiting to stay under the API's throttling
//! - A cookie jar carrying the session and CSRF cookies
//! - The `X-CSRFToken` header the private API insists on
//! - Tracking of the final URL after redirects

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::error::{Error, Result};
use crate::types::BackoffType;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use url::Url;

/// Default API host
pub const DEFAULT_BASE_URL: &str = "https://www.pinterest.com";

/// CSRF token used until the server hands out a real one
pub const DEFAULT_CSRF_TOKEN: &str = "1234";

const CSRF_COOKIE: &str = "csrftoken";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries
    pub max_retries: u32,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(60),
            backoff_type: BackoffType::Exponential,
            rate_limit: Some(RateLimiterConfig::default()),
            default_headers: HashMap::new(),
            user_agent: format!("pinbot/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set backoff configuration
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.backoff_type = backoff_type;
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: Vec<(String, String)>,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Form-encoded body
    pub form: Option<Vec<(String, String)>>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
    /// Override max retries for this request
    pub max_retries: Option<u32>,
    /// Hand 4xx responses back instead of failing (the API puts error
    /// envelopes in them)
    pub accept_client_errors: bool,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a form field
    #[must_use]
    pub fn form_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form
            .get_or_insert_with(Vec::new)
            .push((key.into(), value.into()));
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set max retries
    #[must_use]
    pub fn retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Return 4xx responses to the caller
    #[must_use]
    pub fn accept_client_errors(mut self) -> Self {
        self.accept_client_errors = true;
        self
    }
}

/// HTTP client with retry, rate limiting and session cookies
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    base_url: Url,
    cookies: Arc<Jar>,
    csrf_token: RwLock<String>,
    current_url: RwLock<Option<Url>>,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let cookies = Arc::new(Jar::default());

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .cookie_provider(Arc::clone(&cookies))
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            base_url,
            cookies,
            csrf_token: RwLock::new(DEFAULT_CSRF_TOKEN.to_string()),
            current_url: RwLock::new(None),
            rate_limiter,
        })
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// The API host every relative path is resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Final URL of the most recent response (after redirects)
    pub async fn current_url(&self) -> Option<Url> {
        self.current_url.read().await.clone()
    }

    /// CSRF token sent with the next request.
    ///
    /// The `csrftoken` cookie wins once the server has set one.
    pub async fn csrf_token(&self) -> String {
        if let Some(token) = self.cookie(CSRF_COOKIE) {
            return token;
        }
        self.csrf_token.read().await.clone()
    }

    /// Reset the CSRF token to its default value
    pub async fn clear_token(&self) {
        *self.csrf_token.write().await = DEFAULT_CSRF_TOKEN.to_string();
        self.cookies.add_cookie_str(
            &format!("{CSRF_COOKIE}={DEFAULT_CSRF_TOKEN}; Path=/"),
            &self.base_url,
        );
        debug!("CSRF token reset to default");
    }

    /// Read a cookie set for the API host
    pub fn cookie(&self, name: &str) -> Option<String> {
        let header = self.cookies.cookies(&self.base_url)?;
        let header = header.to_str().ok()?;
        header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.to_string())
    }

    /// Make a GET request
    pub async fn get(&self, url: &str) -> Result<Response> {
        self.request(Method::GET, url, RequestConfig::default())
            .await
    }

    /// GET a page and return its body as text
    pub async fn visit(&self, url: &str) -> Result<String> {
        let response = self
            .request(Method::GET, url, RequestConfig::new().accept_client_errors())
            .await?;
        Ok(response.text().await?)
    }

    /// Download a file, returning its bytes
    pub async fn download(&self, url: &str) -> Result<bytes::Bytes> {
        let response = self.get(url).await?;
        Ok(response.bytes().await?)
    }

    /// Make a generic request
    #[allow(clippy::too_many_lines)]
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
    ) -> Result<Response> {
        let full_url = self.build_url(url);
        let max_retries = config.max_retries.unwrap_or(self.config.max_retries);
        let timeout = config.timeout.unwrap_or(self.config.timeout);

        let mut last_error = None;
        let mut attempt = 0;

        while attempt <= max_retries {
            // Wait for rate limiter
            if let Some(ref limiter) = self.rate_limiter {
                limiter.wait().await;
            }

            let mut req = self.prepare(method.clone(), &full_url).await;

            // Add request-specific headers
            for (key, value) in &config.headers {
                req = req.header(key.as_str(), value.as_str());
            }

            // Add query parameters
            if !config.query.is_empty() {
                req = req.query(&config.query);
            }

            // Add body
            if let Some(ref form) = config.form {
                req = req.form(form);
            }

            req = req.timeout(timeout);

            match req.send().await {
                Ok(response) => {
                    let status = response.status();

                    // Check for rate limiting
                    if status == StatusCode::TOO_MANY_REQUESTS {
                        let retry_after = extract_retry_after(&response);
                        if attempt < max_retries {
                            warn!(
                                "Rate limited (429), attempt {}/{}, waiting {}s",
                                attempt + 1,
                                max_retries + 1,
                                retry_after
                            );
                            tokio::time::sleep(Duration::from_secs(retry_after)).await;
                            attempt += 1;
                            continue;
                        }
                        return Err(Error::RateLimited {
                            retry_after_seconds: retry_after,
                        });
                    }

                    // Check for retryable server errors
                    if is_retryable_status(status) && attempt < max_retries {
                        let delay = self.calculate_backoff(attempt);
                        warn!(
                            "Request failed with {}, attempt {}/{}, retrying in {:?}",
                            status.as_u16(),
                            attempt + 1,
                            max_retries + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        last_error = Some(Error::HttpStatus {
                            status: status.as_u16(),
                            body: String::new(),
                        });
                        continue;
                    }

                    // Client errors are final; resource calls still want the body
                    if status.is_client_error() && !config.accept_client_errors {
                        let body = response.text().await.unwrap_or_default();
                        return Err(Error::HttpStatus {
                            status: status.as_u16(),
                            body,
                        });
                    }

                    // Check for server errors (after retries exhausted)
                    if status.is_server_error() {
                        let body = response.text().await.unwrap_or_default();
                        return Err(Error::HttpStatus {
                            status: status.as_u16(),
                            body,
                        });
                    }

                    debug!("Request finished: {} {} -> {}", method, full_url, status);
                    *self.current_url.write().await = Some(response.url().clone());
                    return Ok(response);
                }
                Err(e) => {
                    if e.is_timeout() {
                        if attempt < max_retries {
                            let delay = self.calculate_backoff(attempt);
                            warn!(
                                "Request timeout, attempt {}/{}, retrying in {:?}",
                                attempt + 1,
                                max_retries + 1,
                                delay
                            );
                            tokio::time::sleep(delay).await;
                            attempt += 1;
                            last_error = Some(Error::Timeout {
                                timeout_ms: timeout.as_millis() as u64,
                            });
                            continue;
                        }
                        return Err(Error::Timeout {
                            timeout_ms: timeout.as_millis() as u64,
                        });
                    }

                    if e.is_connect() && attempt < max_retries {
                        let delay = self.calculate_backoff(attempt);
                        warn!(
                            "Connection error, attempt {}/{}, retrying in {:?}",
                            attempt + 1,
                            max_retries + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        last_error = Some(Error::Http(e));
                        continue;
                    }

                    return Err(Error::Http(e));
                }
            }
        }

        // Exhausted all retries
        Err(last_error.unwrap_or(Error::MaxRetriesExceeded { max_retries }))
    }

    /// Start a request carrying the default and CSRF headers.
    ///
    /// Session headers only go to the API origin; other hosts (image CDNs)
    /// get a bare request.
    pub(crate) async fn prepare(&self, method: Method, full_url: &str) -> RequestBuilder {
        let mut req = self.client.request(method, full_url);
        if !self.is_api_origin(full_url) {
            return req;
        }

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        req.header("X-CSRFToken", self.csrf_token().await)
            .header("X-Requested-With", "XMLHttpRequest")
            .header("Referer", format!("{}/", self.base_url_str()))
            .header("Accept", "application/json, text/javascript, */*; q=0.01")
    }

    /// Remember where the last response came from
    pub(crate) async fn set_current_url(&self, url: Url) {
        *self.current_url.write().await = Some(url);
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Wait for a rate limiter permit, if limiting is enabled
    pub(crate) async fn throttle(&self) {
        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }
    }

    /// Whether `full_url` shares scheme, host and port with the base URL
    pub(crate) fn is_api_origin(&self, full_url: &str) -> bool {
        Url::parse(full_url).is_ok_and(|url| url.origin() == self.base_url.origin())
    }

    fn base_url_str(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// Build full URL from path
    pub(crate) fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let path = path.trim_start_matches('/');
        format!("{}/{path}", self.base_url_str())
    }

    /// Calculate backoff delay for a given attempt
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let delay = match self.config.backoff_type {
            BackoffType::Constant => self.config.initial_backoff,
            BackoffType::Linear => self.config.initial_backoff * (attempt + 1),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.config.initial_backoff * factor
            }
        };

        std::cmp::min(delay, self.config.max_backoff)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Check if an HTTP status is retryable
fn is_retryable_status(status: StatusCode) -> bool {
    matches!(
        status.as_u16(),
        429 | 500 | 502 | 503 | 504 | 520 | 521 | 522 | 523 | 524
    )
}

/// Extract retry-after header value
fn extract_retry_after(response: &Response) -> u64 {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
        .unwrap_or(60)
}
