//! HTTP transport
//!
//! Provides the HTTP client every provider talks through.
//!
//! # Features
//!
//! - **Automatic Retries**: Configurable retry logic with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Session Cookies**: Cookie jar plus the `X-CSRFToken` header
//! - **Resource Calls**: The `options`/`context` payload wrapped for GET and POST

mod client;
mod rate_limit;
mod resource;

pub use client::{
    HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig, DEFAULT_BASE_URL,
    DEFAULT_CSRF_TOKEN,
};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use resource::{resource_payload, ResourceFetcher};
