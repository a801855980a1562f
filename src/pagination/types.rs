//! Pagination types and traits
//!
//! Defines the fetch seam and configuration used by [`super::PaginatedFeed`].

use crate::error::Result;
use crate::response::Response;
use crate::types::{JsonValue, Params};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Default item limit for feeds (0 = unbounded)
pub const DEFAULT_LIMIT: usize = 0;

/// Bookmark value the API historically returns on the last page
pub const DEFAULT_END_MARKER: &str = "-end-";

/// Option key the bookmark is echoed back under
pub const DEFAULT_CURSOR_FIELD: &str = "bookmarks";

/// Predicate deciding whether the scan continues past an item
pub type ItemFilter<'a> = Box<dyn Fn(&JsonValue) -> bool + Send + Sync + 'a>;

/// Fetches one page of a feed.
///
/// Each call performs exactly one request. Transport failures are returned
/// as errors and end the feed.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page described by `params`
    async fn fetch_page(&self, params: Params) -> Result<Response>;
}

#[async_trait]
impl<F, Fut> PageFetcher for F
where
    F: Fn(Params) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response>> + Send,
{
    async fn fetch_page(&self, params: Params) -> Result<Response> {
        self(params).await
    }
}

/// Configuration for bookmark pagination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Option key carrying the bookmark (sent as a one-element list)
    pub cursor_field: String,
    /// Bookmark value that means "no more pages"
    pub end_marker: String,
    /// Maximum number of items to yield (0 = unbounded)
    pub limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            cursor_field: DEFAULT_CURSOR_FIELD.to_string(),
            end_marker: DEFAULT_END_MARKER.to_string(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl FeedConfig {
    /// Create a config with the default cursor field and end marker
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the item limit
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Set the end marker
    #[must_use]
    pub fn with_end_marker(mut self, marker: impl Into<String>) -> Self {
        self.end_marker = marker.into();
        self
    }

    /// Set the cursor field
    #[must_use]
    pub fn with_cursor_field(mut self, field: impl Into<String>) -> Self {
        self.cursor_field = field.into();
        self
    }

    /// Whether `count` items reach the limit
    pub fn limit_reached(&self, count: usize) -> bool {
        self.limit > 0 && count >= self.limit
    }
}

/// Tracks cursor state while a feed is consumed
#[derive(Debug, Clone, Default)]
pub struct FeedState {
    /// Bookmark for the next request; `None` before the first page
    pub bookmark: Option<String>,
    /// Items yielded so far
    pub yielded: usize,
    /// Pages fetched so far
    pub pages: usize,
    /// The last fetched page was the final one
    pub last_page: bool,
    /// Nothing more will be yielded
    pub done: bool,
}

impl FeedState {
    /// Create a fresh state
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the parameters for the next request
    pub fn request_params(&self, base: &Params, config: &FeedConfig) -> Params {
        let mut params = base.clone();
        if let Some(bookmark) = &self.bookmark {
            params.insert(
                config.cursor_field.clone(),
                JsonValue::Array(vec![JsonValue::String(bookmark.clone())]),
            );
        }
        params
    }

    /// Record a fetched page and the bookmark it carried
    pub fn advance(&mut self, next_bookmark: Option<String>) {
        self.pages += 1;
        self.last_page = next_bookmark.is_none();
        self.bookmark = next_bookmark;
    }

    /// Mark the feed as finished
    pub fn mark_done(&mut self) {
        self.done = true;
    }
}
