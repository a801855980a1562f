//! Lazy bookmark-driven feed
//!
//! A [`PaginatedFeed`] is built by a provider method and does nothing until
//! it is consumed. Each pull that drains the buffered page triggers exactly
//! one fetch; the next request is only built after every item of the
//! previous page has been considered.

use super::types::{FeedConfig, FeedState, ItemFilter, PageFetcher};
use crate::error::{Error, Result};
use crate::types::{JsonValue, Params};
use futures::stream::{self, BoxStream, StreamExt};
use std::collections::VecDeque;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Forward-only sequence of items over bookmark-paginated pages
pub struct PaginatedFeed<'a> {
    fetcher: Option<Box<dyn PageFetcher + 'a>>,
    params: Params,
    config: FeedConfig,
    filter: Option<ItemFilter<'a>>,
    cancel: Option<CancellationToken>,
}

impl<'a> PaginatedFeed<'a> {
    /// Create a feed over `fetcher`, starting from `params`
    pub fn new(fetcher: impl PageFetcher + 'a, params: Params) -> Self {
        Self {
            fetcher: Some(Box::new(fetcher)),
            params,
            config: FeedConfig::default(),
            filter: None,
            cancel: None,
        }
    }

    /// A feed that yields nothing and never fetches
    pub fn empty() -> Self {
        Self {
            fetcher: None,
            params: Params::new(),
            config: FeedConfig::default(),
            filter: None,
            cancel: None,
        }
    }

    /// Replace the pagination config (cursor field, end marker, limit)
    #[must_use]
    pub fn with_config(mut self, config: FeedConfig) -> Self {
        self.config = config;
        self
    }

    /// Yield at most `limit` items (0 = unbounded)
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.config.limit = limit;
        self
    }

    /// Stop at the first item `predicate` rejects.
    ///
    /// The rejected item is not yielded and the rest of its page is dropped.
    #[must_use]
    pub fn take_while(mut self, predicate: impl Fn(&JsonValue) -> bool + Send + Sync + 'a) -> Self {
        self.filter = Some(Box::new(predicate));
        self
    }

    /// Check `token` before every page fetch
    #[must_use]
    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Base parameters sent with every request
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The pagination config in effect
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Consume the feed as a stream of items.
    ///
    /// A transport error is yielded once and ends the stream; items yielded
    /// before it remain valid. Cancellation yields [`Error::Cancelled`] once.
    pub fn into_stream(self) -> BoxStream<'a, Result<JsonValue>> {
        let Some(fetcher) = self.fetcher else {
            return stream::empty().boxed();
        };

        let cursor = Cursor {
            fetcher,
            params: self.params,
            config: self.config,
            filter: self.filter,
            cancel: self.cancel,
            state: FeedState::new(),
            buffer: VecDeque::new(),
        };

        stream::unfold(cursor, |mut cursor| async move {
            let item = cursor.next_item().await?;
            Some((item, cursor))
        })
        .boxed()
    }

    /// Drain the feed into a vec.
    ///
    /// Any error discards the items collected so far.
    pub async fn collect_all(self) -> Result<Vec<JsonValue>> {
        let mut stream = self.into_stream();
        let mut items = Vec::new();
        while let Some(item) = stream.next().await {
            items.push(item?);
        }
        Ok(items)
    }
}

impl std::fmt::Debug for PaginatedFeed<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedFeed")
            .field("params", &self.params)
            .field("config", &self.config)
            .field("has_fetcher", &self.fetcher.is_some())
            .field("has_filter", &self.filter.is_some())
            .finish_non_exhaustive()
    }
}

struct Cursor<'a> {
    fetcher: Box<dyn PageFetcher + 'a>,
    params: Params,
    config: FeedConfig,
    filter: Option<ItemFilter<'a>>,
    cancel: Option<CancellationToken>,
    state: FeedState,
    buffer: VecDeque<JsonValue>,
}

impl Cursor<'_> {
    async fn next_item(&mut self) -> Option<Result<JsonValue>> {
        loop {
            if self.state.done {
                return None;
            }

            if let Some(item) = self.buffer.pop_front() {
                return self.accept(item);
            }

            if self.state.last_page {
                self.state.mark_done();
                return None;
            }

            if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
                debug!(pages = self.state.pages, "feed cancelled");
                self.state.mark_done();
                return Some(Err(Error::Cancelled));
            }

            if let Err(e) = self.fetch_next_page().await {
                self.state.mark_done();
                return Some(Err(e));
            }
        }
    }

    fn accept(&mut self, item: JsonValue) -> Option<Result<JsonValue>> {
        if let Some(filter) = &self.filter {
            if !filter(&item) {
                debug!(yielded = self.state.yielded, "feed stopped by item filter");
                self.state.mark_done();
                self.buffer.clear();
                return None;
            }
        }

        self.state.yielded += 1;
        if self.config.limit_reached(self.state.yielded) {
            self.state.mark_done();
        }
        Some(Ok(item))
    }

    async fn fetch_next_page(&mut self) -> Result<()> {
        let params = self.state.request_params(&self.params, &self.config);
        let response = self.fetcher.fetch_page(params).await?;

        let items = response.response_data();
        let next_bookmark = response.next_bookmark(&self.config.end_marker);
        self.state.advance(next_bookmark);

        debug!(
            page = self.state.pages,
            items = items.len(),
            has_next = !self.state.last_page,
            "fetched feed page"
        );

        if items.is_empty() {
            self.state.mark_done();
        }
        self.buffer.extend(items);
        Ok(())
    }
}
