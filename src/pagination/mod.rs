//! Pagination module
//!
//! Bookmark-driven feeds over the API's resource endpoints.
//!
//! # Overview
//!
//! Listing endpoints return one page at a time together with an opaque
//! bookmark. Echoing the bookmark back fetches the next page. A
//! [`PaginatedFeed`] turns that into a lazy stream of items that stops when:
//!
//! - a page comes back empty,
//! - the bookmark is missing or equals the end marker,
//! - the item limit is reached,
//! - the item filter rejects an item,
//! - the cancellation token fires.

mod feed;
pub mod filters;
mod types;

pub use feed::PaginatedFeed;
pub use filters::{created_after, created_before};
pub use types::{
    FeedConfig, FeedState, ItemFilter, PageFetcher, DEFAULT_CURSOR_FIELD, DEFAULT_END_MARKER,
    DEFAULT_LIMIT,
};
