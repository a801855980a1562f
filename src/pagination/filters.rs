//! Date-bounded item predicates for [`super::PaginatedFeed::take_while`]
//!
//! Items carry `created_at` as an RFC 2822 date
//! (`Tue, 08 Mar 2016 11:23:45 +0000`); RFC 3339 is accepted as well.
//! Items without a readable date never stop the feed.

use crate::types::JsonValue;
use chrono::{DateTime, Utc};

/// Parse the `created_at` field of an item
pub fn created_at(item: &JsonValue) -> Option<DateTime<Utc>> {
    let raw = item.get("created_at")?.as_str()?;
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

/// Continue while items were created strictly before `cutoff`
pub fn created_before(cutoff: DateTime<Utc>) -> impl Fn(&JsonValue) -> bool + Send + Sync {
    move |item| created_at(item).map_or(true, |date| date < cutoff)
}

/// Continue while items were created strictly after `cutoff`.
///
/// Feeds are newest first, so this stops at the first item older than the
/// cutoff.
pub fn created_after(cutoff: DateTime<Utc>) -> impl Fn(&JsonValue) -> bool + Send + Sync {
    move |item| created_at(item).map_or(true, |date| date > cutoff)
}
