//! The response envelope

use super::path::{get_path, get_path_or};
use crate::error::Result;
use serde_json::Value;

/// Search endpoints nest their results under the module tree.
const SEARCH_RESULTS_PATH: &str = "module.tree.data.results";
const SEARCH_BOOKMARKS_PATH: &str = "module.tree.resource.options.bookmarks";

/// Flat listing locations, most specific first.
const DATA_PATHS: [&str; 2] = ["resource_response.data", "data"];
const BOOKMARK_LIST_PATH: &str = "resource.options.bookmarks";
const BOOKMARK_PATHS: [&str; 2] = ["resource_response.bookmark", "bookmark"];

const ERROR_PATHS: [&str; 2] = ["resource_response.error", "error"];

/// A decoded API response.
///
/// Read-only view over the JSON tree. Absent fields degrade to defaults:
/// an empty payload, no bookmark, no data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    raw: Value,
}

impl Response {
    /// Wrap an already decoded JSON tree
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// Decode a response body
    pub fn from_body(body: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(body)?))
    }

    /// The underlying JSON tree
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Consume the envelope, returning the JSON tree
    pub fn into_raw(self) -> Value {
        self.raw
    }

    /// Look up a dot-separated path
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        get_path(&self.raw, path)
    }

    /// Look up a dot-separated path, returning `default` when it is absent
    pub fn get_data(&self, path: &str, default: Value) -> Value {
        get_path_or(&self.raw, path, default)
    }

    /// Look up a string at `path`
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get_path(path).and_then(Value::as_str)
    }

    /// Look up a boolean at `path`
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get_path(path).and_then(Value::as_bool)
    }

    /// True unless the tree carries an error marker
    pub fn is_ok(&self) -> bool {
        self.error().is_none()
    }

    /// Human-readable error from the envelope, if any
    pub fn error_message(&self) -> Option<String> {
        let error = self.error()?;
        let message = match error {
            Value::String(s) => s.clone(),
            other => other
                .get("message")
                .and_then(Value::as_str)
                .map_or_else(|| other.to_string(), String::from),
        };
        Some(message)
    }

    fn error(&self) -> Option<&Value> {
        ERROR_PATHS
            .iter()
            .filter_map(|path| self.get_path(path))
            .find(|v| !v.is_null())
    }

    /// Single-object payload for non-listing endpoints (pin info, settings)
    pub fn data(&self) -> Option<&Value> {
        DATA_PATHS
            .iter()
            .filter_map(|path| self.get_path(path))
            .find(|v| !v.is_null())
    }

    /// The list of items this response carries.
    ///
    /// Nested search results win over the flat listing. A location only
    /// counts when it holds a non-empty array.
    pub fn response_data(&self) -> Vec<Value> {
        std::iter::once(SEARCH_RESULTS_PATH)
            .chain(DATA_PATHS)
            .filter_map(|path| self.get_path(path).and_then(Value::as_array))
            .find(|items| !items.is_empty())
            .cloned()
            .unwrap_or_default()
    }

    /// True iff [`Response::response_data`] is empty
    pub fn is_empty(&self) -> bool {
        self.response_data().is_empty()
    }

    /// Pagination cursor, wrapped in a vec of at most one element
    pub fn bookmarks(&self) -> Vec<String> {
        let from_list = [SEARCH_BOOKMARKS_PATH, BOOKMARK_LIST_PATH]
            .into_iter()
            .filter_map(|path| self.get_path(path).and_then(Value::as_array))
            .find_map(|list| list.first().and_then(Value::as_str));

        let bookmark = from_list.or_else(|| {
            BOOKMARK_PATHS
                .into_iter()
                .find_map(|path| self.get_str(path))
        });

        bookmark
            .filter(|b| !b.is_empty())
            .map(|b| vec![b.to_string()])
            .unwrap_or_default()
    }

    /// Cursor for the next page, or `None` when the server signalled the end
    pub fn next_bookmark(&self, end_marker: &str) -> Option<String> {
        self.bookmarks()
            .into_iter()
            .next()
            .filter(|b| b != end_marker)
    }
}

impl From<Value> for Response {
    fn from(raw: Value) -> Self {
        Self::new(raw)
    }
}
