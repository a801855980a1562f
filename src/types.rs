//! Common types used throughout pinbot
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Request options sent to a resource endpoint.
///
/// Values are JSON because the API accepts nested options (crop boxes,
/// id lists, explicit nulls).
pub type Params = JsonObject;

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// Board Privacy
// ============================================================================

/// Visibility of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardPrivacy {
    #[default]
    Public,
    Secret,
}

impl BoardPrivacy {
    /// Wire value expected by the board resource
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardPrivacy::Public => "public",
            BoardPrivacy::Secret => "secret",
        }
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Build a [`Params`] map from key/value pairs.
///
/// ```
/// use pinbot::types::params;
/// use serde_json::json;
///
/// let p = params([("pin_id", json!("42"))]);
/// assert_eq!(p["pin_id"], "42");
/// ```
pub fn params<K, I>(pairs: I) -> Params
where
    K: Into<String>,
    I: IntoIterator<Item = (K, JsonValue)>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}
