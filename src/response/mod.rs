//! Response envelope module
//!
//! Wraps decoded JSON bodies returned by resource endpoints.
//!
//! # Overview
//!
//! The API answers with two shapes: a flat listing
//! (`resource_response.data` plus a bookmark under `resource.options`) and a
//! nested search tree (`module.tree.data.results` plus
//! `module.tree.resource.options.bookmarks`). [`Response`] hides the
//! difference: lookups never fail, the payload is always a list, and the
//! nested tree wins when both are present.

mod envelope;
pub mod path;

pub use envelope::Response;
pub use path::get_path;
