// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # pinbot
//!
//! An async client for Pinterest's private web API.
//!
//! ## Features
//!
//! - **Session Login**: Cookie and CSRF handling the web app expects
//! - **Lazy Feeds**: Bookmark-paginated streams with limits, predicates and cancellation
//! - **Providers**: Pins, boards, user settings and password flows
//! - **Safe Envelopes**: Path lookups over responses that never fail
//! - **Polite Transport**: Retries with backoff and client-side rate limiting
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use pinbot::{Bot, BotConfig, Credentials, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let bot = Bot::new(BotConfig::default())?;
//!     bot.login_with(&Credentials::new("alice@example.com", "secret")).await?;
//!
//!     // Anything that paginates is a lazy stream
//!     let pins = bot.pins();
//!     let mut related = pins.related("1234567890", 50).into_stream();
//!     while let Some(pin) = related.next().await {
//!         println!("{}", pin?["id"]);
//!     }
//!
//!     pins.like("1234567890").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                             Bot                              │
//! │        login()  logout()  pins()  boards()  user() ...       │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬─────────────┬─────┴──────┬─────────────┬──────────┐
//! │   Auth   │  Providers  │  Paginate  │  Response   │   HTTP   │
//! ├──────────┼─────────────┼────────────┼─────────────┼──────────┤
//! │ Session  │ Pins        │ Bookmarks  │ Path lookup │ Cookies  │
//! │ Login    │ Boards      │ Limit      │ Payload     │ CSRF     │
//! │ Logout   │ User        │ Predicate  │ Error marks │ Retry    │
//! │          │ Password    │ Cancel     │             │ Throttle │
//! └──────────┴─────────────┴────────────┴─────────────┴──────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for pinbot
pub mod error;

/// Common types and type aliases
pub mod types;

/// Resource endpoint paths
pub mod resources;

/// Response envelope and path lookups
pub mod response;

/// Bookmark-driven feeds
pub mod pagination;

/// HTTP client with retry, rate limiting and session cookies
pub mod http;

/// Credentials, session state and login
pub mod auth;

/// Pins, boards, user and password providers
pub mod providers;

/// YAML configuration
pub mod config;

/// Bot entry point
pub mod bot;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use auth::Credentials;
pub use bot::Bot;
pub use config::BotConfig;
pub use error::{Error, Result};
pub use pagination::{FeedConfig, PaginatedFeed};
pub use response::Response;
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
