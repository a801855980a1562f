//! CLI module
//!
//! Command-line interface over the providers. Items are printed to stdout
//! as JSON lines; logs go to stderr.
//!
//! # Commands
//!
//! - `feed` - Home feed (login required)
//! - `pin` - A single pin
//! - `related` - Pins related to a pin
//! - `source` - Recent pins from a domain
//! - `search` - Search pins or boards
//! - `profile` - Profile of the logged-in user
//! - `reset-link` - Send a password reset link

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
