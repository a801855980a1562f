//! Authentication module
//!
//! Holds the credentials, the shared [`Session`] flag that gates
//! login-only operations, and the [`Authenticator`] that opens and closes
//! sessions.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{Credentials, Session};
