//! Login and logout
//!
//! Logging in is a two-step exchange: the login page hands out the
//! `csrftoken` cookie, then the session resource is posted with the
//! credentials. The cookie jar keeps the session cookie from then on.

use super::types::{Credentials, Session};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::resources;
use crate::types::{params, Params};
use serde_json::json;
use tracing::{info, warn};

/// Opens and closes sessions against the API
#[derive(Debug, Clone, Copy, Default)]
pub struct Authenticator;

impl Authenticator {
    pub fn new() -> Self {
        Self
    }

    /// Log in with `credentials`.
    ///
    /// Returns `Ok(false)` when the API rejects the credentials; transport
    /// failures are errors.
    pub async fn login(
        &self,
        client: &HttpClient,
        session: &Session,
        credentials: &Credentials,
    ) -> Result<bool> {
        if session.is_logged_in() {
            return Ok(true);
        }

        if !credentials.is_complete() {
            return Err(Error::auth("username and password are required"));
        }

        client.visit(resources::LOGIN_PAGE).await?;

        let request = params([
            ("username_or_email", json!(credentials.username)),
            ("password", json!(credentials.password)),
        ]);
        let response = client.resource_post(resources::LOGIN, &request).await?;

        if !response.is_ok() {
            warn!(
                username = %credentials.username,
                error = %response.error_message().unwrap_or_default(),
                "login rejected"
            );
            return Ok(false);
        }

        session.mark_logged_in(&credentials.username).await;
        info!(username = %credentials.username, "logged in");
        Ok(true)
    }

    /// Close the session and forget the CSRF token
    pub async fn logout(&self, client: &HttpClient, session: &Session) -> Result<bool> {
        if !session.is_logged_in() {
            return Ok(false);
        }

        let response = client
            .resource_post(resources::LOGOUT, &Params::new())
            .await?;

        session.clear().await;
        client.clear_token().await;
        info!("logged out");
        Ok(response.is_ok())
    }
}
