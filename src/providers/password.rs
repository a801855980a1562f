//! Password provider

use super::{ApiContext, Provider};
use crate::error::Result;
use crate::resources;
use crate::types::params;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

#[derive(Debug, Clone)]
pub struct Password {
    ctx: Arc<ApiContext>,
}

impl Provider for Password {
    fn context(&self) -> &ApiContext {
        &self.ctx
    }
}

/// What the reset page's final URL tells us
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetToken {
    pub username: String,
    pub token: String,
    pub expiration: String,
}

impl ResetToken {
    /// Read the username from the path (`/pw/<username>/`) and the token
    /// and expiration from the `t` and `e` query parameters
    pub fn from_url(url: &Url) -> Option<Self> {
        let username = url.path().replace("/pw/", "").trim_matches('/').to_string();
        let query_value = |key: &str| {
            url.query_pairs()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.into_owned())
        };

        Some(Self {
            username,
            token: query_value("t")?,
            expiration: query_value("e")?,
        })
    }
}

impl Password {
    pub fn new(ctx: Arc<ApiContext>) -> Self {
        Self { ctx }
    }

    /// Ask for a reset link by e-mail
    pub async fn send_reset_link(&self, username_or_email: &str) -> Result<bool> {
        let request = params([("username_or_email", json!(username_or_email))]);
        self.ctx
            .post(resources::RESET_PASSWORD_SEND_LINK, &request)
            .await
    }

    /// Set a new password using the link from the reset e-mail.
    ///
    /// The link redirects to a page whose URL carries the token; without
    /// one nothing is posted and `false` is returned.
    pub async fn reset(&self, link: &str, new_password: &str) -> Result<bool> {
        let client = &self.ctx.client;
        client.visit(link).await?;
        client.clear_token().await;

        let Some(reset) = client
            .current_url()
            .await
            .as_ref()
            .and_then(ResetToken::from_url)
        else {
            warn!("reset link did not lead to a page with a token");
            return Ok(false);
        };
        debug!(username = %reset.username, "resetting password");

        let request = params([
            ("username", json!(reset.username)),
            ("new_password", json!(new_password)),
            ("new_password_confirm", json!(new_password)),
            ("token", json!(reset.token)),
            ("expiration", json!(reset.expiration)),
        ]);
        self.ctx
            .post(resources::RESET_PASSWORD_UPDATE, &request)
            .await
    }

    pub async fn change(&self, old_password: &str, new_password: &str) -> Result<bool> {
        self.require_auth("change")?;

        let request = params([
            ("old_password", json!(old_password)),
            ("new_password", json!(new_password)),
            ("new_password_confirm", json!(new_password)),
        ]);
        self.ctx.post(resources::CHANGE_PASSWORD, &request).await
    }
}
