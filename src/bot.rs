//! Entry point tying the transport, session and providers together

use crate::auth::{Authenticator, Credentials};
use crate::config::BotConfig;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::providers::{ApiContext, Boards, Password, Pins, User};
use std::sync::Arc;

/// A logged-in (or anonymous) client of the API.
///
/// Providers handed out by a bot share its session: logging in once
/// unlocks the gated operations on all of them.
///
/// ```no_run
/// # async fn run() -> pinbot::Result<()> {
/// use pinbot::{Bot, BotConfig};
///
/// let bot = Bot::new(BotConfig::default().apply_env())?;
/// bot.login().await?;
/// let feed = bot.pins().feed(20)?.collect_all().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bot {
    ctx: Arc<ApiContext>,
    credentials: Credentials,
    authenticator: Authenticator,
}

impl Bot {
    pub fn new(config: BotConfig) -> Result<Self> {
        config.validate()?;
        let client = HttpClient::with_config(config.http_client_config())?;

        Ok(Self {
            ctx: Arc::new(ApiContext::new(client, config.feed)),
            credentials: config.credentials,
            authenticator: Authenticator::new(),
        })
    }

    /// Log in with the configured credentials
    pub async fn login(&self) -> Result<bool> {
        if !self.credentials.is_complete() {
            return Err(Error::missing_field("credentials"));
        }
        self.login_with(&self.credentials).await
    }

    pub async fn login_with(&self, credentials: &Credentials) -> Result<bool> {
        self.authenticator
            .login(&self.ctx.client, &self.ctx.session, credentials)
            .await
    }

    pub async fn logout(&self) -> Result<bool> {
        self.authenticator
            .logout(&self.ctx.client, &self.ctx.session)
            .await
    }

    pub fn is_logged_in(&self) -> bool {
        self.ctx.session.is_logged_in()
    }

    pub fn pins(&self) -> Pins {
        Pins::new(Arc::clone(&self.ctx))
    }

    pub fn user(&self) -> User {
        User::new(Arc::clone(&self.ctx))
    }

    pub fn password(&self) -> Password {
        Password::new(Arc::clone(&self.ctx))
    }

    pub fn boards(&self) -> Boards {
        Boards::new(Arc::clone(&self.ctx))
    }

    /// The underlying transport
    pub fn client(&self) -> &HttpClient {
        &self.ctx.client
    }
}
