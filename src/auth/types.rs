//! Credentials and session state

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Account credentials used to log in
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Username or e-mail
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields are filled in
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
struct SessionInfo {
    username: Option<String>,
    logged_in_at: Option<DateTime<Utc>>,
}

/// Login state shared by every provider
#[derive(Debug, Default)]
pub struct Session {
    logged_in: AtomicBool,
    info: RwLock<SessionInfo>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in.load(Ordering::SeqCst)
    }

    /// Fail with [`Error::LoginRequired`] unless logged in
    pub fn require(&self, operation: &str) -> Result<()> {
        if self.is_logged_in() {
            Ok(())
        } else {
            Err(Error::login_required(operation))
        }
    }

    /// Username the session was opened with
    pub async fn username(&self) -> Option<String> {
        self.info.read().await.username.clone()
    }

    /// When the session was opened
    pub async fn logged_in_at(&self) -> Option<DateTime<Utc>> {
        self.info.read().await.logged_in_at
    }

    pub async fn mark_logged_in(&self, username: impl Into<String>) {
        let mut info = self.info.write().await;
        info.username = Some(username.into());
        info.logged_in_at = Some(Utc::now());
        self.logged_in.store(true, Ordering::SeqCst);
    }

    pub async fn clear(&self) {
        self.logged_in.store(false, Ordering::SeqCst);
        *self.info.write().await = SessionInfo::default();
    }
}
