//! User provider

use super::capabilities::UploadsImages;
use super::{ApiContext, Provider};
use crate::error::{Error, Result};
use crate::resources;
use crate::types::{params, JsonValue, Params};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;

const ACCOUNT_TYPE_OTHER: &str = "other";

#[derive(Debug, Clone)]
pub struct User {
    ctx: Arc<ApiContext>,
}

impl Provider for User {
    fn context(&self) -> &ApiContext {
        &self.ctx
    }
}

impl UploadsImages for User {}

impl User {
    pub fn new(ctx: Arc<ApiContext>) -> Self {
        Self { ctx }
    }

    /// Settings of the logged-in account
    pub async fn profile(&self) -> Result<Option<JsonValue>> {
        self.require_auth("profile")?;
        self.ctx
            .get_data(resources::GET_USER_SETTINGS, &Params::new())
            .await
    }

    /// Update profile fields (`first_name`, `about`, `website_url`, ...).
    ///
    /// A `profile_image` entry holding a local path is uploaded and sent as
    /// `profile_image_url`.
    pub async fn update_profile(&self, mut settings: Params) -> Result<bool> {
        self.require_auth("update_profile")?;

        if let Some(image) = settings.remove("profile_image") {
            let Some(path) = image.as_str() else {
                return Err(Error::invalid_argument(format!(
                    "profile_image must be a file path, got {image}"
                )));
            };
            let url = self.upload(Path::new(path)).await?;
            settings.insert("profile_image_url".to_string(), json!(url));
        }

        self.ctx
            .post(resources::UPDATE_USER_SETTINGS, &settings)
            .await
    }

    pub async fn convert_to_business(&self, business_name: &str, website_url: &str) -> Result<bool> {
        self.require_auth("convert_to_business")?;

        let request = params([
            ("business_name", json!(business_name)),
            ("website_url", json!(website_url)),
            ("account_type", json!(ACCOUNT_TYPE_OTHER)),
        ]);
        self.ctx
            .post(resources::CONVERT_TO_BUSINESS, &request)
            .await
    }

    /// Whether the account is banned from writing
    pub async fn is_banned(&self) -> Result<bool> {
        self.require_auth("is_banned")?;
        let banned = self
            .profile_field("is_write_banned")
            .await?
            .is_some_and(|value| is_truthy(&value));
        Ok(banned)
    }

    pub async fn username(&self) -> Result<Option<String>> {
        self.require_auth("username")?;
        Ok(self
            .profile_field("username")
            .await?
            .and_then(|value| value.as_str().map(str::to_string)))
    }

    /// Deactivate the account. Returns `false` when the profile has no id.
    pub async fn deactivate(&self, reason: &str, explanation: &str) -> Result<bool> {
        self.require_auth("deactivate")?;

        let Some(user_id) = self.profile_field("id").await? else {
            return Ok(false);
        };

        let request = params([
            ("user_id", user_id),
            ("reason", json!(reason)),
            ("explanation", json!(explanation)),
        ]);
        self.ctx
            .post(resources::DEACTIVATE_ACCOUNT, &request)
            .await
    }

    pub async fn invite(&self, email: &str) -> Result<bool> {
        self.require_auth("invite")?;
        let request = params([("email", json!(email)), ("type", json!("email"))]);
        self.ctx.post(resources::INVITE, &request).await
    }

    async fn profile_field(&self, field: &str) -> Result<Option<JsonValue>> {
        Ok(self
            .profile()
            .await?
            .and_then(|mut profile| profile.get_mut(field).map(JsonValue::take))
            .filter(|value| !value.is_null()))
    }
}

/// Loose truthiness the settings endpoint relies on: `1`, `"1"` and `true`
/// all mean set
fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(flag) => *flag,
        JsonValue::Number(number) => number.as_f64().is_some_and(|n| n.abs() > 0.0),
        JsonValue::String(text) => !text.is_empty() && text != "0",
        JsonValue::Array(items) => !items.is_empty(),
        JsonValue::Object(_) => true,
    }
}
