//! Capabilities shared by several providers

use super::Provider;
use crate::error::{Error, Result};
use crate::pagination::PaginatedFeed;
use crate::resources;
use crate::types::{params, Params};
use async_trait::async_trait;
use serde_json::json;
use std::path::Path;

/// Full-text search within one scope (`pins`, `boards`, ...)
pub trait Searchable: Provider {
    const SEARCH_SCOPE: &'static str;

    /// Lazy search results; `limit` 0 means unbounded
    fn search(&self, query: &str, limit: usize) -> PaginatedFeed<'_> {
        let request = params([
            ("scope", json!(Self::SEARCH_SCOPE)),
            ("query", json!(query)),
        ]);
        self.context().paginate(resources::SEARCH, request, limit)
    }
}

/// Entities removable by id
#[async_trait]
pub trait CanBeDeleted: Provider {
    const DELETE_RESOURCE: &'static str;
    /// Option key the id is sent under
    const ENTITY_ID_NAME: &'static str;

    async fn delete(&self, id: &str) -> Result<bool> {
        self.require_auth("delete")?;
        let request = params([(Self::ENTITY_ID_NAME, json!(id))]);
        self.context().post(Self::DELETE_RESOURCE, &request).await
    }
}

#[async_trait]
pub trait UploadsImages: Provider {
    /// Upload a local image and return its hosted URL
    async fn upload(&self, path: &Path) -> Result<String> {
        self.context().client.upload_image(path).await
    }
}

/// Direct messages to users and e-mail addresses
#[async_trait]
pub trait SendsMessages: Provider {
    fn build_message_data(&self, text: &str, pin_id: Option<&str>) -> Params {
        params([("text", json!(text)), ("pin", json!(pin_id))])
    }

    /// Send `data` to every recipient in one conversation.
    ///
    /// At least one user id or e-mail is required.
    async fn send_message(
        &self,
        user_ids: &[String],
        emails: &[String],
        mut data: Params,
    ) -> Result<bool> {
        if user_ids.is_empty() && emails.is_empty() {
            return Err(Error::invalid_argument(
                "you must specify user ids or emails to send a message",
            ));
        }

        data.insert("user_ids".to_string(), json!(user_ids));
        data.insert("emails".to_string(), json!(emails));
        self.context().post(resources::SEND_MESSAGE, &data).await
    }
}
