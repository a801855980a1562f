//! Providers
//!
//! Each provider maps its methods onto single resource calls. They share one
//! [`ApiContext`] holding the transport, the session and the feed settings.
//!
//! Mutations return `true` when the API answered without an error marker.
//! Reads of a single object return `None` when the API had nothing to give.
//! Feeds are lazy [`PaginatedFeed`]s.

pub mod boards;
pub mod capabilities;
pub mod password;
pub mod pins;
pub mod user;

pub use boards::Boards;
pub use capabilities::{CanBeDeleted, Searchable, SendsMessages, UploadsImages};
pub use password::{Password, ResetToken};
pub use pins::{Crop, Pins};
pub use user::User;

use crate::auth::Session;
use crate::error::Result;
use crate::http::{HttpClient, ResourceFetcher};
use crate::pagination::{FeedConfig, PaginatedFeed};
use crate::response::Response;
use crate::types::{JsonValue, Params};
use tracing::debug;

/// State every provider works against
#[derive(Debug)]
pub struct ApiContext {
    pub client: HttpClient,
    pub session: Session,
    pub feed: FeedConfig,
}

impl ApiContext {
    pub fn new(client: HttpClient, feed: FeedConfig) -> Self {
        Self {
            client,
            session: Session::new(),
            feed,
        }
    }

    /// POST a mutation and report whether it succeeded
    pub async fn post(&self, resource: &str, params: &Params) -> Result<bool> {
        let response = self.client.resource_post(resource, params).await?;
        Ok(succeeded(resource, &response))
    }

    /// POST and return the object the API answered with
    pub async fn post_for_data(&self, resource: &str, params: &Params) -> Result<Option<JsonValue>> {
        let response = self.client.resource_post(resource, params).await?;
        Ok(object_of(resource, &response))
    }

    /// GET a single object
    pub async fn get_data(&self, resource: &str, params: &Params) -> Result<Option<JsonValue>> {
        let response = self.client.resource_get(resource, params).await?;
        Ok(object_of(resource, &response))
    }

    /// GET a list in one request, without paginating
    pub async fn get_list(&self, resource: &str, params: &Params) -> Result<Vec<JsonValue>> {
        let response = self.client.resource_get(resource, params).await?;
        if succeeded(resource, &response) {
            Ok(response.response_data())
        } else {
            Ok(Vec::new())
        }
    }

    /// Lazy feed over a GET resource
    pub fn paginate(
        &self,
        resource: &'static str,
        params: Params,
        limit: usize,
    ) -> PaginatedFeed<'_> {
        PaginatedFeed::new(ResourceFetcher::new(&self.client, resource), params)
            .with_config(self.feed.clone())
            .limit(limit)
    }
}

fn succeeded(resource: &str, response: &Response) -> bool {
    if let Some(error) = response.error_message() {
        debug!(resource, %error, "resource answered with an error");
        return false;
    }
    response.is_ok()
}

fn object_of(resource: &str, response: &Response) -> Option<JsonValue> {
    if succeeded(resource, response) {
        response.data().cloned()
    } else {
        None
    }
}

/// Common surface of every provider
pub trait Provider: Send + Sync {
    fn context(&self) -> &ApiContext;

    /// Fail unless the session is logged in
    fn require_auth(&self, operation: &str) -> Result<()> {
        self.context().session.require(operation)
    }
}

#[cfg(test)]
mod tests;
