//! Pins provider

use super::capabilities::{CanBeDeleted, Searchable, SendsMessages, UploadsImages};
use super::{ApiContext, Provider};
use crate::error::{Result, ResultExt};
use crate::pagination::PaginatedFeed;
use crate::resources;
use crate::response::get_path;
use crate::types::{params, JsonValue};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Region of a pin image used for visual search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub num_crop_actions: u32,
}

impl Default for Crop {
    fn default() -> Self {
        Self {
            x: 0.16,
            y: 0.16,
            w: 0.66,
            h: 0.66,
            num_crop_actions: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pins {
    ctx: Arc<ApiContext>,
}

impl Provider for Pins {
    fn context(&self) -> &ApiContext {
        &self.ctx
    }
}

impl Searchable for Pins {
    const SEARCH_SCOPE: &'static str = "pins";
}

impl CanBeDeleted for Pins {
    const DELETE_RESOURCE: &'static str = resources::DELETE_PIN;
    const ENTITY_ID_NAME: &'static str = "id";
}

impl UploadsImages for Pins {}

impl SendsMessages for Pins {}

impl Pins {
    pub fn new(ctx: Arc<ApiContext>) -> Self {
        Self { ctx }
    }

    pub async fn like(&self, pin_id: &str) -> Result<bool> {
        self.require_auth("like")?;
        self.like_call(pin_id, resources::LIKE_PIN).await
    }

    pub async fn unlike(&self, pin_id: &str) -> Result<bool> {
        self.require_auth("unlike")?;
        self.like_call(pin_id, resources::UNLIKE_PIN).await
    }

    async fn like_call(&self, pin_id: &str, resource: &str) -> Result<bool> {
        self.ctx
            .post(resource, &params([("pin_id", json!(pin_id))]))
            .await
    }

    /// Create a pin and return it.
    ///
    /// `image` is either an absolute URL or a local file, which is uploaded
    /// first. An empty `link` points the pin at the image itself.
    pub async fn create(
        &self,
        image: &str,
        board_id: &str,
        description: &str,
        link: &str,
    ) -> Result<Option<JsonValue>> {
        self.require_auth("create")?;

        let image_url = if is_absolute_url(image) {
            image.to_string()
        } else {
            self.upload(Path::new(image)).await?
        };
        let link = if link.is_empty() { &image_url } else { link };

        let request = params([
            ("method", json!("scraped")),
            ("description", json!(description)),
            ("link", json!(link)),
            ("image_url", json!(image_url)),
            ("board_id", json!(board_id)),
        ]);
        self.ctx.post_for_data(resources::CREATE_PIN, &request).await
    }

    /// Edit a pin; passing `board_id` moves it as well
    pub async fn edit(
        &self,
        pin_id: &str,
        description: &str,
        link: &str,
        board_id: Option<&str>,
    ) -> Result<bool> {
        let request = params([
            ("id", json!(pin_id)),
            ("description", json!(description)),
            ("link", json!(link)),
            ("board_id", json!(board_id)),
        ]);
        self.ctx.post(resources::UPDATE_PIN, &request).await
    }

    pub async fn move_to_board(&self, pin_id: &str, board_id: &str) -> Result<bool> {
        self.edit(pin_id, "", "", Some(board_id)).await
    }

    /// Save an existing pin to one of your boards
    pub async fn repin(
        &self,
        pin_id: &str,
        board_id: &str,
        description: &str,
    ) -> Result<Option<JsonValue>> {
        self.require_auth("repin")?;

        let request = params([
            ("board_id", json!(board_id)),
            ("description", json!(strip_backslashes(description))),
            ("link", json!(strip_backslashes(pin_id))),
            ("is_video", JsonValue::Null),
            ("pin_id", json!(pin_id)),
        ]);
        self.ctx.post_for_data(resources::REPIN, &request).await
    }

    pub async fn info(&self, pin_id: &str) -> Result<Option<JsonValue>> {
        let request = params([
            ("id", json!(pin_id)),
            ("field_set_key", json!("detailed")),
        ]);
        self.ctx.get_data(resources::PIN_INFO, &request).await
    }

    /// Recent pins from a domain, e.g. `flickr.com`
    pub fn from_source(&self, domain: &str, limit: usize) -> PaginatedFeed<'_> {
        self.ctx.paginate(
            resources::DOMAIN_FEED,
            params([("domain", json!(domain))]),
            limit,
        )
    }

    pub fn related(&self, pin_id: &str, limit: usize) -> PaginatedFeed<'_> {
        self.ctx.paginate(
            resources::RELATED_PINS,
            params([("pin", json!(pin_id))]),
            limit,
        )
    }

    /// Home feed of the logged-in user
    pub fn feed(&self, limit: usize) -> Result<PaginatedFeed<'_>> {
        self.require_auth("feed")?;
        Ok(self.ctx.paginate(resources::USER_FEED, Default::default(), limit))
    }

    /// Latest activity on a pin.
    ///
    /// Pins without aggregated data have no activity and give an empty feed.
    pub async fn activity(&self, pin_id: &str, limit: usize) -> Result<PaginatedFeed<'_>> {
        self.require_auth("activity")?;

        let aggregated_id = self
            .info(pin_id)
            .await?
            .and_then(|info| get_path(&info, "aggregated_pin_data.id").cloned())
            .filter(|id| !id.is_null());

        let Some(aggregated_id) = aggregated_id else {
            debug!(pin_id, "pin has no aggregated data");
            return Ok(PaginatedFeed::empty());
        };

        Ok(self.ctx.paginate(
            resources::ACTIVITY,
            params([("aggregated_pin_data_id", aggregated_id)]),
            limit,
        ))
    }

    pub async fn copy(&self, pin_ids: &[String], board_id: &str) -> Result<bool> {
        self.require_auth("copy")?;
        self.bulk_edit(pin_ids, board_id, resources::BULK_COPY).await
    }

    /// Move pins to another board in one request
    pub async fn move_pins(&self, pin_ids: &[String], board_id: &str) -> Result<bool> {
        self.require_auth("move")?;
        self.bulk_edit(pin_ids, board_id, resources::BULK_MOVE).await
    }

    pub async fn delete_from_board(&self, pin_ids: &[String], board_id: &str) -> Result<bool> {
        self.bulk_edit(pin_ids, board_id, resources::BULK_DELETE).await
    }

    async fn bulk_edit(&self, pin_ids: &[String], board_id: &str, resource: &str) -> Result<bool> {
        let request = params([
            ("board_id", json!(board_id)),
            ("pin_ids", json!(pin_ids)),
        ]);
        self.ctx.post(resource, &request).await
    }

    /// Send a pin to users and/or e-mail addresses with a message
    pub async fn send(
        &self,
        pin_id: &str,
        text: &str,
        user_ids: &[String],
        emails: &[String],
    ) -> Result<bool> {
        self.require_auth("send")?;
        let data = self.build_message_data(text, Some(pin_id));
        self.send_message(user_ids, emails, data).await
    }

    pub async fn send_with_message(
        &self,
        pin_id: &str,
        text: &str,
        user_ids: &[String],
    ) -> Result<bool> {
        self.send(pin_id, text, user_ids, &[]).await
    }

    pub async fn send_with_email(&self, pin_id: &str, text: &str, emails: &[String]) -> Result<bool> {
        self.send(pin_id, text, &[], emails).await
    }

    /// Pins that look like a region of this one
    pub async fn visual_similar(
        &self,
        pin_id: &str,
        crop: Option<Crop>,
    ) -> Result<Option<JsonValue>> {
        self.require_auth("visual_similar")?;

        let request = params([
            ("pin_id", json!(pin_id)),
            ("crop", serde_json::to_value(crop.unwrap_or_default())?),
            ("force_refresh", json!(true)),
            ("keep_duplicates", json!(false)),
        ]);
        self.ctx
            .get_data(resources::VISUAL_SIMILAR_PINS, &request)
            .await
    }

    /// Download the original image of a pin into `dir`.
    ///
    /// Returns the saved file's path, or `None` when the pin has no
    /// original image.
    pub async fn save_original_image(
        &self,
        pin_id: &str,
        dir: impl AsRef<Path>,
    ) -> Result<Option<PathBuf>> {
        let Some(info) = self.info(pin_id).await? else {
            return Ok(None);
        };
        let Some(url) = get_path(&info, "images.orig.url").and_then(JsonValue::as_str) else {
            return Ok(None);
        };

        let file_name = url
            .split(['?', '#'])
            .next()
            .and_then(|path| path.rsplit('/').next())
            .filter(|name| !name.is_empty())
            .unwrap_or(pin_id);
        let destination = dir.as_ref().join(file_name);

        let bytes = self.ctx.client.download(url).await?;
        tokio::fs::write(&destination, &bytes)
            .await
            .with_context(|| format!("writing {}", destination.display()))?;

        info!(pin_id, path = %destination.display(), "saved original image");
        Ok(Some(destination))
    }
}

fn is_absolute_url(value: &str) -> bool {
    url::Url::parse(value).is_ok_and(|url| url.has_host())
}

fn strip_backslashes(value: &str) -> String {
    value.replace('\\', "")
}
