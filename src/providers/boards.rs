//! Boards provider

use super::capabilities::{CanBeDeleted, Searchable};
use super::{ApiContext, Provider};
use crate::error::Result;
use crate::pagination::PaginatedFeed;
use crate::resources;
use crate::types::{params, BoardPrivacy, JsonValue, Params};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Boards {
    ctx: Arc<ApiContext>,
}

impl Provider for Boards {
    fn context(&self) -> &ApiContext {
        &self.ctx
    }
}

impl Searchable for Boards {
    const SEARCH_SCOPE: &'static str = "boards";
}

impl CanBeDeleted for Boards {
    const DELETE_RESOURCE: &'static str = resources::DELETE_BOARD;
    const ENTITY_ID_NAME: &'static str = "board_id";
}

impl Boards {
    pub fn new(ctx: Arc<ApiContext>) -> Self {
        Self { ctx }
    }

    /// Boards owned by `username`
    pub async fn for_user(&self, username: &str) -> Result<Vec<JsonValue>> {
        let request = params([
            ("username", json!(username)),
            ("field_set_key", json!("detailed")),
        ]);
        self.ctx.get_list(resources::GET_BOARDS, &request).await
    }

    /// A board looked up by owner and slug
    pub async fn info(&self, username: &str, board: &str) -> Result<Option<JsonValue>> {
        let request = params([
            ("username", json!(username)),
            ("slug", json!(board)),
            ("field_set_key", json!("detailed")),
        ]);
        self.ctx.get_data(resources::GET_BOARD, &request).await
    }

    pub async fn create(
        &self,
        name: &str,
        description: &str,
        privacy: BoardPrivacy,
    ) -> Result<bool> {
        self.require_auth("create")?;

        let request = params([
            ("name", json!(name)),
            ("description", json!(description)),
            ("privacy", json!(privacy.as_str())),
        ]);
        self.ctx.post(resources::CREATE_BOARD, &request).await
    }

    /// Update board fields (`name`, `description`, `category`, ...)
    pub async fn update(&self, board_id: &str, mut attributes: Params) -> Result<bool> {
        self.require_auth("update")?;

        attributes.insert("board_id".to_string(), json!(board_id));
        self.ctx.post(resources::UPDATE_BOARD, &attributes).await
    }

    pub fn pins(&self, board_id: &str, limit: usize) -> PaginatedFeed<'_> {
        self.ctx.paginate(
            resources::BOARD_FEED,
            params([("board_id", json!(board_id))]),
            limit,
        )
    }

    pub async fn follow(&self, board_id: &str) -> Result<bool> {
        self.require_auth("follow")?;
        self.follow_call(board_id, resources::FOLLOW_BOARD).await
    }

    pub async fn unfollow(&self, board_id: &str) -> Result<bool> {
        self.require_auth("unfollow")?;
        self.follow_call(board_id, resources::UNFOLLOW_BOARD).await
    }

    async fn follow_call(&self, board_id: &str, resource: &str) -> Result<bool> {
        let request = params([
            ("board_id", json!(board_id)),
            ("board_url", json!("")),
        ]);
        self.ctx.post(resource, &request).await
    }
}
