//! Resource calls
//!
//! Every endpoint of the private API takes the same payload: a `source_url`
//! and a `data` field holding `{"options": <params>, "context": {}}`. GET
//! requests send it as query parameters, POST requests as a form body.

use super::client::{HttpClient, RequestConfig};
use crate::error::{Error, Result};
use crate::pagination::PageFetcher;
use crate::resources;
use crate::response::Response;
use crate::types::Params;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::json;
use std::path::Path;
use tracing::debug;

const SOURCE_URL: &str = "/";

/// Serialize `params` into the `data` field
pub fn resource_payload(params: &Params) -> Result<String> {
    Ok(serde_json::to_string(&json!({
        "options": params,
        "context": {},
    }))?)
}

impl HttpClient {
    /// GET a resource with `params` as its options
    pub async fn resource_get(&self, resource: &str, params: &Params) -> Result<Response> {
        let config = RequestConfig::new()
            .query("source_url", SOURCE_URL)
            .query("data", resource_payload(params)?)
            .accept_client_errors();

        self.send_resource(Method::GET, resource, config).await
    }

    /// POST a resource with `params` as its options
    pub async fn resource_post(&self, resource: &str, params: &Params) -> Result<Response> {
        let config = RequestConfig::new()
            .form_field("source_url", SOURCE_URL)
            .form_field("data", resource_payload(params)?)
            .accept_client_errors();

        self.send_resource(Method::POST, resource, config).await
    }

    async fn send_resource(
        &self,
        method: Method,
        resource: &str,
        config: RequestConfig,
    ) -> Result<Response> {
        debug!(%method, resource, "calling resource");
        let response = self.request(method, resource, config).await?;
        let body = response.text().await?;
        Response::from_body(&body)
    }

    /// Upload an image file and return the URL the API stored it under
    pub async fn upload_image(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(image_mime(path))?;
        let form = Form::new().part("img", part);

        self.throttle().await;
        let url = self.build_url(resources::UPLOAD_IMAGE);
        let response = self
            .prepare(Method::POST, &url)
            .await
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        self.set_current_url(response.url().clone()).await;
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::upload(format!("HTTP {}: {body}", status.as_u16())));
        }

        let response = Response::from_body(&body)?;
        response
            .get_str("image_url")
            .or_else(|| response.get_str("data.image_url"))
            .map(str::to_string)
            .ok_or_else(|| {
                Error::upload(
                    response
                        .error_message()
                        .unwrap_or_else(|| "no image_url in response".to_string()),
                )
            })
    }
}

fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "image/jpeg",
    }
}

/// Fetches feed pages from one GET resource
#[derive(Debug, Clone, Copy)]
pub struct ResourceFetcher<'a> {
    client: &'a HttpClient,
    resource: &'static str,
}

impl<'a> ResourceFetcher<'a> {
    pub fn new(client: &'a HttpClient, resource: &'static str) -> Self {
        Self { client, resource }
    }
}

#[async_trait]
impl PageFetcher for ResourceFetcher<'_> {
    async fn fetch_page(&self, params: Params) -> Result<Response> {
        self.client.resource_get(self.resource, &params).await
    }
}
