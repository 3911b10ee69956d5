//! Listing API client.
//!
//! The hub listing endpoint speaks the AWS JSON 1.1 protocol: a POST to the
//! service root with an `X-Amz-Target` header naming the operation. Error
//! bodies look like `{ "__type": "ThrottlingException", "message": "..." }`.

use crate::error::ListingError;
use async_trait::async_trait;
use llmsel_core::config::CatalogConfig;
use llmsel_core::CatalogEntry;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

const LIST_HUB_CONTENTS_TARGET: &str = "SageMaker.ListHubContents";
const AMZ_JSON: &str = "application/x-amz-json-1.1";

/// Parameters for one page of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListHubContentsRequest {
    pub hub_name: String,
    pub hub_content_type: String,
    pub max_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

/// One page of listed entries plus the continuation token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HubContentPage {
    pub entries: Vec<CatalogEntry>,
    pub next_token: Option<String>,
}

/// Source of listing pages.
#[async_trait]
pub trait HubListing: Send + Sync {
    async fn list_page(&self, request: &ListHubContentsRequest)
        -> Result<HubContentPage, ListingError>;
}

#[async_trait]
impl<T: HubListing + ?Sized> HubListing for Arc<T> {
    async fn list_page(
        &self,
        request: &ListHubContentsRequest,
    ) -> Result<HubContentPage, ListingError> {
        (**self).list_page(request).await
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListHubContentsResponse {
    #[serde(default)]
    hub_content_summaries: Vec<HubContentSummary>,
    #[serde(default)]
    next_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HubContentSummary {
    hub_content_name: String,
    #[serde(default)]
    hub_content_display_name: Option<String>,
    #[serde(default)]
    hub_content_description: Option<String>,
    #[serde(default)]
    hub_content_search_keywords: Vec<String>,
}

impl From<HubContentSummary> for CatalogEntry {
    fn from(s: HubContentSummary) -> Self {
        CatalogEntry {
            id: s.hub_content_name,
            display_name: s.hub_content_display_name,
            description: s.hub_content_description,
            search_keywords: s.hub_content_search_keywords.into_iter().collect(),
        }
    }
}

/// HTTP implementation of [`HubListing`].
pub struct HttpHubClient {
    http: reqwest::Client,
    endpoint: String,
    bearer_token: Option<String>,
}

impl HttpHubClient {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            bearer_token: None,
        }
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self, ListingError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ListingError::Transport(e.to_string()))?;
        let mut client = Self::new(http, config.endpoint());
        if let Some(token) = &config.bearer_token {
            client = client.with_bearer_token(token.clone());
        }
        Ok(client)
    }
}

#[async_trait]
impl HubListing for HttpHubClient {
    async fn list_page(
        &self,
        request: &ListHubContentsRequest,
    ) -> Result<HubContentPage, ListingError> {
        let body =
            serde_json::to_vec(request).map_err(|e| ListingError::Decode(e.to_string()))?;

        let mut builder = self
            .http
            .post(&self.endpoint)
            .header("X-Amz-Target", LIST_HUB_CONTENTS_TARGET)
            .header(CONTENT_TYPE, AMZ_JSON)
            .body(body);
        if let Some(token) = &self.bearer_token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ListingError::Transport(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ListingError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(classify_listing_error(status.as_u16(), &text));
        }

        let parsed: ListHubContentsResponse =
            serde_json::from_str(&text).map_err(|e| ListingError::Decode(e.to_string()))?;
        debug!(
            entries = parsed.hub_content_summaries.len(),
            has_next = parsed.next_token.is_some(),
            "listing page received"
        );

        Ok(HubContentPage {
            entries: parsed.hub_content_summaries.into_iter().map(Into::into).collect(),
            next_token: parsed.next_token,
        })
    }
}

/// Map an error response to a [`ListingError`]. Throttling is recognized by
/// status 429 or by an error type or message mentioning throttling.
pub fn classify_listing_error(status: u16, body: &str) -> ListingError {
    let json = serde_json::from_str::<serde_json::Value>(body).ok();

    let message = json_str(json.as_ref(), &["message", "Message"])
        .unwrap_or_else(|| body.trim().to_string());
    let error_type = json_str(json.as_ref(), &["__type", "code", "Code"]).unwrap_or_default();

    let lower = message.to_lowercase();
    let looks_throttled = error_type.to_lowercase().contains("throttl")
        || lower.contains("throttl")
        || lower.contains("rate exceeded");
    if status == 429 || looks_throttled {
        return ListingError::Throttled(message);
    }

    ListingError::Api { status, message }
}

fn json_str(json: Option<&serde_json::Value>, names: &[&str]) -> Option<String> {
    let json = json?;
    names
        .iter()
        .find_map(|n| json.get(*n).and_then(|v| v.as_str()))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
