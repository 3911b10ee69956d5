//! Paginated, cached catalog retrieval.

use crate::cache::CatalogCache;
use crate::client::{HubListing, ListHubContentsRequest};
use crate::error::ListingError;
use crate::filter::filter_deployable;
use crate::retry::ThrottleBackoff;
use async_trait::async_trait;
use llmsel_core::config::CatalogConfig;
use llmsel_core::{CacheRecord, CatalogEntry};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Anything that can produce the candidate model list.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_models(&self) -> Result<Vec<CatalogEntry>, ListingError>;
}

pub struct CatalogFetcher<L> {
    listing: L,
    cache: Option<CatalogCache>,
    backoff: ThrottleBackoff,
    hub_name: String,
    content_type: String,
    page_size: u32,
    page_delay: Duration,
    required_keywords: Vec<String>,
}

impl<L: HubListing> CatalogFetcher<L> {
    /// Fetcher with the cache, backoff and paging settings from `config`.
    pub fn new(listing: L, config: &CatalogConfig) -> Self {
        Self {
            listing,
            cache: Some(CatalogCache::new(
                config.cache_path.clone(),
                config.cache_ttl(),
            )),
            backoff: ThrottleBackoff::new(config.max_retries, config.initial_backoff()),
            hub_name: config.hub_name.clone(),
            content_type: config.content_type.clone(),
            page_size: config.page_size,
            page_delay: config.page_delay(),
            required_keywords: config.required_keywords.clone(),
        }
    }

    pub fn with_cache(mut self, cache: Option<CatalogCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_backoff(mut self, backoff: ThrottleBackoff) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    pub fn cache(&self) -> Option<&CatalogCache> {
        self.cache.as_ref()
    }

    /// Every listed entry, unfiltered, walking pages strictly one after another.
    ///
    /// The listing API does not reliably clear its continuation token on the
    /// last page, so an empty page is the stop signal. A missing token also stops.
    pub async fn fetch_all(&self) -> Result<Vec<CatalogEntry>, ListingError> {
        let mut models = Vec::new();
        let mut request = ListHubContentsRequest {
            hub_name: self.hub_name.clone(),
            hub_content_type: self.content_type.clone(),
            max_results: self.page_size,
            next_token: None,
        };

        loop {
            let page = self
                .backoff
                .run(|| self.listing.list_page(&request))
                .await?;

            // Workaround: the token can be non-null even when nothing is left.
            if page.entries.is_empty() {
                break;
            }
            models.extend(page.entries);

            match page.next_token.filter(|t| !t.is_empty()) {
                Some(token) => request.next_token = Some(token),
                None => break,
            }
            sleep(self.page_delay).await;
        }

        Ok(models)
    }

    /// Filtered catalog, served from the cache while it is fresh.
    ///
    /// A failed cache write is logged and does not affect the result.
    pub async fn fetch_models(&self) -> Result<Vec<CatalogEntry>, ListingError> {
        if let Some(cache) = &self.cache {
            if let Some(models) = cache.load_fresh().await {
                info!(count = models.len(), "using cached catalog");
                return Ok(models);
            }
        }

        info!(hub = %self.hub_name, "fetching models from listing API");
        let listed = self.fetch_all().await?;
        let models = filter_deployable(listed, &self.required_keywords);

        if let Some(cache) = &self.cache {
            match cache.store(&CacheRecord::new(models.clone())).await {
                Ok(()) => info!(path = %cache.path().display(), "catalog cached"),
                Err(e) => warn!(error = %e, "failed to cache catalog"),
            }
        }

        Ok(models)
    }
}

#[async_trait]
impl<L: HubListing> CatalogSource for CatalogFetcher<L> {
    async fn fetch_models(&self) -> Result<Vec<CatalogEntry>, ListingError> {
        CatalogFetcher::fetch_models(self).await
    }
}
