//! Model catalog: pages through the hub listing, keeps the entries deployable
//! on Bedrock and caches the result on disk for a day.

pub mod cache;
pub mod client;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod known;
pub mod retry;

pub use cache::CatalogCache;
pub use client::{HttpHubClient, HubContentPage, HubListing, ListHubContentsRequest};
pub use error::{CacheError, ListingError};
pub use fetcher::{CatalogFetcher, CatalogSource};
pub use filter::filter_deployable;
pub use known::KnownModelsListing;
pub use retry::ThrottleBackoff;
