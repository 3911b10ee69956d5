use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListingError {
    /// Rate-limit rejection. The only kind that is retried.
    #[error("Listing throttled: {0}")]
    Throttled(String),
    #[error("Listing API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Listing transport error: {0}")]
    Transport(String),
    #[error("Listing response could not be decoded: {0}")]
    Decode(String),
    #[error("Listing still throttled after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: String },
}

impl ListingError {
    pub fn is_throttling(&self) -> bool {
        matches!(self, Self::Throttled(_))
    }
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cache encode error: {0}")]
    Encode(#[from] serde_json::Error),
}
