//! Time-boxed on-disk catalog cache.
//!
//! One JSON document, `{ "timestamp": <unix ms>, "models": [...] }`. Writers
//! replace the file through a uniquely named temporary sibling, so a
//! concurrent reader sees either the old or the new record. Concurrent
//! refreshes race and the last rename wins.

use crate::error::CacheError;
use llmsel_core::{CacheRecord, CatalogEntry};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CatalogCache {
    path: PathBuf,
    ttl: Duration,
}

impl CatalogCache {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Read the record, whatever its age. Missing or unreadable files are a miss.
    pub async fn load(&self) -> Option<CacheRecord> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no catalog cache");
                return None;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "catalog cache unreadable");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "catalog cache corrupt, ignoring");
                None
            }
        }
    }

    /// Models from a record younger than the TTL.
    pub async fn load_fresh(&self) -> Option<Vec<CatalogEntry>> {
        let record = self.load().await?;
        if record.is_fresh(self.ttl) {
            Some(record.models)
        } else {
            debug!(timestamp = record.timestamp, "catalog cache expired");
            None
        }
    }

    pub async fn store(&self, record: &CacheRecord) -> Result<(), CacheError> {
        let data = serde_json::to_vec(record)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|source| CacheError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let tmp_path = self.tmp_path();
        let io_err = |source| CacheError::Io {
            path: tmp_path.clone(),
            source,
        };
        fs::write(&tmp_path, &data).await.map_err(io_err)?;
        if let Err(source) = fs::rename(&tmp_path, &self.path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(CacheError::Io {
                path: self.path.clone(),
                source,
            });
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.path
            .with_file_name(format!("{name}.{}.tmp", Uuid::new_v4().simple()))
    }
}
