//! Read-only object storage backends.
//!
//! The locator only needs one capability from storage: fetch the full bytes of
//! an object by bucket and path, or report that it does not exist. Backends
//! implement [`ObjectStore`] and are shared behind an `Arc`, so they must be safe
//! for concurrent read-only use.

mod filesystem;
#[cfg(feature = "gcs")]
mod gcs;
mod memory;

pub use filesystem::FilesystemObjectStore;
#[cfg(feature = "gcs")]
pub use gcs::GcsObjectStore;
pub use memory::InMemoryObjectStore;

use crate::Result;
use crate::core::config::StorageConfig;
use async_trait::async_trait;
use std::sync::Arc;

/// Read-only fetch interface over a bucket-oriented store.
///
/// # Errors
///
/// Implementations must map their failures onto exactly these kinds:
/// - `DossierError::NotFound` when the object does not exist
/// - `DossierError::Transport` for any access failure worth retrying
/// - `DossierError::InvalidReference` when bucket or path cannot name an object
///   in this backend
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Backend name used in logs.
    fn name(&self) -> &str;

    /// Fetch the whole object into memory.
    async fn fetch(&self, bucket: &str, path: &str) -> Result<Vec<u8>>;
}

/// Build the configured backend.
pub fn from_config(config: &StorageConfig) -> Result<Arc<dyn ObjectStore>> {
    match config {
        #[cfg(feature = "gcs")]
        StorageConfig::Gcs { endpoint, user_agent } => {
            Ok(Arc::new(GcsObjectStore::new(endpoint, user_agent.as_deref())?))
        }
        #[cfg(not(feature = "gcs"))]
        StorageConfig::Gcs { .. } => Err(crate::DossierError::validation(
            "the gcs storage backend requires the `gcs` feature",
        )),
        StorageConfig::Filesystem { root } => Ok(Arc::new(FilesystemObjectStore::new(root))),
        StorageConfig::Memory => Ok(Arc::new(InMemoryObjectStore::new())),
    }
}
