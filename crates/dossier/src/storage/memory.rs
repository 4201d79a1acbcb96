use super::ObjectStore;
use crate::{DossierError, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-process object store.
///
/// Counts every fetch so callers can check whether a request reached storage.
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<(String, String), Vec<u8>>>,
    fetches: AtomicUsize,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `bytes` under `bucket`/`path`, replacing any previous object.
    pub fn insert(&self, bucket: impl Into<String>, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.objects.write().insert((bucket.into(), path.into()), bytes.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_object(self, bucket: impl Into<String>, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(bucket, path, bytes);
        self
    }

    /// Number of `fetch` calls made so far, successful or not.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch(&self, bucket: &str, path: &str) -> Result<Vec<u8>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        self.objects
            .read()
            .get(&(bucket.to_string(), path.to_string()))
            .cloned()
            .ok_or_else(|| DossierError::not_found(bucket, path))
    }
}
