//! Resolve a document reference to its bytes and format.

use crate::Result;
use crate::core::config::DEFAULT_MAX_DOCUMENT_BYTES;
use crate::core::format::FormatTag;
use crate::core::reference::{DocumentReference, InMemoryDocument, RemoteReference};
use crate::storage::ObjectStore;
use std::sync::Arc;

/// Bytes of a located document together with the format they must be parsed as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDocument {
    pub bytes: Vec<u8>,
    pub format: FormatTag,
}

/// Turns references into [`ResolvedDocument`]s.
///
/// Remote references are fetched from the configured [`ObjectStore`]. The format
/// is always derived before storage is touched, so a malformed reference or an
/// unsupported extension never costs a fetch.
#[derive(Clone)]
pub struct DocumentLocator {
    store: Arc<dyn ObjectStore>,
    max_document_bytes: u64,
}

impl DocumentLocator {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }

    /// Set the size above which fetched documents are logged as oversized.
    pub fn with_max_document_bytes(mut self, max_document_bytes: u64) -> Self {
        self.max_document_bytes = max_document_bytes;
        self
    }

    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    /// Parse `reference`, derive its format tag from the object path and fetch
    /// the object.
    ///
    /// # Errors
    ///
    /// - `InvalidReference` if the string is malformed (no fetch is attempted)
    /// - `UnsupportedFormat` if the path extension is not supported (no fetch)
    /// - `NotFound` / `Transport` as reported by the store
    pub async fn resolve_remote(&self, reference: &str) -> Result<ResolvedDocument> {
        let remote = RemoteReference::parse(reference)?;
        self.fetch(&remote).await
    }

    /// Resolve an already parsed remote reference.
    pub async fn fetch(&self, remote: &RemoteReference) -> Result<ResolvedDocument> {
        let format = FormatTag::from_object_path(&remote.path)?;

        tracing::debug!(
            backend = self.store.name(),
            bucket = %remote.bucket,
            path = %remote.path,
            format = %format,
            "fetching document"
        );

        let bytes = self.store.fetch(&remote.bucket, &remote.path).await?;
        self.check_size(&bytes, &remote.to_string());

        Ok(ResolvedDocument { bytes, format })
    }

    /// Resolve an upload from its declared media type.
    pub fn resolve_local(&self, document: InMemoryDocument) -> Result<ResolvedDocument> {
        let format = FormatTag::from_media_type(&document.declared_media_type)?;
        self.check_size(&document.bytes, "upload");

        Ok(ResolvedDocument {
            bytes: document.bytes,
            format,
        })
    }

    pub async fn resolve(&self, reference: DocumentReference) -> Result<ResolvedDocument> {
        match reference {
            DocumentReference::Remote(remote) => self.fetch(&remote).await,
            DocumentReference::InMemory(document) => self.resolve_local(document),
        }
    }

    fn check_size(&self, bytes: &[u8], origin: &str) {
        let size = bytes.len() as u64;
        if size > self.max_document_bytes {
            tracing::warn!(
                origin,
                size_bytes = size,
                max_document_bytes = self.max_document_bytes,
                "document exceeds configured size bound"
            );
        }
    }
}

impl std::fmt::Debug for DocumentLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentLocator")
            .field("store", &self.store.name())
            .field("max_document_bytes", &self.max_document_bytes)
            .finish()
    }
}
