//! Main extraction entry points.
//!
//! [`extract_text`] is the pure, synchronous core: bytes plus a [`FormatTag`] in,
//! text out. [`DocumentProcessor`] wires it to a [`DocumentLocator`] so a caller
//! can go straight from a reference to text.
//!
//! # Functions
//!
//! - [`DocumentProcessor::process_remote`] - Extract text from a remote reference
//! - [`DocumentProcessor::process_upload`] - Extract text from uploaded bytes
//! - [`DocumentProcessor::process_remote_sync`] / [`DocumentProcessor::process_upload_sync`] -
//!   blocking variants for callers without a runtime

use crate::core::config::DossierConfig;
use crate::core::format::FormatTag;
use crate::core::locator::{DocumentLocator, ResolvedDocument};
use crate::core::reference::{DocumentReference, InMemoryDocument};
use crate::extractors::extractor_for;
use crate::storage::{self, ObjectStore};
use crate::{DossierError, Result};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Global Tokio runtime for synchronous operations.
///
/// Lazily initialized on first use and shared by every `_sync` wrapper.
///
/// The `.expect()` only fires if the OS refuses to create the worker threads, in
/// which case no blocking call could make progress anyway.
static GLOBAL_RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create global Tokio runtime - system may be out of resources")
});

/// Extract text from `content` using the strategy registered for `format`.
///
/// Stateless and idempotent. No normalization is applied.
///
/// # Example
///
/// ```rust
/// use dossier::{FormatTag, extract_text};
///
/// let text = extract_text(b"Hello\nWorld", FormatTag::Txt).unwrap();
/// assert_eq!(text, "Hello\nWorld");
/// ```
pub fn extract_text(content: &[u8], format: FormatTag) -> Result<String> {
    let extractor = extractor_for(format);
    tracing::debug!(
        extractor = extractor.name(),
        size_bytes = content.len(),
        "dispatching extraction"
    );
    extractor.extract(content)
}

/// Extract text for a raw format tag.
///
/// # Errors
///
/// Returns `DossierError::UnsupportedFormat` without invoking any strategy when
/// `tag` is outside the supported set.
pub fn extract_text_for_tag(content: &[u8], tag: &str) -> Result<String> {
    let format = FormatTag::from_tag(tag)?;
    extract_text(content, format)
}

/// Run extraction on the blocking pool.
async fn extract_resolved(resolved: ResolvedDocument) -> Result<String> {
    let ResolvedDocument { bytes, format } = resolved;
    let span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        let _guard = span.entered();
        extract_text(&bytes, format)
    })
    .await
    .map_err(|e| DossierError::extraction_failed_with_source(format!("{} extraction task failed", format), e))?
}

/// Locates documents and extracts their text.
///
/// Cheap to clone; clones share the storage client.
///
/// # Example
///
/// ```rust
/// use dossier::DocumentProcessor;
/// use dossier::storage::InMemoryObjectStore;
/// use std::sync::Arc;
///
/// let store = InMemoryObjectStore::new().with_object("docs", "memo.txt", b"Hello".to_vec());
/// let processor = DocumentProcessor::new(Arc::new(store));
///
/// let text = processor.process_remote_sync("gs://docs/memo.txt").unwrap();
/// assert_eq!(text, "Hello");
/// ```
#[derive(Debug, Clone)]
pub struct DocumentProcessor {
    locator: DocumentLocator,
}

impl DocumentProcessor {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            locator: DocumentLocator::new(store),
        }
    }

    /// Build a processor with the storage backend and size bound from `config`.
    pub fn from_config(config: &DossierConfig) -> Result<Self> {
        let store = storage::from_config(&config.storage)?;
        Ok(Self {
            locator: DocumentLocator::new(store).with_max_document_bytes(config.max_document_bytes),
        })
    }

    pub fn with_locator(locator: DocumentLocator) -> Self {
        Self { locator }
    }

    pub fn locator(&self) -> &DocumentLocator {
        &self.locator
    }

    /// Extract the text of any document reference.
    #[tracing::instrument(skip(self, reference), fields(document = %reference.describe()))]
    pub async fn process(&self, reference: DocumentReference) -> Result<String> {
        let resolved = self.locator.resolve(reference).await?;
        extract_resolved(resolved).await
    }

    /// Extract the text of a remote document such as `gs://bucket/path/file.pdf`.
    ///
    /// # Errors
    ///
    /// Any of `InvalidReference`, `NotFound`, `Transport`, `UnsupportedFormat` or
    /// `ExtractionFailed`. Only `Transport` is worth retrying.
    #[tracing::instrument(skip(self))]
    pub async fn process_remote(&self, reference: &str) -> Result<String> {
        let resolved = self.locator.resolve_remote(reference).await?;
        extract_resolved(resolved).await
    }

    /// Extract the text of uploaded bytes with a declared media type.
    #[tracing::instrument(skip(self, bytes), fields(size_bytes = bytes.len()))]
    pub async fn process_upload(&self, bytes: Vec<u8>, media_type: &str) -> Result<String> {
        let resolved = self.locator.resolve_local(InMemoryDocument {
            bytes,
            declared_media_type: media_type.to_string(),
        })?;
        extract_resolved(resolved).await
    }

    /// Extract the text of a document the locator has already resolved.
    pub async fn extract(&self, resolved: ResolvedDocument) -> Result<String> {
        extract_resolved(resolved).await
    }

    /// Synchronous wrapper for [`process`](Self::process).
    ///
    /// Must not be called from inside an async runtime.
    pub fn process_sync(&self, reference: DocumentReference) -> Result<String> {
        GLOBAL_RUNTIME.block_on(self.process(reference))
    }

    /// Synchronous wrapper for [`process_remote`](Self::process_remote).
    pub fn process_remote_sync(&self, reference: &str) -> Result<String> {
        GLOBAL_RUNTIME.block_on(self.process_remote(reference))
    }

    /// Synchronous wrapper for [`process_upload`](Self::process_upload).
    pub fn process_upload_sync(&self, bytes: Vec<u8>, media_type: &str) -> Result<String> {
        GLOBAL_RUNTIME.block_on(self.process_upload(bytes, media_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryObjectStore;

    #[test]
    fn test_extract_text_txt() {
        assert_eq!(extract_text(b"abc", FormatTag::Txt).unwrap(), "abc");
    }

    #[test]
    fn test_extract_text_for_unknown_tag() {
        let err = extract_text_for_tag(b"whatever", "rtf").unwrap_err();
        assert!(matches!(err, DossierError::UnsupportedFormat { ref format_tag } if format_tag == "rtf"));
    }

    #[test]
    fn test_extract_text_for_corrupt_pdf() {
        let err = extract_text_for_tag(b"%PDF-1.7 truncated", "pdf").unwrap_err();
        assert!(matches!(err, DossierError::ExtractionFailed { .. }));
    }

    #[tokio::test]
    async fn test_process_upload_plain_text() {
        let processor = DocumentProcessor::new(Arc::new(InMemoryObjectStore::new()));
        let text = processor
            .process_upload(b"Hello\nWorld".to_vec(), "text/plain")
            .await
            .unwrap();
        assert_eq!(text, "Hello\nWorld");
    }

    #[tokio::test]
    async fn test_process_remote_invalid_utf8() {
        let store = Arc::new(InMemoryObjectStore::new().with_object("b", "bad.txt", vec![0xC3, 0x28]));
        let processor = DocumentProcessor::new(store);

        let err = processor.process_remote("gs://b/bad.txt").await.unwrap_err();
        assert!(matches!(err, DossierError::ExtractionFailed { .. }));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_process_dispatches_on_reference_variant() {
        let store = Arc::new(InMemoryObjectStore::new().with_object("b", "a.txt", b"remote".to_vec()));
        let processor = DocumentProcessor::new(store);

        let remote = processor
            .process(DocumentReference::remote("gs://b/a.txt").unwrap())
            .await
            .unwrap();
        let upload = processor
            .process(DocumentReference::in_memory(b"local".to_vec(), "text/plain"))
            .await
            .unwrap();

        assert_eq!(remote, "remote");
        assert_eq!(upload, "local");
    }

    #[test]
    fn test_from_config_memory_backend() {
        let config = DossierConfig {
            storage: crate::core::config::StorageConfig::Memory,
            ..DossierConfig::default()
        };
        let processor = DocumentProcessor::from_config(&config).unwrap();
        assert_eq!(processor.locator().store().name(), "memory");
    }
}
