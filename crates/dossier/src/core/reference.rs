//! Document references.
//!
//! A request names its document either by a remote storage locator or by handing
//! over the bytes directly. [`DocumentReference`] holds exactly one of the two.

use crate::{DossierError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum number of `/`-delimited segments in a remote reference
/// (`scheme:`, empty, bucket, path...).
const MIN_REMOTE_SEGMENTS: usize = 4;

/// Location of an object in a bucket-oriented store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteReference {
    pub bucket: String,
    pub path: String,
}

impl RemoteReference {
    /// Parse a reference of the form `scheme://bucket/path/to/file.ext`.
    ///
    /// This is a positional split, not a URI parse: the string is split on `/`,
    /// the token at index 2 is the bucket and tokens 3.. joined by `/` form the
    /// object path. The scheme is never inspected.
    ///
    /// # Errors
    ///
    /// Returns `DossierError::InvalidReference` when there are fewer than four
    /// segments, or when the bucket or path comes out empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dossier::RemoteReference;
    ///
    /// let reference = RemoteReference::parse("gs://docs-bucket/deals/acme.pdf").unwrap();
    /// assert_eq!(reference.bucket, "docs-bucket");
    /// assert_eq!(reference.path, "deals/acme.pdf");
    /// ```
    pub fn parse(reference: &str) -> Result<Self> {
        let segments: Vec<&str> = reference.split('/').collect();

        if segments.len() < MIN_REMOTE_SEGMENTS {
            return Err(DossierError::invalid_reference(format!(
                "expected scheme://bucket/path, got '{}'",
                reference
            )));
        }

        let bucket = segments[2];
        let path = segments[3..].join("/");

        if bucket.is_empty() {
            return Err(DossierError::invalid_reference(format!(
                "missing bucket in '{}'",
                reference
            )));
        }
        if path.is_empty() {
            return Err(DossierError::invalid_reference(format!(
                "missing object path in '{}'",
                reference
            )));
        }

        Ok(Self {
            bucket: bucket.to_string(),
            path,
        })
    }
}

impl fmt::Display for RemoteReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.path)
    }
}

/// A document that is already in memory, e.g. a direct upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryDocument {
    pub bytes: Vec<u8>,
    pub declared_media_type: String,
}

/// Where a document's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentReference {
    Remote(RemoteReference),
    InMemory(InMemoryDocument),
}

impl DocumentReference {
    /// Parse a remote reference string.
    pub fn remote(reference: &str) -> Result<Self> {
        RemoteReference::parse(reference).map(DocumentReference::Remote)
    }

    /// Wrap uploaded bytes with their declared media type.
    pub fn in_memory(bytes: impl Into<Vec<u8>>, declared_media_type: impl Into<String>) -> Self {
        DocumentReference::InMemory(InMemoryDocument {
            bytes: bytes.into(),
            declared_media_type: declared_media_type.into(),
        })
    }

    /// Short human-readable description, used in log fields.
    pub fn describe(&self) -> String {
        match self {
            DocumentReference::Remote(remote) => remote.to_string(),
            DocumentReference::InMemory(doc) => {
                format!("upload ({}, {} bytes)", doc.declared_media_type, doc.bytes.len())
            }
        }
    }
}
