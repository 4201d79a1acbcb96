//! Core ingestion: references, format tagging, location and extraction.

pub mod config;
pub mod extractor;
pub mod format;
pub mod locator;
pub mod reference;

pub use config::{DEFAULT_GCS_ENDPOINT, DossierConfig, StorageConfig};
pub use extractor::{DocumentProcessor, extract_text, extract_text_for_tag};
pub use format::FormatTag;
pub use locator::{DocumentLocator, ResolvedDocument};
pub use reference::{DocumentReference, InMemoryDocument, RemoteReference};
