//! Dossier - document ingestion for due-diligence analysis
//!
//! Dossier turns a document reference into plain text. A reference is either a
//! remote locator (`gs://bucket/path/to/file.pdf`) fetched from object storage,
//! or bytes uploaded directly with a declared media type. PDF, DOCX and plain
//! text are supported.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use dossier::{DocumentProcessor, DossierConfig};
//!
//! # fn main() -> dossier::Result<()> {
//! let config = DossierConfig::discover()?.unwrap_or_default();
//! let processor = DocumentProcessor::from_config(&config)?;
//!
//! let text = processor.process_remote_sync("gs://docs-bucket/deals/acme.pdf")?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Core Module** (`core`): references, format tagging, location, extraction entry points, config
//! - **Storage** (`storage`): read-only object stores (GCS, filesystem, in-memory)
//! - **Extractors** (`extractors`): one strategy per supported format
//! - **Text** (`text`): opt-in normalization
//! - **Pipeline** (`pipeline`): extract, analyze, render with pluggable analyzer and renderer

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod extractors;
pub mod pipeline;
pub mod storage;
pub mod text;

pub use error::{DossierError, Result};

pub use core::config::{DEFAULT_GCS_ENDPOINT, DossierConfig, StorageConfig};
pub use core::extractor::{DocumentProcessor, extract_text, extract_text_for_tag};
pub use core::format::FormatTag;
pub use core::locator::{DocumentLocator, ResolvedDocument};
pub use core::reference::{DocumentReference, InMemoryDocument, RemoteReference};
