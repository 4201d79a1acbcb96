//! Error types for Dossier.
//!
//! Every fallible operation in the crate returns [`DossierError`]. The ingestion
//! core (locating and extracting a document) only ever produces five kinds:
//!
//! - `InvalidReference` - malformed remote reference, never retryable
//! - `NotFound` - the referenced object does not exist in storage
//! - `Transport` - network or storage access failure, retryable by the caller
//! - `UnsupportedFormat` - format tag outside the supported set
//! - `ExtractionFailed` - a format parser rejected the bytes
//!
//! Errors raised by parsing or storage libraries are wrapped into one of these at
//! the point they enter the crate. The original error stays reachable through
//! [`std::error::Error::source`].
//!
//! `Validation` and `Io` cover configuration loading, and `Analysis` / `Report`
//! cover the downstream pipeline stages. None of them come out of extraction.
//!
//! # Example
//!
//! ```rust
//! use dossier::{DossierError, Result};
//!
//! fn parse_page_count(raw: &str) -> Result<usize> {
//!     raw.parse::<usize>()
//!         .map_err(|e| DossierError::extraction_failed_with_source(format!("bad page count: {raw}"), e))
//! }
//!
//! let err = parse_page_count("many").unwrap_err();
//! assert_eq!(err.kind(), "extraction_failed");
//! assert!(std::error::Error::source(&err).is_some());
//! ```
use thiserror::Error;

/// Result type alias using `DossierError`.
pub type Result<T> = std::result::Result<T, DossierError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for all Dossier operations.
#[derive(Debug, Error)]
pub enum DossierError {
    #[error("Invalid document reference: {message}")]
    InvalidReference { message: String },

    #[error("Document not found: {location}")]
    NotFound { location: String },

    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Unsupported format: {format_tag}")]
    UnsupportedFormat { format_tag: String },

    #[error("Text extraction failed: {message}")]
    ExtractionFailed {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Analysis error: {message}")]
    Analysis {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Report error: {message}")]
    Report {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        pastey::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl DossierError {
    error_constructor!(transport, Transport);
    error_constructor!(extraction_failed, ExtractionFailed);
    error_constructor!(validation, Validation);
    error_constructor!(analysis, Analysis);
    error_constructor!(report, Report);

    /// Create an InvalidReference error
    pub fn invalid_reference<S: Into<String>>(message: S) -> Self {
        Self::InvalidReference {
            message: message.into(),
        }
    }

    /// Create a NotFound error for `bucket`/`path`
    pub fn not_found(bucket: &str, path: &str) -> Self {
        Self::NotFound {
            location: format!("{bucket}/{path}"),
        }
    }

    /// Create an UnsupportedFormat error carrying the offending tag
    pub fn unsupported_format<S: Into<String>>(format_tag: S) -> Self {
        Self::UnsupportedFormat {
            format_tag: format_tag.into(),
        }
    }

    /// Whether retrying the same request may succeed.
    ///
    /// Only transport failures qualify. Dossier never retries internally; the
    /// caller owns the retry policy.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Stable snake_case name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidReference { .. } => "invalid_reference",
            Self::NotFound { .. } => "not_found",
            Self::Transport { .. } => "transport",
            Self::UnsupportedFormat { .. } => "unsupported_format",
            Self::ExtractionFailed { .. } => "extraction_failed",
            Self::Validation { .. } => "validation",
            Self::Analysis { .. } => "analysis",
            Self::Report { .. } => "report",
            Self::Io(_) => "io",
        }
    }
}

impl From<serde_json::Error> for DossierError {
    fn from(err: serde_json::Error) -> Self {
        DossierError::Validation {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
