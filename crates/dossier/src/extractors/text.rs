//! Plain text extractor.

use super::TextExtractor;
use crate::core::format::FormatTag;
use crate::{DossierError, Result};

/// Decodes UTF-8 text as-is, with no structural parsing.
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "simd-utf8")]
fn decode_utf8(content: &[u8]) -> Result<&str> {
    simdutf8::compat::from_utf8(content)
        .map_err(|e| DossierError::extraction_failed_with_source("text is not valid UTF-8", e))
}

#[cfg(not(feature = "simd-utf8"))]
fn decode_utf8(content: &[u8]) -> Result<&str> {
    std::str::from_utf8(content).map_err(|e| DossierError::extraction_failed_with_source("text is not valid UTF-8", e))
}

impl TextExtractor for PlainTextExtractor {
    fn name(&self) -> &str {
        "plain-text-extractor"
    }

    fn format(&self) -> FormatTag {
        FormatTag::Txt
    }

    fn extract(&self, content: &[u8]) -> Result<String> {
        decode_utf8(content).map(str::to_owned)
    }
}
