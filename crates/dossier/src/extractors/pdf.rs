//! PDF text extractor built on lopdf.

use super::TextExtractor;
use crate::core::format::FormatTag;
use crate::{DossierError, Result};
use lopdf::Document;

/// Page-oriented PDF extractor.
///
/// Produces one line group per page, in page order, joined with `\n`. A page
/// without any text still contributes an empty segment, so the output always
/// has `page_count - 1` separators. Text that lopdf cannot decode (for example
/// a composite font without a `ToUnicode` map) is dropped with a warning; only
/// structural failures reject the document.
pub struct PdfExtractor;

impl PdfExtractor {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a PDF from memory, rejecting documents we cannot read.
fn load_document(content: &[u8]) -> Result<Document> {
    let document =
        Document::load_mem(content).map_err(|e| DossierError::extraction_failed_with_source("PDF parsing failed", e))?;

    if document.is_encrypted() {
        return Err(DossierError::extraction_failed("PDF is encrypted"));
    }

    Ok(document)
}

/// Extract the text of every page, in page order.
pub fn extract_page_texts(content: &[u8]) -> Result<Vec<String>> {
    let document = load_document(content)?;
    let pages = document.get_pages();

    let mut page_texts = Vec::with_capacity(pages.len());
    for page_number in pages.keys() {
        let mut text = String::new();
        for chunk in document.extract_text_chunks(&[*page_number]) {
            match chunk {
                Ok(chunk) => text.push_str(&chunk),
                Err(e) => {
                    tracing::warn!(page = *page_number, error = %e, "skipping undecodable PDF text");
                }
            }
        }

        // lopdf terminates every text object with a newline.
        page_texts.push(text.trim_matches(['\n', '\r']).to_string());
    }

    tracing::debug!(pages = page_texts.len(), "extracted PDF pages");
    Ok(page_texts)
}

impl TextExtractor for PdfExtractor {
    fn name(&self) -> &str {
        "pdf-extractor"
    }

    fn format(&self) -> FormatTag {
        FormatTag::Pdf
    }

    fn extract(&self, content: &[u8]) -> Result<String> {
        Ok(extract_page_texts(content)?.join("\n"))
    }
}
