//! Format-specific extraction strategies.
//!
//! There is exactly one strategy per [`FormatTag`], selected by an exhaustive
//! match in [`extractor_for`]. Every strategy turns raw bytes into a single
//! string and reports any parser failure as `DossierError::ExtractionFailed`.

pub mod docx;
pub mod pdf;
pub mod text;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use text::PlainTextExtractor;

use crate::Result;
use crate::core::format::FormatTag;

/// A synchronous, stateless text extraction strategy.
pub trait TextExtractor: Send + Sync {
    /// Strategy name used in logs.
    fn name(&self) -> &str;

    /// The format this strategy handles.
    fn format(&self) -> FormatTag;

    /// Extract the text of a whole document.
    fn extract(&self, content: &[u8]) -> Result<String>;
}

static PDF_EXTRACTOR: PdfExtractor = PdfExtractor::new();
static DOCX_EXTRACTOR: DocxExtractor = DocxExtractor::new();
static PLAIN_TEXT_EXTRACTOR: PlainTextExtractor = PlainTextExtractor::new();

/// The strategy registered for `format`.
pub fn extractor_for(format: FormatTag) -> &'static dyn TextExtractor {
    match format {
        FormatTag::Pdf => &PDF_EXTRACTOR,
        FormatTag::Docx => &DOCX_EXTRACTOR,
        FormatTag::Txt => &PLAIN_TEXT_EXTRACTOR,
    }
}
