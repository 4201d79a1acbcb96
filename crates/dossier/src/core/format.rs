//! Format tag resolution.
//!
//! A document reaches the extractor through one of two tagging paths: the file
//! extension of a remote object, or the declared media type of an upload. Both
//! are folded into the closed [`FormatTag`] enum here, so each logical format has
//! exactly one extraction strategy.

use crate::{DossierError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const DOCX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const PLAIN_TEXT_MIME_TYPE: &str = "text/plain";

/// Final path segment of [`DOCX_MIME_TYPE`], as produced by the upload path.
pub const DOCX_MEDIA_SUFFIX: &str = "vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Structural format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatTag {
    Pdf,
    Docx,
    Txt,
}

impl FormatTag {
    pub const ALL: [FormatTag; 3] = [FormatTag::Pdf, FormatTag::Docx, FormatTag::Txt];

    /// Canonical short name (`pdf`, `docx`, `txt`).
    pub fn as_str(self) -> &'static str {
        match self {
            FormatTag::Pdf => "pdf",
            FormatTag::Docx => "docx",
            FormatTag::Txt => "txt",
        }
    }

    /// Media type uploads of this format are expected to declare.
    pub fn mime_type(self) -> &'static str {
        match self {
            FormatTag::Pdf => PDF_MIME_TYPE,
            FormatTag::Docx => DOCX_MIME_TYPE,
            FormatTag::Txt => PLAIN_TEXT_MIME_TYPE,
        }
    }

    /// Resolve a raw tag as produced by either tagging path.
    ///
    /// Short names are matched case-insensitively. The long DOCX media-type
    /// suffix must match exactly.
    pub fn from_tag(tag: &str) -> Result<Self> {
        if tag == DOCX_MEDIA_SUFFIX {
            return Ok(FormatTag::Docx);
        }

        match tag.to_ascii_lowercase().as_str() {
            "pdf" => Ok(FormatTag::Pdf),
            "docx" => Ok(FormatTag::Docx),
            "txt" => Ok(FormatTag::Txt),
            _ => Err(DossierError::unsupported_format(tag)),
        }
    }

    /// Resolve the tag of a remote object from its path.
    ///
    /// The tag is everything after the last `.` of the whole object path,
    /// lower-cased. A path without any `.` yields the path itself as the tag,
    /// which is never a supported format.
    pub fn from_object_path(path: &str) -> Result<Self> {
        let extension = path.rsplit('.').next().unwrap_or(path).to_ascii_lowercase();
        Self::from_tag(&extension)
    }

    /// Resolve the tag of an upload from its declared media type.
    ///
    /// Parameters such as `; charset=utf-8` are ignored, then the tag is the
    /// segment after the last `/`. `text/plain` resolves to [`FormatTag::Txt`].
    pub fn from_media_type(media_type: &str) -> Result<Self> {
        let essence = media_type.split(';').next().unwrap_or(media_type).trim();
        let suffix = essence.rsplit('/').next().unwrap_or(essence);

        if suffix.eq_ignore_ascii_case("plain") {
            return Ok(FormatTag::Txt);
        }

        Self::from_tag(suffix)
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatTag {
    type Err = DossierError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_tag(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_short_names() {
        assert_eq!(FormatTag::from_tag("pdf").unwrap(), FormatTag::Pdf);
        assert_eq!(FormatTag::from_tag("docx").unwrap(), FormatTag::Docx);
        assert_eq!(FormatTag::from_tag("txt").unwrap(), FormatTag::Txt);
    }

    #[test]
    fn test_from_tag_is_case_insensitive() {
        assert_eq!(FormatTag::from_tag("PDF").unwrap(), FormatTag::Pdf);
        assert_eq!(FormatTag::from_tag("Docx").unwrap(), FormatTag::Docx);
    }

    #[test]
    fn test_long_suffix_aliases_docx() {
        assert_eq!(FormatTag::from_tag(DOCX_MEDIA_SUFFIX).unwrap(), FormatTag::Docx);
    }

    #[test]
    fn test_unknown_tag_is_unsupported() {
        let err = FormatTag::from_tag("xlsx").unwrap_err();
        assert!(matches!(err, DossierError::UnsupportedFormat { ref format_tag } if format_tag == "xlsx"));
    }

    #[test]
    fn test_from_object_path() {
        assert_eq!(FormatTag::from_object_path("a/b/file.pdf").unwrap(), FormatTag::Pdf);
        assert_eq!(FormatTag::from_object_path("Report.DOCX").unwrap(), FormatTag::Docx);
        assert_eq!(FormatTag::from_object_path("notes.v2.txt").unwrap(), FormatTag::Txt);
    }

    #[test]
    fn test_from_object_path_without_extension() {
        let err = FormatTag::from_object_path("deals/README").unwrap_err();
        assert!(matches!(err, DossierError::UnsupportedFormat { ref format_tag } if format_tag == "deals/readme"));
    }

    #[test]
    fn test_from_media_type() {
        assert_eq!(FormatTag::from_media_type("application/pdf").unwrap(), FormatTag::Pdf);
        assert_eq!(FormatTag::from_media_type(DOCX_MIME_TYPE).unwrap(), FormatTag::Docx);
        assert_eq!(FormatTag::from_media_type("text/plain").unwrap(), FormatTag::Txt);
    }

    #[test]
    fn test_from_media_type_ignores_parameters() {
        assert_eq!(
            FormatTag::from_media_type("text/plain; charset=utf-8").unwrap(),
            FormatTag::Txt
        );
    }

    #[test]
    fn test_from_media_type_unsupported() {
        let err = FormatTag::from_media_type("image/png").unwrap_err();
        assert!(matches!(err, DossierError::UnsupportedFormat { ref format_tag } if format_tag == "png"));
    }

    #[test]
    fn test_mime_type_round_trips_through_media_type() {
        for tag in FormatTag::ALL {
            assert_eq!(FormatTag::from_media_type(tag.mime_type()).unwrap(), tag);
        }
    }

    #[test]
    fn test_display_and_from_str() {
        assert_eq!(FormatTag::Docx.to_string(), "docx");
        assert_eq!("txt".parse::<FormatTag>().unwrap(), FormatTag::Txt);
    }
}
