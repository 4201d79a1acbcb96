//! Opt-in text normalization.
//!
//! Extraction never normalizes on its own. Callers that want cleaner text run
//! [`normalize`] on the extracted string with a [`NormalizationConfig`]. The
//! default profile keeps every Unicode character and only tidies whitespace.
//! [`NormalizationConfig::legacy_ascii`] reproduces the old ASCII-only cleaner
//! and drops all non-ASCII content, so it has to be asked for by name.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

static ANY_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Whitespace regex pattern is valid and should compile"));
static HORIZONTAL_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\S\n]+").expect("Horizontal whitespace regex pattern is valid and should compile"));
static SPACE_AROUND_NEWLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" ?\n ?").expect("Newline padding regex pattern is valid and should compile"));
static NON_PRINTABLE_ASCII: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\x20-\x7E\t\n\r\x0B\x0C]+").expect("Non-printable ASCII regex pattern is valid and should compile")
});

/// How runs of whitespace are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhitespaceMode {
    /// Leave whitespace untouched.
    Preserve,
    /// Collapse spaces and tabs to one space but keep line breaks, so page and
    /// paragraph boundaries survive.
    CollapseHorizontal,
    /// Collapse every whitespace run, line breaks included, to one space.
    #[default]
    CollapseAll,
}

/// Text normalization settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationConfig {
    #[serde(default)]
    pub whitespace: WhitespaceMode,

    /// Replace everything outside printable ASCII with spaces. Lossy.
    #[serde(default)]
    pub ascii_only: bool,

    /// Apply Unicode NFC composition before other steps.
    #[serde(default)]
    pub unicode_nfc: bool,

    /// Strip leading and trailing whitespace.
    #[serde(default = "default_true")]
    pub trim: bool,
}

fn default_true() -> bool {
    true
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            whitespace: WhitespaceMode::CollapseAll,
            ascii_only: false,
            unicode_nfc: false,
            trim: true,
        }
    }
}

impl NormalizationConfig {
    /// The legacy cleaner: collapse whitespace, drop non-ASCII, trim.
    pub fn legacy_ascii() -> Self {
        Self {
            ascii_only: true,
            ..Self::default()
        }
    }

    /// Keep line structure, only tidy spaces.
    pub fn preserve_lines() -> Self {
        Self {
            whitespace: WhitespaceMode::CollapseHorizontal,
            ..Self::default()
        }
    }
}

/// Normalize `text` according to `config`.
///
/// # Example
///
/// ```rust
/// use dossier::text::{NormalizationConfig, normalize};
///
/// let text = "  Zürich   office\n\nrevenue €5m ";
/// assert_eq!(normalize(text, &NormalizationConfig::default()), "Zürich office revenue €5m");
/// assert_eq!(normalize(text, &NormalizationConfig::legacy_ascii()), "Z rich office revenue 5m");
/// ```
pub fn normalize(text: &str, config: &NormalizationConfig) -> String {
    let mut result = if config.unicode_nfc {
        text.nfc().collect::<String>()
    } else {
        text.to_string()
    };

    if config.ascii_only {
        result = NON_PRINTABLE_ASCII.replace_all(&result, " ").into_owned();
    }

    result = match config.whitespace {
        WhitespaceMode::Preserve => result,
        WhitespaceMode::CollapseHorizontal => {
            let collapsed = HORIZONTAL_WHITESPACE.replace_all(&result, " ");
            SPACE_AROUND_NEWLINE.replace_all(&collapsed, "\n").into_owned()
        }
        WhitespaceMode::CollapseAll => ANY_WHITESPACE.replace_all(&result, " ").into_owned(),
    };

    if config.trim {
        result.trim().to_string()
    } else {
        result
    }
}
