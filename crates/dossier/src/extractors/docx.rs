//! DOCX text extractor.
//!
//! A DOCX file is a ZIP container whose main part, `word/document.xml`, holds the
//! body as a sequence of `w:p` paragraphs. We read that part with `zip`, parse it
//! with `roxmltree` and emit one line per body-level paragraph.

use super::TextExtractor;
use crate::core::format::FormatTag;
use crate::{DossierError, Result};
use roxmltree::{Document, Node};
use std::io::{Cursor, Read};

const DOCUMENT_PART: &str = "word/document.xml";

/// Paragraph-oriented DOCX extractor.
///
/// Paragraphs are emitted in document order and joined with `\n`. Empty
/// paragraphs are kept as empty lines. Tables, text boxes and headers are not
/// part of the body paragraph sequence and are skipped.
pub struct DocxExtractor;

impl DocxExtractor {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn read_document_part(content: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(content))
        .map_err(|e| DossierError::extraction_failed_with_source("failed to open DOCX container", e))?;

    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| DossierError::extraction_failed_with_source(format!("DOCX is missing {}", DOCUMENT_PART), e))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| DossierError::extraction_failed_with_source(format!("failed to read {}", DOCUMENT_PART), e))?;

    Ok(xml)
}

/// Extract the text of every body-level paragraph, in document order.
///
/// Paragraphs wrapped in block-level content controls (`w:sdt`) count as body
/// paragraphs.
pub fn extract_paragraphs(content: &[u8]) -> Result<Vec<String>> {
    let xml = read_document_part(content)?;
    let document = Document::parse(&xml)
        .map_err(|e| DossierError::extraction_failed_with_source(format!("malformed XML in {}", DOCUMENT_PART), e))?;

    let body = document
        .root_element()
        .children()
        .find(|node| node.tag_name().name() == "body")
        .ok_or_else(|| DossierError::extraction_failed(format!("{} has no w:body element", DOCUMENT_PART)))?;

    let mut paragraphs = Vec::new();
    collect_body_paragraphs(body, &mut paragraphs);

    tracing::debug!(paragraphs = paragraphs.len(), "extracted DOCX paragraphs");
    Ok(paragraphs)
}

fn collect_body_paragraphs(parent: Node, paragraphs: &mut Vec<String>) {
    for node in parent.children().filter(|n| n.is_element()) {
        match node.tag_name().name() {
            "p" => paragraphs.push(paragraph_text(node)),
            "sdt" => {
                if let Some(sdt_content) = node.children().find(|c| c.tag_name().name() == "sdtContent") {
                    collect_body_paragraphs(sdt_content, paragraphs);
                }
            }
            _ => {}
        }
    }
}

/// Text of a single paragraph: run text plus tabs and line breaks.
fn paragraph_text(paragraph: Node) -> String {
    let mut text = String::new();
    append_run_content(paragraph, &mut text);
    text
}

fn append_run_content(node: Node, text: &mut String) {
    for child in node.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "t" => {
                if let Some(value) = child.text() {
                    text.push_str(value);
                }
            }
            "tab" | "ptab" => text.push('\t'),
            "br" | "cr" => text.push('\n'),
            "noBreakHyphen" => text.push('-'),
            // Deleted revisions, field codes and floating content are not paragraph text.
            "del" | "delText" | "instrText" | "txbxContent" | "pPr" | "rPr" => {}
            _ => append_run_content(child, text),
        }
    }
}

impl TextExtractor for DocxExtractor {
    fn name(&self) -> &str {
        "docx-extractor"
    }

    fn format(&self) -> FormatTag {
        FormatTag::Docx
    }

    fn extract(&self, content: &[u8]) -> Result<String> {
        Ok(extract_paragraphs(content)?.join("\n"))
    }
}
