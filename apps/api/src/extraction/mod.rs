//! Text extraction — turns an uploaded PDF payload into plain text.
//!
//! Pages are read in document order via `pdf-extract` and joined with a single
//! newline. Whatever the parser yields for one page is kept verbatim.

use std::fmt;

use thiserror::Error;
use tracing::debug;

/// Number of characters shown in the UI preview. Scoring always sees the full text.
pub const PREVIEW_CHARS: usize = 3000;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("uploaded document is empty")]
    Empty,

    #[error("extraction task failed: {0}")]
    Worker(String),
}

/// Plain text of one document. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    text: String,
    page_count: usize,
}

impl ExtractedText {
    fn from_pages(pages: Vec<String>) -> Self {
        let page_count = pages.len();
        Self {
            text: pages.join("\n"),
            page_count,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// First `max_chars` characters, cut on a char boundary.
    /// The flag reports whether anything was dropped.
    pub fn preview(&self, max_chars: usize) -> (&str, bool) {
        match self.text.char_indices().nth(max_chars) {
            Some((byte_idx, _)) => (&self.text[..byte_idx], true),
            None => (&self.text, false),
        }
    }
}

impl fmt::Display for ExtractedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Extracts text from an in-memory PDF. Blocking; CPU bound on large files.
pub fn extract_text(pdf_bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
    if pdf_bytes.is_empty() {
        return Err(ExtractionError::Empty);
    }

    let pages = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
        .map_err(|e| ExtractionError::PdfParsing(e.to_string()))?;

    let text = ExtractedText::from_pages(pages);
    debug!(
        "Extracted {} chars from {} page(s)",
        text.as_str().chars().count(),
        text.page_count()
    );
    Ok(text)
}

/// Runs [`extract_text`] on the blocking pool. The payload is consumed and
/// dropped as soon as parsing finishes. A panic inside the parser is reported
/// as an extraction failure for this request only.
pub async fn extract_text_blocking(pdf_bytes: Vec<u8>) -> Result<ExtractedText, ExtractionError> {
    tokio::task::spawn_blocking(move || extract_text(&pdf_bytes))
        .await
        .map_err(|e| ExtractionError::Worker(e.to_string()))?
}
