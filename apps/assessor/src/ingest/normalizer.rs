//! Text Normalizer: reduces a CV document to a single plain-text body.
//!
//! - `application/pdf` bytes: text of every page, concatenated in page order
//! - any other bytes: strict UTF-8 decode
//! - text: unchanged

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::errors::DecodeError;
use crate::models::document::{is_pdf_media_type, Document};

/// Normalizes a document into the plain text used for every extraction prompt.
pub fn normalize(document: &Document) -> Result<String, DecodeError> {
    match document {
        Document::Text(text) => Ok(text.clone()),
        Document::Binary {
            content,
            media_type,
        } => normalize_content(content, media_type),
    }
}

/// Byte-level entry point for callers that hold raw upload content and its media type.
pub fn normalize_content(content: &[u8], media_type: &str) -> Result<String, DecodeError> {
    if is_pdf_media_type(media_type) {
        extract_text_from_pdf(content)
    } else {
        let text = String::from_utf8(content.to_vec())?;
        debug!("Decoded {} bytes of {media_type} as UTF-8", content.len());
        Ok(text)
    }
}

/// Concatenates the extracted text of every page. No separator is inserted
/// beyond what page extraction itself yields.
///
/// `pdf-extract` panics on some structurally broken documents (missing
/// resources or fonts); those panics are contained and reported as `DecodeError::Pdf`.
fn extract_text_from_pdf(pdf_bytes: &[u8]) -> Result<String, DecodeError> {
    let extracted = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
    }))
    .map_err(|payload| {
        let reason = panic_message(payload.as_ref());
        warn!("PDF extraction panicked: {reason}");
        DecodeError::Pdf(format!("extractor aborted on malformed document: {reason}"))
    })?;
    let pages = extracted.map_err(|e| DecodeError::Pdf(e.to_string()))?;

    if pages.is_empty() {
        return Err(DecodeError::Pdf("document has no pages".to_string()));
    }

    let text: String = pages.concat();
    debug!(
        "Extracted {} chars from {} PDF page(s)",
        text.chars().count(),
        pages.len()
    );
    Ok(text)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
