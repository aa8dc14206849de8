// uniwatch - platform/document.rs
//
// PDF decoding: raw document bytes -> ordered per-page text blocks.
// The pdf-extract dependency is confined to this module; everything
// downstream works on plain `Vec<String>` page blocks.

use crate::util::error::DocumentError;

/// Decode the catalog document into one text block per page.
///
/// A page with no extractable text yields an empty string in its slot --
/// the extractor skips such pages silently, so page numbering stays
/// aligned with the source document. Only a document that cannot be
/// opened at all is an error.
pub fn extract_page_texts(bytes: &[u8]) -> Result<Vec<String>, DocumentError> {
    let pages =
        pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|e| DocumentError::Decode {
            reason: e.to_string(),
        })?;

    tracing::debug!(pages = pages.len(), "Decoded catalog document");
    Ok(pages)
}
