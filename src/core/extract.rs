// uniwatch - core/extract.rs
//
// Tabular extractor: walks the per-page text blocks of the catalog
// document and emits (ISIN, name) records. Core layer: operates on
// strings only, never touches the document format or the filesystem.
//
// Recovery model: malformed lines and empty pages are never errors.
// A line that does not tokenise into a valid identifier/name pair is
// silently skipped and extraction continues with the next line.

use crate::core::isin::is_valid_isin;
use crate::core::model::InstrumentRecord;
use crate::util::constants::{ISIN_COLUMN_HEADER, SECTION_TITLE_MARKER};

/// Extract instrument records from an ordered sequence of page-text blocks.
///
/// Each block is the full extracted text of one document page; a block may
/// be empty when the page had no extractable text (contributes zero
/// records). Line handling per page:
///
/// 1. Skip column-header lines (`ISIN ...`), section-title lines
///    (containing `TRADING UNIVERSE`), and blank lines.
/// 2. Tokenise on whitespace. With at least 2 tokens, the first token is
///    the identifier candidate and the rest, rejoined with single spaces,
///    is the name.
/// 3. Emit only candidates that pass [`is_valid_isin`] after trimming.
///
/// Output is in document order and may contain duplicate ISINs; the
/// snapshot layer deduplicates. Identifier case is preserved here.
pub fn extract_records(pages: &[String]) -> Vec<InstrumentRecord> {
    let mut records = Vec::new();
    let mut skipped_lines: u64 = 0;

    for (page_idx, page) in pages.iter().enumerate() {
        if page.trim().is_empty() {
            tracing::debug!(page = page_idx + 1, "Page has no extractable text");
            continue;
        }

        for line in page.lines() {
            if line.starts_with(ISIN_COLUMN_HEADER)
                || line.contains(SECTION_TITLE_MARKER)
                || line.trim().is_empty()
            {
                continue;
            }

            let mut tokens = line.split_whitespace();
            let candidate = match tokens.next() {
                Some(t) => t.trim(),
                None => continue,
            };

            let name = tokens.collect::<Vec<_>>().join(" ");
            if name.is_empty() {
                // Fewer than 2 tokens: no name column, not an instrument row.
                skipped_lines += 1;
                continue;
            }

            if is_valid_isin(candidate) {
                records.push(InstrumentRecord::new(candidate, name));
            } else {
                skipped_lines += 1;
            }
        }
    }

    tracing::debug!(
        pages = pages.len(),
        records = records.len(),
        skipped = skipped_lines,
        "Extraction complete"
    );

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(text: &str) -> Vec<String> {
        vec![text.to_string()]
    }

    #[test]
    fn test_extracts_identifier_and_name() {
        let pages = page("DE000BASF111 BASF SE O.N.\nUS0378331005 Apple Inc.\n");
        let records = extract_records(&pages);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].isin, "DE000BASF111");
        assert_eq!(records[0].name, "BASF SE O.N.");
        assert_eq!(records[1].isin, "US0378331005");
        assert_eq!(records[1].name, "Apple Inc.");
    }

    #[test]
    fn test_skips_header_title_and_blank_lines() {
        let pages = page(
            "ISIN Name\n\
             STOCKS TRADING UNIVERSE 2026\n\
             \n\
             DE000BASF111 BASF SE\n\
             ISIN\n",
        );
        let records = extract_records(&pages);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].isin, "DE000BASF111");
    }

    #[test]
    fn test_skips_malformed_lines_without_aborting() {
        let pages = page(
            "not-an-isin Some Company\n\
             DE000BASF111 BASF SE\n\
             DE000BASF1 Truncated Identifier Co\n\
             SingleToken\n\
             US0378331005 Apple Inc.\n",
        );
        let records = extract_records(&pages);
        let isins: Vec<_> = records.iter().map(|r| r.isin.as_str()).collect();
        assert_eq!(isins, ["DE000BASF111", "US0378331005"]);
    }

    #[test]
    fn test_requires_a_name_column() {
        // A lone valid ISIN with no name tokens is not an instrument row.
        let pages = page("DE000BASF111\n");
        assert!(extract_records(&pages).is_empty());
    }

    #[test]
    fn test_rejoins_name_tokens_with_single_spaces() {
        let pages = page("DE000BASF111   BASF    SE   O.N.  \n");
        let records = extract_records(&pages);
        assert_eq!(records[0].name, "BASF SE O.N.");
    }

    #[test]
    fn test_empty_pages_contribute_zero_records() {
        let pages = vec![
            String::new(),
            "DE000BASF111 BASF SE\n".to_string(),
            "   \n  ".to_string(),
        ];
        let records = extract_records(&pages);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_preserves_document_order_and_duplicates() {
        let pages = vec![
            "US0378331005 Apple Inc.\nDE000BASF111 BASF SE\n".to_string(),
            "US0378331005 Apple Inc. (again)\n".to_string(),
        ];
        let records = extract_records(&pages);
        let isins: Vec<_> = records.iter().map(|r| r.isin.as_str()).collect();
        // Duplicates survive extraction; dedupe is the snapshot's job.
        assert_eq!(isins, ["US0378331005", "DE000BASF111", "US0378331005"]);
    }

    #[test]
    fn test_case_preserved_at_extraction_stage() {
        let pages = page("de000basf111 BASF SE\n");
        let records = extract_records(&pages);
        assert_eq!(records[0].isin, "de000basf111");
    }

    #[test]
    fn test_extraction_is_idempotent_on_identical_input() {
        let pages = vec![
            "DE000BASF111 BASF SE\nUS0378331005 Apple Inc.\n".to_string(),
            "garbage line here\nNL0000235190 Airbus SE\n".to_string(),
        ];
        let first = extract_records(&pages);
        let second = extract_records(&pages);
        assert_eq!(first, second);
    }
}
