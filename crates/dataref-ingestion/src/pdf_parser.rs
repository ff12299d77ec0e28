//! PDF text extraction via lopdf.
//!
//! Pages are extracted one at a time so a single undecodable page does not
//! lose the rest of the document. The result is passed through the sanitizer.

use std::path::Path;

use dataref_common::{DatarefError, Result, TextSource};
use lopdf::Document as PdfDoc;
use tracing::{debug, warn};

use crate::sanitize::clean_text;

/// Read a PDF and return its cleaned full text.
pub fn extract_pdf_text(pdf_path: &Path) -> Result<String> {
    let raw = extract_raw_pdf_text(pdf_path)?;
    Ok(clean_text(&raw))
}

/// Raw page text concatenated in page order, before cleanup.
pub fn extract_raw_pdf_text(pdf_path: &Path) -> Result<String> {
    let pdf = PdfDoc::load(pdf_path)
        .map_err(|e| DatarefError::source_read(TextSource::Pdf, pdf_path, e))?;

    let pages = pdf.get_pages();
    if pages.is_empty() {
        return Err(DatarefError::source_read(TextSource::Pdf, pdf_path, "document has no pages"));
    }

    let mut full_text = String::from(" ");
    let mut failed = 0usize;
    for &page_num in pages.keys() {
        match pdf.extract_text(&[page_num]) {
            Ok(text) => {
                full_text.push_str(&text);
                full_text.push('\n');
            }
            Err(e) => {
                failed += 1;
                warn!(path = %pdf_path.display(), page = page_num, "Skipping unreadable PDF page: {e}");
            }
        }
    }

    if failed == pages.len() {
        return Err(DatarefError::source_read(
            TextSource::Pdf,
            pdf_path,
            "no page could be decoded",
        ));
    }

    debug!(path = %pdf_path.display(), pages = pages.len(), failed, chars = full_text.len(), "PDF text extracted");
    Ok(full_text)
}
