//! Readers that turn an article rendition on disk into cleaned text.

use std::path::Path;

use dataref_common::{Result, TextSource};

use crate::pdf_parser::extract_pdf_text;
use crate::xml_parser::extract_xml_text;

/// Common interface for reading one rendition of an article.
///
/// Implementations return text already passed through the sanitizer. Any
/// failure is reported as an error; the pipeline treats it as "no matches
/// from this source".
pub trait SourceReader: Send + Sync {
    fn read(&self, source: TextSource, path: &Path) -> Result<String>;
}

/// Reads PDFs with lopdf and XML with quick-xml.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileReader;

impl SourceReader for FileReader {
    fn read(&self, source: TextSource, path: &Path) -> Result<String> {
        match source {
            TextSource::Pdf => extract_pdf_text(path),
            TextSource::Xml => extract_xml_text(path),
        }
    }
}
