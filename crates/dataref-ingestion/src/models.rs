//! Data models for the extraction pipeline.

use std::path::PathBuf;

use dataref_common::TextSource;
use serde::Serialize;

/// One regex hit in one rendition of an article.
///
/// `score` is filled lazily by the deduplicator; a match that already carries
/// a score is never re-scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    /// Matched text with all internal whitespace removed.
    pub dataset_id: String,
    /// Catalog entry that produced the match.
    pub pattern_type: String,
    pub article_id: String,
    pub source: TextSource,
    /// Character (not byte) offset of the match start in the cleaned source
    /// text. Compared across renditions, so it must not depend on encoding.
    pub start_idx: usize,
    pub context: String,
    pub score: Option<u32>,
}

/// Input locations for one article. Either rendition may be missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSources {
    pub article_id: String,
    pub pdf_path: Option<PathBuf>,
    pub xml_path: Option<PathBuf>,
}

impl ArticleSources {
    pub fn new(article_id: impl Into<String>) -> Self {
        Self {
            article_id: article_id.into(),
            pdf_path: None,
            xml_path: None,
        }
    }

    pub fn with_pdf(mut self, path: impl Into<PathBuf>) -> Self {
        self.pdf_path = Some(path.into());
        self
    }

    pub fn with_xml(mut self, path: impl Into<PathBuf>) -> Self {
        self.xml_path = Some(path.into());
        self
    }

    pub fn path_for(&self, source: TextSource) -> Option<&PathBuf> {
        match source {
            TextSource::Pdf => self.pdf_path.as_ref(),
            TextSource::Xml => self.xml_path.as_ref(),
        }
    }
}

/// One row of the materialized output table.
/// Serialized field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceRow {
    pub row_id: usize,
    pub article_id: String,
    pub dataset_id: String,
    pub context: String,
}
