//! Pair up the PDF and XML renditions of each article on disk.
//!
//! Articles are keyed by file stem: `PDF/10.1002_x.pdf` and `XML/10.1002_x.xml`
//! are the same article. Only the top level of each folder is scanned.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use dataref_common::TextSource;
use tracing::{info, warn};

use crate::models::ArticleSources;

/// Every article found in either folder, sorted by article id.
pub fn discover_articles(pdf_dir: &Path, xml_dir: &Path) -> Vec<ArticleSources> {
    let mut articles: BTreeMap<String, ArticleSources> = BTreeMap::new();

    for (article_id, path) in list_by_stem(pdf_dir, TextSource::Pdf) {
        articles
            .entry(article_id.clone())
            .or_insert_with(|| ArticleSources::new(article_id))
            .pdf_path = Some(path);
    }
    for (article_id, path) in list_by_stem(xml_dir, TextSource::Xml) {
        articles
            .entry(article_id.clone())
            .or_insert_with(|| ArticleSources::new(article_id))
            .xml_path = Some(path);
    }

    let both = articles
        .values()
        .filter(|a| a.pdf_path.is_some() && a.xml_path.is_some())
        .count();
    info!(articles = articles.len(), with_both_sources = both, "Articles discovered");

    articles.into_values().collect()
}

/// `(stem, path)` for every file in `dir` with the source's extension, one
/// per stem. When extensions differ only in case (`x.pdf`, `x.PDF`) the first
/// path in sorted order is kept.
fn list_by_stem(dir: &Path, source: TextSource) -> Vec<(String, PathBuf)> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), source = %source, "Cannot list folder: {e}");
            return Vec::new();
        }
    };

    let mut found = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(source.extension()));
        if !matches_ext {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            found.push((stem.to_string(), path.clone()));
        }
    }

    // read_dir order is platform dependent.
    found.sort_by(|a, b| a.1.cmp(&b.1));
    let mut seen = HashSet::new();
    found.retain(|(stem, path)| {
        let first = seen.insert(stem.clone());
        if !first {
            warn!(path = %path.display(), source = %source, "Duplicate article file ignored");
        }
        first
    });
    found
}
