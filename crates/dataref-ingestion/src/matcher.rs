//! Runs every catalog pattern over a cleaned text and turns the hits into
//! raw matches with their token-window context attached.

use dataref_common::TextSource;
use tracing::{debug, warn};

use crate::catalog::PatternCatalog;
use crate::context::window;
use crate::models::RawMatch;
use crate::tokenizer::TokenIndex;

/// Extract raw matches from one cleaned text.
///
/// Every pattern contributes every non-overlapping match, so one span may
/// appear once per pattern that matches it. Matches whose start cannot be
/// anchored to a token are dropped.
pub fn extract_matches(
    text: &str,
    catalog: &PatternCatalog,
    article_id: &str,
    source: TextSource,
    context_window: usize,
) -> Vec<RawMatch> {
    let index = TokenIndex::build(text);
    let mut matches = Vec::new();

    for pattern in catalog.iter() {
        let before = matches.len();
        let mut offsets = CharOffsets::new(text);
        for found in pattern.regex.find_iter(text) {
            let m = match found {
                Ok(m) => m,
                Err(e) => {
                    warn!(
                        article_id,
                        source = %source,
                        pattern = %pattern.name,
                        "Regex engine error, skipping rest of pattern: {e}"
                    );
                    break;
                }
            };

            let Some(token_index) = index.token_at(m.start()) else {
                continue;
            };

            matches.push(RawMatch {
                dataset_id: strip_whitespace(m.as_str()),
                pattern_type: pattern.name.clone(),
                article_id: article_id.to_string(),
                source,
                start_idx: offsets.char_offset(m.start()),
                context: window(token_index, index.tokens(), context_window),
                score: None,
            });
        }

        let found = matches.len() - before;
        if found > 0 {
            debug!(article_id, source = %source, pattern = %pattern.name, found, "Pattern matched");
        }
    }

    matches
}

/// Converts increasing byte offsets of one text into character offsets
/// without rescanning from the start each time.
struct CharOffsets<'a> {
    text: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharOffsets<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, byte: 0, chars: 0 }
    }

    /// `byte` must be a char boundary and must not go backwards.
    fn char_offset(&mut self, byte: usize) -> usize {
        if byte < self.byte {
            self.byte = 0;
            self.chars = 0;
        }
        self.chars += self.text[self.byte..byte].chars().count();
        self.byte = byte;
        self.chars
    }
}

/// Remove all whitespace, e.g. `doi: 10.1234/x` → `doi:10.1234/x`.
pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(entries: &[(&str, &str)]) -> PatternCatalog {
        PatternCatalog::new(entries.iter().copied()).unwrap()
    }

    #[test]
    fn test_biosample_match_with_context() {
        let text = "The SAMN00000001 dataset was generated and deposited.";
        let cat = catalog(&[("SAMN BioSample", r"\bSAMN\d{8,}\b")]);
        let matches = extract_matches(text, &cat, "art1", TextSource::Xml, 5);
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.dataset_id, "SAMN00000001");
        assert_eq!(m.pattern_type, "SAMN BioSample");
        assert_eq!(m.start_idx, 4);
        assert_eq!(m.context, text);
        assert_eq!(m.score, None);
    }

    #[test]
    fn test_whitespace_stripped_from_dataset_id() {
        let text = "see doi: 10.1234/xyz for details";
        let cat = catalog(&[("doi_xml", r"\bdoi:\s*10\.\d{4,9}/[A-Za-z0-9._\-()/]+\b")]);
        let matches = extract_matches(text, &cat, "art1", TextSource::Pdf, 2);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].dataset_id, "doi:10.1234/xyz");
        assert_eq!(matches[0].context, "see doi: 10.1234/xyz for");
    }

    #[test]
    fn test_same_span_matches_two_patterns() {
        let text = "structure 1ABC was solved";
        let cat = catalog(&[
            ("Short Alphanumeric ID (PDB-like)", r"\b[0-9](?:[A-Z]{2}[A-Z0-9]|[A-Z][A-Z0-9][A-Z]|[A-Z0-9][A-Z]{2})\b"),
            ("Generic", r"\b\d[A-Z]{3}\b"),
        ]);
        let matches = extract_matches(text, &cat, "art1", TextSource::Xml, 3);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].dataset_id, matches[1].dataset_id);
        assert_ne!(matches[0].pattern_type, matches[1].pattern_type);
    }

    #[test]
    fn test_every_occurrence_emitted() {
        let text = "GSE12345 first and GSE12345 again";
        let cat = catalog(&[("GSE", r"\bGSE\d{5,}\b")]);
        let matches = extract_matches(text, &cat, "art1", TextSource::Pdf, 1);
        let starts: Vec<usize> = matches.iter().map(|m| m.start_idx).collect();
        assert_eq!(starts, vec![0, 19]);
    }

    #[test]
    fn test_start_idx_counts_characters_not_bytes() {
        let text = "éééééé abcd GSE12345 end GSE67890";
        let cat = catalog(&[("GSE", r"\bGSE\d{5,}\b")]);
        let matches = extract_matches(text, &cat, "art1", TextSource::Xml, 1);
        let starts: Vec<usize> = matches.iter().map(|m| m.start_idx).collect();
        assert_eq!(starts, vec![12, 25]);
        assert_eq!(matches[0].context, "abcd GSE12345 end");
    }

    #[test]
    fn test_match_starting_in_whitespace_dropped() {
        let text = "id  GSE12345";
        let cat = catalog(&[("space-led", r" GSE\d+")]);
        let matches = extract_matches(text, &cat, "art1", TextSource::Xml, 1);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_no_matches_in_empty_text() {
        let cat = PatternCatalog::builtin().unwrap();
        assert!(extract_matches("", &cat, "art1", TextSource::Xml, 40).is_empty());
    }
}
