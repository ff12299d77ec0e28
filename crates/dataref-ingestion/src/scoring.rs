//! Keyword heuristics for ranking the contexts of one identifier.
//!
//! Matching is case-insensitive substring containment, not word matching:
//! "used" also hits "unused" and "refused". Each keyword counts at most once
//! per context. The lists are fixed; changing them changes every score.

/// Verbs implying the dataset was produced or actively used (+3 each).
pub const USAGE_KEYWORDS: &[&str] = &[
    "used", "generated", "collected", "curated", "analyzed", "assembled", "created",
    "constructed", "compiled", "built", "gathered", "obtained", "employed", "leveraged",
    "utilized", "processed", "performed on", "applied to", "mapped",
];

/// Verbs implying retrieval or availability (+2 each).
pub const ACCESS_KEYWORDS: &[&str] = &[
    "downloaded", "retrieved", "accessed", "available from", "available at",
    "accessible", "submitted to", "hosted on", "obtained from", "released by",
    "found at", "acquired", "provided by", "supplied by", "linked from",
];

/// Verbs implying a passive reference (+1 each).
pub const CITATION_KEYWORDS: &[&str] = &[
    "refer to", "cited", "listed", "archived in", "included in", "mentioned",
    "reported in", "registered in", "source for", "data from",
];

pub const USAGE_WEIGHT: u32 = 3;
pub const ACCESS_WEIGHT: u32 = 2;
pub const CITATION_WEIGHT: u32 = 1;

/// Score a context string. Order of keywords in the text does not matter.
pub fn score_context(context: &str) -> u32 {
    let lower = context.to_lowercase();
    let hits = |keywords: &[&str]| keywords.iter().filter(|kw| lower.contains(*kw)).count() as u32;

    hits(USAGE_KEYWORDS) * USAGE_WEIGHT
        + hits(ACCESS_KEYWORDS) * ACCESS_WEIGHT
        + hits(CITATION_KEYWORDS) * CITATION_WEIGHT
}
