//! dataref-ingestion — dataset reference mining over article full text.
//! Covers the whole extraction path:
//! - PDF and XML text extraction with a shared sanitizer
//! - Identifier pattern catalog and regex matching
//! - Token-window contexts and keyword scoring
//! - Per-article deduplication across both renditions
//! - Folder discovery, run orchestration and CSV output

pub mod catalog;
pub mod context;
pub mod dedup;
pub mod discovery;
pub mod matcher;
pub mod models;
pub mod output;
pub mod pdf_parser;
pub mod pipeline;
pub mod sanitize;
pub mod scoring;
pub mod sources;
pub mod tokenizer;
pub mod xml_parser;

pub use catalog::{PatternCatalog, BUILTIN_PATTERNS};
pub use models::{ArticleSources, RawMatch, ReferenceRow};
pub use output::ResultTable;
pub use pipeline::{Extractor, RunSummary};
pub use sources::{FileReader, SourceReader};
