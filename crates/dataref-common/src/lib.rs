//! dataref-common — Shared types, errors and configuration used across all dataref crates.

pub mod error;
pub mod extraction_config;
pub mod source;

// Re-export commonly used types
pub use error::{DatarefError, Result};
pub use extraction_config::{CatalogSource, ExtractionConfig};
pub use source::TextSource;
