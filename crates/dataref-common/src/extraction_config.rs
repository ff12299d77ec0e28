//! Extraction settings shared by the engine and the CLI.
//!
//! Loaded from the `[extraction]` table of `dataref.toml`; every field has a
//! default so an empty table (or no file at all) is valid.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{DatarefError, Result};

/// Engine configuration, fixed for the lifetime of one extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Tokens kept on each side of a match when building its context.
    #[serde(default = "default_context_window")]
    pub context_window: usize,

    /// Where the identifier pattern catalog comes from.
    #[serde(default)]
    pub catalog: CatalogSource,

    /// Process articles on a worker pool (needs the `parallel` feature).
    #[serde(default)]
    pub parallel: bool,
}

fn default_context_window() -> usize { 40 }

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            context_window: default_context_window(),
            catalog: CatalogSource::default(),
            parallel: false,
        }
    }
}

impl ExtractionConfig {
    pub fn validate(&self) -> Result<()> {
        if let CatalogSource::File(path) = &self.catalog {
            if path.as_os_str().is_empty() {
                return Err(DatarefError::Config("catalog path is empty".to_string()));
            }
        }
        Ok(())
    }
}

// ── Catalog source ────────────────────────────────────────────────────────────

/// `"builtin"` selects the bundled catalog; anything else is a path to a
/// TOML catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CatalogSource {
    #[default]
    Builtin,
    File(PathBuf),
}

impl From<String> for CatalogSource {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("builtin") {
            CatalogSource::Builtin
        } else {
            CatalogSource::File(PathBuf::from(value))
        }
    }
}

impl From<CatalogSource> for String {
    fn from(value: CatalogSource) -> Self {
        match value {
            CatalogSource::Builtin => "builtin".to_string(),
            CatalogSource::File(path) => path.display().to_string(),
        }
    }
}
