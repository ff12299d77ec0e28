//! Configuration loading for dataref.
//! Reads dataref.toml from the current directory or the path in DATAREF_CONFIG.
//! Every field has a default, so a missing file is not an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use dataref_common::{CatalogSource, ExtractionConfig};

pub const CONFIG_ENV_VAR: &str = "DATAREF_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "dataref.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_pdf_dir")]
    pub pdf_dir: PathBuf,
    #[serde(default = "default_xml_dir")]
    pub xml_dir: PathBuf,
}

fn default_pdf_dir() -> PathBuf { PathBuf::from("data/PDF") }
fn default_xml_dir() -> PathBuf { PathBuf::from("data/XML") }

impl Default for InputConfig {
    fn default() -> Self {
        Self { pdf_dir: default_pdf_dir(), xml_dir: default_xml_dir() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

fn default_output_path() -> PathBuf { PathBuf::from("dataset_references.csv") }

impl Default for OutputConfig {
    fn default() -> Self {
        Self { path: default_output_path() }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub pdf_dir: Option<PathBuf>,
    pub xml_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub context_window: Option<usize>,
    pub catalog: Option<String>,
    pub parallel: bool,
}


impl Config {
    /// Load configuration from dataref.toml.
    /// An explicit path wins, then DATAREF_CONFIG, then the current directory.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => std::env::var(CONFIG_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE)),
        };

        if !path.exists() {
            if explicit.is_some() {
                tracing::warn!("Config file not found: {}, using defaults", path.display());
            } else {
                tracing::debug!("No config file at {}, using defaults", path.display());
            }
            return Ok(Self::default());
        }

        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {e}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.extraction.validate()?;
        Ok(config)
    }

    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(dir) = overrides.pdf_dir {
            self.input.pdf_dir = dir;
        }
        if let Some(dir) = overrides.xml_dir {
            self.input.xml_dir = dir;
        }
        if let Some(path) = overrides.output {
            self.output.path = path;
        }
        if let Some(window) = overrides.context_window {
            self.extraction.context_window = window;
        }
        if let Some(catalog) = overrides.catalog {
            self.extraction.catalog = CatalogSource::from(catalog);
        }
        if overrides.parallel {
            self.extraction.parallel = true;
        }
    }
}
