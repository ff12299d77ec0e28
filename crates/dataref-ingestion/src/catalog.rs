//! Dataset / accession identifier pattern catalog.
//!
//! Several entries need look-ahead assertions, so patterns are compiled with
//! `fancy-regex` rather than `regex`. Compilation happens once, up front: a
//! broken pattern aborts the run before any article is touched.

use std::path::Path;

use dataref_common::{CatalogSource, DatarefError, Result};
use fancy_regex::Regex;
use serde::Deserialize;
use tracing::info;

/// A named, compiled identifier pattern.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub name: String,
    pub regex: Regex,
}

/// Ordered set of compiled patterns. Order is declaration order and decides
/// the order raw matches are emitted in.
#[derive(Debug, Clone, Default)]
pub struct PatternCatalog {
    patterns: Vec<CompiledPattern>,
}

impl PatternCatalog {
    /// Compile `(name, regex)` entries. Names must be unique.
    pub fn new<N, P, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: AsRef<str>,
    {
        let mut patterns: Vec<CompiledPattern> = Vec::new();
        for (name, pattern) in entries {
            let name = name.into();
            if patterns.iter().any(|p| p.name == name) {
                return Err(DatarefError::InvalidPattern {
                    name,
                    reason: "duplicate pattern name".to_string(),
                });
            }
            let regex = Regex::new(pattern.as_ref()).map_err(|e| DatarefError::InvalidPattern {
                name: name.clone(),
                reason: e.to_string(),
            })?;
            patterns.push(CompiledPattern { name, regex });
        }
        Ok(Self { patterns })
    }

    /// The bundled catalog of dataset and accession identifiers.
    pub fn builtin() -> Result<Self> {
        Self::new(BUILTIN_PATTERNS.iter().copied())
    }

    /// Load a catalog from a TOML file of `[[pattern]]` tables.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        if file.pattern.is_empty() {
            return Err(DatarefError::Config("pattern catalog has no entries".to_string()));
        }
        Self::new(file.pattern.into_iter().map(|e| (e.name, e.regex)))
    }

    /// Resolve a configured catalog source.
    pub fn load(source: &CatalogSource) -> Result<Self> {
        let catalog = match source {
            CatalogSource::Builtin => Self::builtin()?,
            CatalogSource::File(path) => Self::from_toml_file(path)?,
        };
        info!(patterns = catalog.len(), source = ?source, "Pattern catalog compiled");
        Ok(catalog)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledPattern> {
        self.patterns.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    pattern: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    name: String,
    regex: String,
}

// ── Bundled catalog ───────────────────────────────────────────────────────────

pub const BUILTIN_PATTERNS: &[(&str, &str)] = &[
    // DOI formats
    ("doi_short", r"https?\s*:\s*/\s*/\s*(?:doi\.org|dx\.doi\.org)\s*/\s*10\.\d{4,9}/[A-Za-z0-9._\-()/]+\b"),
    ("doi_long", r"\bhttps?://(?:doi\.org|dx\.doi\.org)/10\.\d{4,9}/[A-Za-z0-9._\-()/]+(?: [A-Za-z0-9._\-()/]+)\b"),
    ("doi_xml", r"\bdoi:\s*10\.\d{4,9}/[A-Za-z0-9._\-()/]+\b"),
    // BioSample / BioProject
    ("SAMN BioSample", r"\bSAMN\d{8,}\b"),
    ("PRJNA (BioProject)", r"\bPRJNA\d+\b"),
    // Virus / sequence databases
    ("EPI_ISL (GISAID)", r"\bEPI_ISL_\d+"),
    ("EPI Short (Legacy)", r"\bEPI\d{6,}\b"),
    ("SRX/SRR/SRP", r"\bSR[PXR]\d{6,}\b"),
    // Protein & enzyme databases
    ("UniProt ID", r"\b[OPQ][0-9][A-Z0-9]{3}[0-9]\b"),
    ("EC Numbers", r"\b\d+\.\d+\.\d+\.\d+\b"),
    ("ENSEMBL Gene ENSMMUT", r"\bENSMMUT\d{11,}\b"),
    ("ENSEMBL Gene ENSBTAG", r"\bENSBTAG\d{11,}\b"),
    ("ENSEMBL Gene ENSOARG", r"\bENSOARG\d{11,}\b"),
    // Chemical / structure databases
    ("CHEMBL", r"\bCHEMBL\d+\b"),
    ("IPR", r"\bIPR\d{6,}\b"),
    ("PF", r"\bPF\d{5,}\b"),
    ("KEGG K Numbers", r"\bK\d{5,}\b"),
    ("PDB ID", r"\b[1-9](?:[a-z]{2}[a-z0-9]|[a-z][a-z0-9][a-z]|[a-z0-9][a-z]{2})\b"),
    ("Short Alphanumeric ID (PDB-like)", r"\b[0-9](?:[A-Z]{2}[A-Z0-9]|[A-Z][A-Z0-9][A-Z]|[A-Z0-9][A-Z]{2})\b"),
    // Expression & proteomics
    ("E-GEOD (GEO)", r"\bE-GEOD-\d{5,}\b"),
    ("GSE", r"\bGSE\d{5,}\b"),
    ("E-PROT (Expression Atlas)", r"\bE-PROT-\d{2,}\b"),
    ("PXD (ProteomeXchange)", r"\bPXD\d{6,}\b"),
    // Imaging
    ("EMPIAR", r"\bEMPIAR-\d{5,}\b"),
    ("HPA ID", r"\bHPA\d{6,}\b"),
    // GenBank / RefSeq
    ("CP GenBank/RefSeq", r"\bCP\d{6,}\b"),
    ("NC_ RefSeq", r"\bNC_\d+\.\d+\b"),
    ("NM_ RefSeq", r"\bNM_\d+\b"),
    // Cell lines
    ("CVCL (Cellosaurus)", r"\bCVCL_\w{4,}\b"),
    // Other identifiers
    ("rs ID", r"\brs\d{6,}\b"),
    ("CAB ID", r"\bCAB\d{6,}\b"),
    ("KX ID", r"\bKX\d{6,}\b"),
    ("BX ID", r"\bBX\d+\b"),
    ("STH ID", r"\bSTH\d+\b"),
    ("F ID", r"\bF(?=[A-Z0-9]{5,})(?=(?:.*\d){2,})(?=(?:.*[A-Z]){2,})[A-Z0-9]+\b"),
    ("D ID", r"\bD\d{5,}\b"),
    ("ERR ID (ENA Run)", r"\bERR\d+\b"),
    ("MODEL ID", r"\bMODEL\d+\b"),
];
