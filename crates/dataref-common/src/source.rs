//! Text renditions an article can be read from.

use std::fmt;

/// Which rendition of an article a piece of text came from.
///
/// `Xml` orders before `Pdf`: when two mentions are otherwise tied, the
/// structured-markup rendition is trusted over the lossier PDF extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextSource {
    Xml,
    Pdf,
}

impl TextSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextSource::Xml => "xml",
            TextSource::Pdf => "pdf",
        }
    }

    /// File extension used when discovering this rendition on disk.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// Sort rank for tie-breaking; XML always wins.
    pub fn preference_rank(&self) -> u8 {
        match self {
            TextSource::Xml => 0,
            TextSource::Pdf => 1,
        }
    }
}

impl fmt::Display for TextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
