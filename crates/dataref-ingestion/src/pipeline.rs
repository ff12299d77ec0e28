//! End-to-end extraction pipeline.
//!
//! Orchestrates the flow for every article:
//!   1. Read + clean the PDF rendition, match patterns, build contexts
//!   2. Same for the XML rendition
//!   3. Concatenate both match lists
//!   4. Deduplicate once per (article, identifier)
//!   5. Append the survivors to the master result set
//!
//! A source that cannot be read is logged and contributes nothing; the
//! article and the batch carry on. Only a broken pattern catalog is fatal,
//! and that surfaces from `Extractor::new` before any article is processed.

use std::path::Path;

use dataref_common::{ExtractionConfig, Result, TextSource};
use tracing::{debug, info, instrument, warn};

use crate::catalog::PatternCatalog;
use crate::dedup::deduplicate;
use crate::discovery::discover_articles;
use crate::matcher::extract_matches;
use crate::models::{ArticleSources, RawMatch};
use crate::output::ResultTable;
use crate::sources::{FileReader, SourceReader};

// ── Run summary ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub articles: usize,
    pub articles_without_rows: usize,
    pub source_failures: usize,
    pub raw_matches: usize,
    pub records: usize,
}

/// What one article produced, before it is folded into the master set.
#[derive(Debug, Clone, Default)]
pub struct ArticleOutcome {
    pub records: Vec<RawMatch>,
    pub raw_matches: usize,
    pub source_failures: usize,
}

// ── Extractor ─────────────────────────────────────────────────────────────────

/// Owns the compiled catalog and the append-only master result set.
pub struct Extractor {
    catalog: PatternCatalog,
    context_window: usize,
    parallel: bool,
    reader: Box<dyn SourceReader>,
    master_results: Vec<RawMatch>,
    summary: RunSummary,
}

impl Extractor {
    /// Build an extractor from configuration. Fails if the catalog cannot be
    /// loaded or any pattern does not compile.
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        config.validate()?;
        let catalog = PatternCatalog::load(&config.catalog)?;
        let mut extractor = Self::with_catalog(catalog, config.context_window);
        extractor.parallel = config.parallel;
        Ok(extractor)
    }

    pub fn with_catalog(catalog: PatternCatalog, context_window: usize) -> Self {
        Self {
            catalog,
            context_window,
            parallel: false,
            reader: Box::new(FileReader),
            master_results: Vec::new(),
            summary: RunSummary::default(),
        }
    }

    /// Swap the file reader, e.g. for an in-memory one.
    pub fn with_reader(mut self, reader: impl SourceReader + 'static) -> Self {
        self.reader = Box::new(reader);
        self
    }

    /// Raw matches for an already-cleaned text.
    pub fn extract_from_text(&self, article_id: &str, source: TextSource, text: &str) -> Vec<RawMatch> {
        extract_matches(text, &self.catalog, article_id, source, self.context_window)
    }

    /// Read, clean and match one rendition.
    pub fn extract_source(&self, article_id: &str, source: TextSource, path: &Path) -> Result<Vec<RawMatch>> {
        let text = self.reader.read(source, path)?;
        let matches = self.extract_from_text(article_id, source, &text);
        debug!(article_id, source = %source, matches = matches.len(), "Source matched");
        Ok(matches)
    }

    /// Everything one article yields, without touching the master set.
    pub fn collect_article(&self, article: &ArticleSources) -> ArticleOutcome {
        let mut outcome = ArticleOutcome::default();
        let mut all_matches = Vec::new();

        for source in [TextSource::Pdf, TextSource::Xml] {
            let Some(path) = article.path_for(source) else {
                continue;
            };
            match self.extract_source(&article.article_id, source, path) {
                Ok(matches) => all_matches.extend(matches),
                Err(e) => {
                    outcome.source_failures += 1;
                    warn!(
                        article_id = %article.article_id,
                        source = %source,
                        path = %path.display(),
                        "Source skipped: {e}"
                    );
                }
            }
        }

        outcome.raw_matches = all_matches.len();
        outcome.records = deduplicate(all_matches);
        outcome
    }

    /// Process one article and append its records to the master set.
    /// Returns the number of records added.
    #[instrument(skip(self, pdf_path, xml_path))]
    pub fn process_article(
        &mut self,
        article_id: &str,
        pdf_path: Option<&Path>,
        xml_path: Option<&Path>,
    ) -> usize {
        let mut article = ArticleSources::new(article_id);
        article.pdf_path = pdf_path.map(Path::to_path_buf);
        article.xml_path = xml_path.map(Path::to_path_buf);

        let outcome = self.collect_article(&article);
        self.absorb(outcome)
    }

    /// Process articles in the given order.
    pub fn process_articles(&mut self, articles: &[ArticleSources]) {
        if self.parallel {
            self.process_articles_parallel(articles);
            return;
        }
        for article in articles {
            let outcome = self.collect_article(article);
            self.absorb(outcome);
        }
    }

    #[cfg(feature = "parallel")]
    fn process_articles_parallel(&mut self, articles: &[ArticleSources]) {
        use rayon::prelude::*;

        // Workers only read; the master set is extended afterwards, in input order.
        let outcomes: Vec<ArticleOutcome> = articles
            .par_iter()
            .map(|article| self.collect_article(article))
            .collect();
        for outcome in outcomes {
            self.absorb(outcome);
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn process_articles_parallel(&mut self, articles: &[ArticleSources]) {
        warn!("Parallel processing requested but the `parallel` feature is disabled; running sequentially");
        self.parallel = false;
        self.process_articles(articles);
    }

    /// Discover every article in the two folders, process them in article-id
    /// order and return the materialized table.
    pub fn run_on_folder(&mut self, pdf_dir: &Path, xml_dir: &Path) -> ResultTable {
        let articles = discover_articles(pdf_dir, xml_dir);
        info!(
            articles = articles.len(),
            patterns = self.catalog.len(),
            context_window = self.context_window,
            "Starting extraction run"
        );

        self.process_articles(&articles);

        info!(
            articles = self.summary.articles,
            source_failures = self.summary.source_failures,
            raw_matches = self.summary.raw_matches,
            records = self.summary.records,
            "Extraction run complete"
        );
        self.to_table()
    }

    /// Master result set in append order.
    pub fn results(&self) -> &[RawMatch] {
        &self.master_results
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn to_table(&self) -> ResultTable {
        ResultTable::from_records(&self.master_results)
    }

    fn absorb(&mut self, outcome: ArticleOutcome) -> usize {
        let added = outcome.records.len();
        self.summary.articles += 1;
        self.summary.source_failures += outcome.source_failures;
        self.summary.raw_matches += outcome.raw_matches;
        self.summary.records += added;
        if added == 0 {
            self.summary.articles_without_rows += 1;
        }
        self.master_results.extend(outcome.records);
        added
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
