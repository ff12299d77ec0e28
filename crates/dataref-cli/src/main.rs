//! dataref — mine dataset and accession identifiers from article full text.
//! Entry point for the command-line binary.

mod config;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dataref_ingestion::Extractor;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{Config, Overrides};

#[derive(Parser, Debug)]
#[command(name = "dataref")]
#[command(version, about = "Find dataset references in PDF and XML articles and write them to CSV")]
struct Cli {
    /// Config file (defaults to $DATAREF_CONFIG, then ./dataref.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Folder of <article_id>.pdf files
    #[arg(long)]
    pdf_dir: Option<PathBuf>,
    /// Folder of <article_id>.xml files
    #[arg(long)]
    xml_dir: Option<PathBuf>,
    /// CSV file to write
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Tokens of context on each side of a match
    #[arg(long)]
    context_window: Option<usize>,
    /// "builtin" or a path to a TOML pattern catalog
    #[arg(long)]
    catalog: Option<String>,
    /// Process articles on a worker pool
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            pdf_dir: self.pdf_dir.clone(),
            xml_dir: self.xml_dir.clone(),
            output: self.output.clone(),
            context_window: self.context_window,
            catalog: self.catalog.clone(),
            parallel: self.parallel,
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    info!("dataref {} starting", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply(cli.overrides());
    info!(
        pdf_dir = %config.input.pdf_dir.display(),
        xml_dir = %config.input.xml_dir.display(),
        context_window = config.extraction.context_window,
        "Configuration loaded"
    );

    // A catalog that fails to compile stops here, before any article is read.
    let mut extractor = Extractor::new(&config.extraction).context("Could not build pattern catalog")?;

    let table = extractor.run_on_folder(&config.input.pdf_dir, &config.input.xml_dir);
    table
        .write_csv_file(&config.output.path)
        .with_context(|| format!("Could not write {}", config.output.path.display()))?;

    let summary = extractor.summary();
    info!(
        articles = summary.articles,
        rows = table.len(),
        source_failures = summary.source_failures,
        output = %config.output.path.display(),
        "Done"
    );

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dataref=info,warn")),
        )
        .init();
}
