//! End-to-end extraction over on-disk article folders.
//!
//! Builds a small corpus in a temp dir: one article with both renditions, one
//! XML-only article and one article whose only source is a corrupt PDF.

use std::fs;
use std::path::Path;

use dataref_common::{ExtractionConfig, TextSource};
use dataref_ingestion::pdf_parser::extract_pdf_text;
use dataref_ingestion::Extractor;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

fn write_pdf(path: &Path, lines: &[&str]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("Td", vec![72.into(), 720.into()]),
    ];
    for line in lines {
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
        operations.push(Operation::new("Td", vec![0.into(), (-14).into()]));
    }
    operations.push(Operation::new("ET", vec![]));
    let content = Content { operations };

    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

fn corpus() -> tempfile::TempDir {
    let root = tempfile::tempdir().unwrap();
    let pdf_dir = root.path().join("PDF");
    let xml_dir = root.path().join("XML");
    fs::create_dir_all(&pdf_dir).unwrap();
    fs::create_dir_all(&xml_dir).unwrap();

    write_pdf(
        &pdf_dir.join("art_a.pdf"),
        &["Mass spectrometry data were deposited", "in PRIDE as PXD000001 and are public"],
    );
    fs::write(
        xml_dir.join("art_a.xml"),
        r#"<article><body>
             <p>Expression profiles were downloaded from GEO under GSE12345 for reanalysis.</p>
             <p>The proteomics data PXD000001 was analyzed with standard tools.</p>
           </body></article>"#,
    )
    .unwrap();

    fs::write(
        xml_dir.join("art_b.xml"),
        "<article><p>Reads were submitted to BioProject PRJNA123456 last year.</p></article>",
    )
    .unwrap();

    fs::write(pdf_dir.join("art_c.pdf"), b"%PDF-1.4 truncated garbage").unwrap();

    root
}

#[test]
fn test_generated_pdf_is_readable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.pdf");
    write_pdf(&path, &["Samples were collected", "under GSE54321 in total"]);
    let text = extract_pdf_text(&path).unwrap();
    assert!(text.contains("GSE54321"), "unexpected PDF text: {text}");
}

#[test]
fn test_run_on_folder_end_to_end() {
    let root = corpus();
    let config = ExtractionConfig { context_window: 6, ..ExtractionConfig::default() };
    let mut extractor = Extractor::new(&config).unwrap();

    let table = extractor.run_on_folder(&root.path().join("PDF"), &root.path().join("XML"));

    let rows: Vec<(usize, &str, &str)> = table
        .rows()
        .iter()
        .map(|r| (r.row_id, r.article_id.as_str(), r.dataset_id.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            (0, "art_a", "PXD000001"),
            (1, "art_a", "GSE12345"),
            (2, "art_b", "PRJNA123456"),
        ]
    );

    // The analysed XML mention outranks the PDF deposition sentence.
    let pxd = extractor
        .results()
        .iter()
        .find(|m| m.dataset_id == "PXD000001")
        .unwrap();
    assert_eq!(pxd.source, TextSource::Xml);
    assert!(pxd.context.contains("analyzed"));

    let summary = extractor.summary();
    assert_eq!(summary.articles, 3);
    assert_eq!(summary.source_failures, 1);
    assert_eq!(summary.articles_without_rows, 1);
}

#[test]
fn test_csv_written_with_header() {
    let root = corpus();
    let mut extractor = Extractor::new(&ExtractionConfig::default()).unwrap();
    let table = extractor.run_on_folder(&root.path().join("PDF"), &root.path().join("XML"));

    let out = root.path().join("out").join("dataset_references.csv");
    table.write_csv_file(&out).unwrap();

    let mut reader = csv::Reader::from_path(&out).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["row_id", "article_id", "dataset_id", "context"]);
    assert_eq!(reader.records().count(), table.len());
}

#[test]
fn test_empty_folders_produce_empty_table() {
    let root = tempfile::tempdir().unwrap();
    let mut extractor = Extractor::new(&ExtractionConfig::default()).unwrap();
    let table = extractor.run_on_folder(&root.path().join("PDF"), &root.path().join("XML"));
    assert!(table.is_empty());
    assert_eq!(extractor.summary().articles, 0);
}

#[test]
fn test_custom_catalog_file() {
    let root = corpus();
    let catalog = root.path().join("patterns.toml");
    fs::write(&catalog, "[[pattern]]\nname = \"GSE\"\nregex = '\\bGSE\\d{5,}\\b'\n").unwrap();

    let config = ExtractionConfig {
        catalog: dataref_common::CatalogSource::File(catalog),
        ..ExtractionConfig::default()
    };
    let mut extractor = Extractor::new(&config).unwrap();
    let table = extractor.run_on_folder(&root.path().join("PDF"), &root.path().join("XML"));
    let ids: Vec<&str> = table.rows().iter().map(|r| r.dataset_id.as_str()).collect();
    assert_eq!(ids, vec!["GSE12345"]);
}

#[test]
fn test_invalid_catalog_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("bad.toml");
    fs::write(&catalog, "[[pattern]]\nname = \"broken\"\nregex = '(unclosed'\n").unwrap();
    let config = ExtractionConfig {
        catalog: dataref_common::CatalogSource::File(catalog),
        ..ExtractionConfig::default()
    };
    assert!(Extractor::new(&config).is_err());
}
