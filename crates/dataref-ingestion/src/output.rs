//! Materialized result table and its CSV sink.

use std::io::Write;
use std::path::Path;

use dataref_common::Result;
use tracing::info;

use crate::models::{RawMatch, ReferenceRow};

/// Column order of the output table.
pub const COLUMNS: [&str; 4] = ["row_id", "article_id", "dataset_id", "context"];

/// Final table: one row per (article, identifier), `row_id` assigned here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    rows: Vec<ReferenceRow>,
}

impl ResultTable {
    /// Number records 0..n in the order given.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a RawMatch>,
    {
        let rows = records
            .into_iter()
            .enumerate()
            .map(|(row_id, m)| ReferenceRow {
                row_id,
                article_id: m.article_id.clone(),
                dataset_id: m.dataset_id.clone(),
                context: m.context.clone(),
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[ReferenceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the table as CSV with a header row. An empty table still gets
    /// its header.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        // Header written by hand so an empty table still gets one.
        let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
        wtr.write_record(COLUMNS)?;
        for row in &self.rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn write_csv_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(path)?;
        self.write_csv(file)?;
        info!(path = %path.display(), rows = self.rows.len(), "Results written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataref_common::TextSource;
    use pretty_assertions::assert_eq;

    fn record(article_id: &str, dataset_id: &str, context: &str) -> RawMatch {
        RawMatch {
            dataset_id: dataset_id.to_string(),
            pattern_type: "test".to_string(),
            article_id: article_id.to_string(),
            source: TextSource::Xml,
            start_idx: 0,
            context: context.to_string(),
            score: Some(0),
        }
    }

    #[test]
    fn test_row_ids_sequential_from_zero() {
        let records = vec![record("a", "GSE1", "x"), record("a", "GSE2", "y"), record("b", "GSE1", "z")];
        let table = ResultTable::from_records(&records);
        let ids: Vec<usize> = table.rows().iter().map(|r| r.row_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(table.rows()[2].article_id, "b");
    }

    #[test]
    fn test_csv_header_and_quoting() {
        let records = vec![record("art1", "doi:10.1/x", "context, with comma")];
        let table = ResultTable::from_records(&records);
        let mut out = Vec::new();
        table.write_csv(&mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();
        assert_eq!(
            csv,
            "row_id,article_id,dataset_id,context\n0,art1,doi:10.1/x,\"context, with comma\"\n"
        );
    }

    #[test]
    fn test_columns_match_row_field_order() {
        let records = vec![record("art1", "GSE1", "x")];
        let mut out = Vec::new();
        ResultTable::from_records(&records).write_csv(&mut out).unwrap();
        let mut rdr = csv::Reader::from_reader(out.as_slice());
        let row = rdr.records().next().unwrap().unwrap();
        assert_eq!(row.iter().collect::<Vec<_>>(), vec!["0", "art1", "GSE1", "x"]);
    }

    #[test]
    fn test_empty_table_writes_header_only() {
        let mut out = Vec::new();
        ResultTable::default().write_csv(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "row_id,article_id,dataset_id,context\n");
    }

    #[test]
    fn test_write_csv_file_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("refs.csv");
        ResultTable::from_records(&[record("a", "GSE1", "x")]).write_csv_file(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("row_id,article_id,dataset_id,context\n"));
    }
}
