//! Loading affiliations from inline lists, line files and CSV/TSV data files.

use std::fs;
use std::path::Path;

use indexmap::IndexSet;
use tracing::{debug, info, warn};

use crate::error::{RorError, Result};
use super::source::{AffiliationRecord, AffiliationSource};

/// Column names tried, in order, when no explicit column resolves.
pub const AFFILIATION_COLUMNS: &[&str] = &["Affiliation", "affiliation"];

impl AffiliationSource {
    /// Read the source into an ordered list of records.
    pub fn load(&self) -> Result<Vec<AffiliationRecord>> {
        let records = match self {
            AffiliationSource::List(items) => {
                items.iter().map(|s| AffiliationRecord::from(s.as_str())).collect()
            }
            AffiliationSource::File(path) => {
                info!("Searching {} for affiliations with Affiliation Strategy", path.display());
                read_lines(path)?
            }
            AffiliationSource::Data { path, column } => read_column(path, column.as_deref())?,
        };

        info!("{} Input Affiliations", records.len());
        debug!("Affiliation List: {:?}", records);
        Ok(records)
    }
}

/// One record per line. Line endings are left to normalization.
fn read_lines(path: &Path) -> Result<Vec<AffiliationRecord>> {
    let contents = fs::read_to_string(path).map_err(|e| RorError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(contents.lines().map(AffiliationRecord::from).collect())
}

/// Distinct values of the affiliation column, in first-seen order.
///
/// A missing column is not fatal: it is logged and yields no records.
fn read_column(path: &Path, column: Option<&str>) -> Result<Vec<AffiliationRecord>> {
    let delimiter = delimiter_for(path)?;
    let bytes = fs::read(path).map_err(|e| RorError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes.as_slice());

    let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();

    if let Some(name) = column {
        info!("Affiliations in {}", name);
    }

    let Some(index) = resolve_column(&headers, column) else {
        warn!("Affiliation or affiliation column must exist in data");
        return Ok(Vec::new());
    };

    let mut distinct = IndexSet::new();
    for result in reader.records() {
        let record = result?;
        let value = record.get(index).unwrap_or("");
        distinct.insert(AffiliationRecord::from_cell(value));
    }

    if is_numeric_column(&distinct) {
        warn!("Column {} holds only numbers, no affiliations to search", headers[index]);
        return Ok(distinct.iter().map(|_| AffiliationRecord::Missing).collect());
    }

    Ok(distinct.into_iter().collect())
}

/// A column whose present values all parse as numbers is not text.
fn is_numeric_column(values: &IndexSet<AffiliationRecord>) -> bool {
    let mut texts = values.iter().filter_map(AffiliationRecord::as_text).peekable();
    texts.peek().is_some() && texts.all(|v| v.trim().parse::<f64>().is_ok())
}

/// Delimiter implied by the file extension: `,` for `.csv`, tab for `.tsv`.
pub fn delimiter_for(path: &Path) -> Result<u8> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => Ok(b','),
        "tsv" => Ok(b'\t'),
        _ => Err(RorError::UnsupportedFormat(format!(
            "'{}' (expected a .csv or .tsv file)",
            path.display()
        ))),
    }
}

/// Index of the column to read affiliations from.
///
/// An explicit name wins when present in the headers; otherwise the first of
/// [`AFFILIATION_COLUMNS`] that exists (case-sensitive).
pub fn resolve_column(headers: &[String], explicit: Option<&str>) -> Option<usize> {
    let position = |name: &str| headers.iter().position(|h| h == name);

    if let Some(index) = explicit.and_then(position) {
        return Some(index);
    }

    AFFILIATION_COLUMNS.iter().copied().find_map(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn data_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_delimiter_from_extension() {
        assert_eq!(delimiter_for(Path::new("authors.csv")).unwrap(), b',');
        assert_eq!(delimiter_for(Path::new("authors.TSV")).unwrap(), b'\t');
        assert!(matches!(
            delimiter_for(Path::new("authors.xlsx")),
            Err(RorError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_resolve_column_prefers_explicit() {
        let h = headers(&["id", "Affiliation", "inst"]);
        assert_eq!(resolve_column(&h, Some("inst")), Some(2));
        assert_eq!(resolve_column(&h, Some("nope")), Some(1));
        assert_eq!(resolve_column(&h, None), Some(1));
    }

    #[test]
    fn test_resolve_column_is_case_sensitive() {
        assert_eq!(resolve_column(&headers(&["id", "affiliation"]), None), Some(1));
        assert_eq!(resolve_column(&headers(&["id", "AFFILIATION"]), None), None);
    }

    #[test]
    fn test_csv_lowercase_column_distinct_first_seen() {
        let file = data_file(
            ".csv",
            "id,affiliation\n1,CERN\n2,\"University of Oslo, Norway\"\n3,CERN\n4,Max Planck Society\n",
        );
        let source = AffiliationSource::Data {
            path: file.path().to_path_buf(),
            column: None,
        };

        let records = source.load().unwrap();
        assert_eq!(
            records,
            vec![
                AffiliationRecord::from("CERN"),
                AffiliationRecord::from("University of Oslo, Norway"),
                AffiliationRecord::from("Max Planck Society"),
            ]
        );
    }

    #[test]
    fn test_tsv_empty_cells_collapse_to_one_missing() {
        let file = data_file(".tsv", "Affiliation\tyear\nETH Zurich\t2020\n\t2021\n\t2022\n");
        let source = AffiliationSource::Data {
            path: file.path().to_path_buf(),
            column: None,
        };

        let records = source.load().unwrap();
        assert_eq!(
            records,
            vec![AffiliationRecord::from("ETH Zurich"), AffiliationRecord::Missing]
        );
    }

    #[test]
    fn test_numeric_column_is_not_text() {
        let file = data_file(".csv", "affiliation\n123\n456\n123\n");
        let source = AffiliationSource::Data {
            path: file.path().to_path_buf(),
            column: None,
        };

        let records = source.load().unwrap();
        assert_eq!(records, vec![AffiliationRecord::Missing, AffiliationRecord::Missing]);
        assert!(records.iter().all(|r| r.normalized().is_none()));
    }

    #[test]
    fn test_mixed_column_keeps_numbers_as_text() {
        let file = data_file(".csv", "affiliation\n123\nCERN\n");
        let source = AffiliationSource::Data {
            path: file.path().to_path_buf(),
            column: None,
        };

        let records = source.load().unwrap();
        assert_eq!(
            records,
            vec![AffiliationRecord::from("123"), AffiliationRecord::from("CERN")]
        );
    }

    #[test]
    fn test_missing_column_yields_empty_input() {
        let file = data_file(".csv", "id,institution\n1,CERN\n");
        let source = AffiliationSource::Data {
            path: file.path().to_path_buf(),
            column: None,
        };

        assert!(source.load().unwrap().is_empty());
    }

    #[test]
    fn test_line_file() {
        let file = data_file(".txt", "CERN\nUniversity of Oslo\n\nETH Zurich\n");
        let records = AffiliationSource::File(file.path().to_path_buf()).load().unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[1], AffiliationRecord::from("University of Oslo"));
        assert_eq!(records[2].normalized(), None);
    }

    #[test]
    fn test_inline_list_verbatim() {
        let source = AffiliationSource::List(vec!["  CERN ".to_string(), "MIT".to_string()]);
        let records = source.load().unwrap();
        assert_eq!(records[0], AffiliationRecord::from("  CERN "));
        assert_eq!(records[1], AffiliationRecord::from("MIT"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = AffiliationSource::File("/nonexistent/affiliations.txt".into());
        assert!(matches!(source.load(), Err(RorError::Io { .. })));
    }
}
