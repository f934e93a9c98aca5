//! Buffered, append-only TSV writer.
//!
//! Rows are held in memory and appended to the output file at a fixed record
//! interval, so an interrupted run loses at most one interval of results.

use std::fs::{File, OpenOptions};
use std::mem;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::{RorError, Result};

use super::record::{COLUMNS, ResolvedAffiliation};

/// Output file name for a run started at `started`: `AffiliationAPI_RORData__YYYYMMDD_HH.tsv`.
pub fn output_file_name(started: NaiveDateTime) -> String {
    format!("AffiliationAPI_RORData__{}.tsv", started.format("%Y%m%d_%H"))
}

/// Accumulates resolved rows and appends them to the output file.
pub struct ResultWriter {
    path: PathBuf,
    interval: usize,
    buffer: Vec<ResolvedAffiliation>,
    header_written: bool,
    flushes: usize,
    rows_written: usize,
}

impl ResultWriter {
    /// Create a writer appending to `path` every `interval` input records.
    pub fn new(path: impl Into<PathBuf>, interval: usize) -> Result<Self> {
        if interval == 0 {
            return Err(RorError::Config("output interval must be at least 1".to_string()));
        }

        Ok(Self {
            path: path.into(),
            interval,
            buffer: Vec::new(),
            header_written: false,
            flushes: 0,
            rows_written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add rows to the buffer.
    pub fn extend(&mut self, rows: impl IntoIterator<Item = ResolvedAffiliation>) {
        self.buffer.extend(rows);
    }

    /// Rows waiting to be written.
    pub fn buffered(&self) -> &[ResolvedAffiliation] {
        &self.buffer
    }

    /// Whether the loop at input position `index` should flush before continuing.
    pub fn is_flush_point(&self, index: usize) -> bool {
        index % self.interval == 0 && !self.buffer.is_empty()
    }

    /// Number of append operations performed so far.
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    /// Total rows written to disk so far.
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Append buffered rows to the file and clear the buffer.
    ///
    /// The header is written with the first append only. Returns the number of
    /// rows written; an empty buffer is a no-op.
    pub fn flush(&mut self) -> Result<usize> {
        if self.buffer.is_empty() {
            return Ok(0);
        }
        let rows = mem::take(&mut self.buffer);
        self.append(&rows)?;
        Ok(rows.len())
    }

    /// Final flush at the end of a run.
    ///
    /// Unlike [`flush`](Self::flush) this always touches the file, so a run
    /// that produced no rows still leaves a header-only output.
    pub fn finish(&mut self) -> Result<usize> {
        if self.buffer.is_empty() && self.header_written {
            return Ok(0);
        }
        let rows = mem::take(&mut self.buffer);
        self.append(&rows)?;
        Ok(rows.len())
    }

    fn append(&mut self, rows: &[ResolvedAffiliation]) -> Result<()> {
        let file = self.open()?;
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(file);

        if !self.header_written {
            writer.write_record(COLUMNS)?;
        }
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush().map_err(|e| RorError::Io {
            path: self.path.clone(),
            source: e,
        })?;

        self.header_written = true;
        self.flushes += 1;
        self.rows_written += rows.len();
        debug!("Appended {} rows to {}", rows.len(), self.path.display());
        Ok(())
    }

    fn open(&self) -> Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| RorError::Io {
                path: self.path.clone(),
                source: e,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MatchCandidate, MatchingType, Organization};
    use crate::output::MatchKind;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn matched(affiliation: &str) -> ResolvedAffiliation {
        let candidate = MatchCandidate::new(
            affiliation,
            1.0,
            MatchingType::Phrase,
            true,
            Organization::new("https://ror.org/01ggx4157", "CERN", "Switzerland"),
        );
        ResolvedAffiliation::matched(affiliation, &candidate, 1)
    }

    #[test]
    fn test_output_file_name() {
        let started = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 41, 12)
            .unwrap();
        assert_eq!(output_file_name(started), "AffiliationAPI_RORData__20240307_09.tsv");
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(matches!(ResultWriter::new("out.tsv", 0), Err(RorError::Config(_))));
    }

    #[test]
    fn test_flush_point_needs_rows() {
        let mut writer = ResultWriter::new("unused.tsv", 5).unwrap();
        assert_eq!(writer.path(), Path::new("unused.tsv"));
        assert!(!writer.is_flush_point(0));
        writer.extend([matched("CERN")]);
        assert_eq!(writer.buffered().len(), 1);
        assert!(writer.is_flush_point(5));
        assert!(!writer.is_flush_point(6));
    }

    #[test]
    fn test_header_written_once_across_flushes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.tsv");
        let mut writer = ResultWriter::new(&path, 1).unwrap();

        writer.extend([matched("CERN")]);
        assert_eq!(writer.flush().unwrap(), 1);
        assert!(writer.buffered().is_empty());
        writer.extend([ResolvedAffiliation::sentinel("Nowhere", MatchKind::NoResult, 0)]);
        assert_eq!(writer.finish().unwrap(), 1);

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], COLUMNS.join("\t"));
        assert_eq!(
            lines[1],
            "CERN\tCERN\thttps://ror.org/01ggx4157\tCERN\tSwitzerland\tPHRASE\tTrue\t1.0\t1\tTrue"
        );
        assert_eq!(lines[2], "Nowhere\t\t\t\t\tNo Result\t\t0.0\t0\tFalse");
        assert_eq!(writer.flushes(), 2);
        assert_eq!(writer.rows_written(), 2);
    }

    #[test]
    fn test_finish_without_rows_writes_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.tsv");
        let mut writer = ResultWriter::new(&path, 20).unwrap();

        assert_eq!(writer.flush().unwrap(), 0);
        assert!(!path.exists());
        assert_eq!(writer.finish().unwrap(), 0);

        assert_eq!(fs::read_to_string(&path).unwrap(), format!("{}\n", COLUMNS.join("\t")));
    }
}
