use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CheckError;
use crate::model::MatchResult;

/// Column order of the detail report.
pub const REPORT_HEADERS: [&str; 10] = [
    "STATUS",
    "FILENAME",
    "FRAMES_MASTER",
    "FRAMES_LTO",
    "SIZE_MASTER",
    "SIZE_LTO",
    "MD5_MASTER",
    "MD5_LTO",
    "LTO_TAPE",
    "ERROR MESSAGES",
];

/// One line of the detail report. LTO fields are empty for not-found rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(rename = "STATUS")]
    pub status: String,
    #[serde(rename = "FILENAME")]
    pub filename: String,
    #[serde(rename = "FRAMES_MASTER")]
    pub frames_master: String,
    #[serde(rename = "FRAMES_LTO")]
    pub frames_lto: String,
    #[serde(rename = "SIZE_MASTER")]
    pub size_master: String,
    #[serde(rename = "SIZE_LTO")]
    pub size_lto: String,
    #[serde(rename = "MD5_MASTER")]
    pub md5_master: String,
    #[serde(rename = "MD5_LTO")]
    pub md5_lto: String,
    #[serde(rename = "LTO_TAPE")]
    pub lto_tape: String,
    #[serde(rename = "ERROR MESSAGES")]
    pub error_messages: String,
}

impl From<&MatchResult> for ReportRow {
    fn from(result: &MatchResult) -> Self {
        let master = result.master();
        let lto = result.lto();
        Self {
            status: result.status().to_string(),
            filename: master.name.clone(),
            frames_master: master.frames.clone(),
            frames_lto: lto.map(|l| l.frames.clone()).unwrap_or_default(),
            size_master: master.size.clone(),
            size_lto: lto.map(|l| l.size.clone()).unwrap_or_default(),
            md5_master: master.md5.clone(),
            md5_lto: lto.map(|l| l.md5.clone()).unwrap_or_default(),
            lto_tape: lto.and_then(|l| l.media.clone()).unwrap_or_default(),
            error_messages: result.error_messages(),
        }
    }
}

/// CSV report sink for one comparison session.
///
/// Tracks whether the header is on disk and which rows were already written,
/// so repeated `write` calls never duplicate either. Filenames found in an
/// existing report are never written again; within one session every
/// distinct row (each tape copy) is kept.
pub struct ReportWriter {
    path: PathBuf,
    writer: csv::Writer<File>,
    header_written: bool,
    existing: HashSet<String>,
    written: HashSet<ReportRow>,
}

impl ReportWriter {
    /// Create (or truncate) the report at `path`.
    pub fn create(path: &Path) -> Result<Self, CheckError> {
        let file = File::create(path).map_err(|e| CheckError::io(path.display(), e))?;
        log::debug!("Writing report to {}", path.display());
        Ok(Self::from_file(path, file, false, HashSet::new()))
    }

    /// Open `path` for appending. Filenames already in a non-empty file are
    /// skipped, and its header counts as written.
    pub fn append(path: &Path) -> Result<Self, CheckError> {
        let populated = match std::fs::metadata(path) {
            Ok(meta) => meta.len() > 0,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => return Err(CheckError::io(path.display(), e)),
        };
        let existing = if populated { read_report(path)? } else { Vec::new() };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| CheckError::io(path.display(), e))?;
        log::debug!(
            "Appending report to {} ({} existing rows)",
            path.display(),
            existing.len()
        );
        let existing = existing.into_iter().map(|row| row.filename).collect();
        Ok(Self::from_file(path, file, populated, existing))
    }

    fn from_file(path: &Path, file: File, header_written: bool, existing: HashSet<String>) -> Self {
        let writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        Self {
            path: path.to_path_buf(),
            writer,
            header_written,
            existing,
            written: HashSet::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write results, skipping rows already present. Returns rows written.
    pub fn write(&mut self, results: &[MatchResult]) -> Result<usize, CheckError> {
        if !self.header_written {
            self.writer
                .write_record(REPORT_HEADERS)
                .map_err(|e| CheckError::io(self.path.display(), e))?;
            self.header_written = true;
        }

        let mut count = 0;
        for result in results {
            let row = ReportRow::from(result);
            if self.existing.contains(&row.filename) || self.written.contains(&row) {
                log::debug!("{} already in report", row.filename);
                continue;
            }
            self.writer
                .serialize(&row)
                .map_err(|e| CheckError::io(self.path.display(), e))?;
            self.written.insert(row);
            count += 1;
        }

        self.writer.flush().map_err(|e| CheckError::io(self.path.display(), e))?;
        Ok(count)
    }
}

/// Write a complete report to `path`, replacing any existing file.
pub fn write_report(path: &Path, results: &[MatchResult]) -> Result<usize, CheckError> {
    ReportWriter::create(path)?.write(results)
}

/// Read a report written by [`ReportWriter`].
pub fn read_report(path: &Path) -> Result<Vec<ReportRow>, CheckError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CheckError::NotFound { path: path.display().to_string() },
        _ => CheckError::io(path.display(), e),
    })?;
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row.map_err(|e| CheckError::csv(path.display(), e))?);
    }
    Ok(rows)
}

/// Default report filename: `lto_check_report_<YYYY-MM-DD_HHMM>.csv`.
pub fn default_report_name<Tz: chrono::TimeZone>(now: &chrono::DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("lto_check_report_{}.csv", now.format("%Y-%m-%d_%H%M"))
}
