//! Format readers.
//!
//! Every reader shares one contract: consume a whole stream, apply the area/measure/year
//! filters while parsing, and merge the resulting areas into the target collection.
//! Readers build into a staging collection first, so a source that fails halfway
//! leaves the target exactly as it was.

mod lookup_csv;
mod nested_json;
mod wide_csv;

use crate::collection::AreaCollection;
use crate::columns::{ColumnMapping, SourceFormat};
use crate::error::{Error, Result};
use crate::filters::Filters;
use log::{debug, info, warn};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// A recoverable problem with one row; the rest of the source was still ingested.
#[derive(Debug)]
pub struct RowWarning {
    /// 1-based row (CSV: line including the header; JSON: record index).
    pub row: usize,
    pub error: Error,
}

impl fmt::Display for RowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row, self.error)
    }
}

/// Outcome of ingesting one source.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub source: String,
    /// Data rows/records read.
    pub rows: usize,
    /// Rows dropped by the area filter.
    pub filtered: usize,
    /// Distinct areas merged into the target.
    pub merged: usize,
    pub warnings: Vec<RowWarning>,
}

impl IngestReport {
    fn new(source: &str) -> Self {
        Self {
            source: source.to_owned(),
            ..Self::default()
        }
    }

    pub(crate) fn warn(&mut self, row: usize, error: Error) {
        warn!("[{}] row {}: {}", self.source, row, error);
        self.warnings.push(RowWarning { row, error });
    }
}

/// Open a file as a source stream.
pub fn open_file(path: impl AsRef<Path>) -> Result<BufReader<File>> {
    let path = path.as_ref();
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| Error::unavailable(&path.display().to_string(), e.to_string()))
}

fn read_source<R: Read>(mut reader: R, source_name: &str) -> Result<String> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| Error::unavailable(source_name, e.to_string()))?;
    if text.trim().is_empty() {
        return Err(Error::unavailable(source_name, "source has no content"));
    }
    Ok(text)
}

pub(crate) fn ingest_into<R: Read>(
    target: &mut AreaCollection,
    source_name: &str,
    reader: R,
    format: SourceFormat,
    columns: &ColumnMapping,
    filters: &Filters,
) -> Result<IngestReport> {
    debug!("[{source_name}] ingesting as {format}");
    let text = read_source(reader, source_name)?;

    let mut staging = AreaCollection::new();
    let mut report = IngestReport::new(source_name);
    match format {
        SourceFormat::LookupCsv => {
            lookup_csv::parse(&text, columns, filters, &mut staging, &mut report)?
        }
        SourceFormat::WideYearCsv => {
            wide_csv::parse(&text, columns, filters, &mut staging, &mut report)?
        }
        SourceFormat::NestedJson => {
            nested_json::parse(&text, columns, filters, &mut staging, &mut report)?
        }
    }

    report.merged = staging.len();
    target.absorb(staging);
    info!(
        "[{}] {} rows read, {} filtered out, {} areas merged, {} warnings",
        report.source,
        report.rows,
        report.filtered,
        report.merged,
        report.warnings.len()
    );
    Ok(report)
}

fn csv_reader(text: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes())
}
