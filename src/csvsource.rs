//! # CSV Back-End
//!
//! Streams rows out of a sequence of CSV files sharing one header layout
//! and a common time column. Files are parsed with Polars' CSV reader; the
//! time column is located case-insensitively from a configurable candidate
//! list, so `Time`, `year` and friends all work without configuration.
//!
//! CSV files carry no unit annotation of their own, so the unit string is
//! supplied by the caller when the source is created and applies to every
//! file.

use std::path::{Path, PathBuf};

use polars::prelude::*;

use crate::error::{StreamError, StreamResult};
use crate::source::TimeSource;

/// Candidate time-column names tried when none is configured.
const DEFAULT_TIME_NAMES: &[&str] = &["time", "t", "date", "year"];

/// One table row, as numeric cells in header order. Non-numeric cells fetch
/// as `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    pub values: Vec<Option<f64>>,
}

/// Multi-file CSV source with a shared header and time column.
pub struct CsvStream {
    paths: Vec<PathBuf>,
    unit_str: String,
    time_names: Vec<String>,
    colnames: Vec<String>,
    time_column: Option<String>,
    frame: Option<DataFrame>,
}

impl CsvStream {
    /// Creates a source over `paths` (in chronological order) whose time
    /// values are expressed in `unit_str` (e.g. `"days since 2000-01-01"`).
    pub fn new<P: AsRef<Path>>(paths: &[P], unit_str: &str) -> Self {
        CsvStream {
            paths: paths.iter().map(|p| p.as_ref().to_path_buf()).collect(),
            unit_str: unit_str.to_string(),
            time_names: DEFAULT_TIME_NAMES.iter().map(|s| s.to_string()).collect(),
            colnames: Vec::new(),
            time_column: None,
            frame: None,
        }
    }

    /// Replaces the candidate names used to locate the time column.
    pub fn with_time_column(mut self, name: &str) -> Self {
        self.time_names = vec![name.to_string()];
        self
    }

    pub fn file_count(&self) -> usize {
        self.paths.len()
    }

    /// Header of the first file, available after
    /// [`time_vectors`](TimeSource::time_vectors) has run.
    pub fn colnames(&self) -> &[String] {
        &self.colnames
    }

    /// Position of a named column in the header (case-insensitive).
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let lower = name.to_lowercase();
        self.colnames.iter().position(|c| c.to_lowercase() == lower)
    }

    fn read_frame(&self, file_idx: usize) -> StreamResult<DataFrame> {
        let path = &self.paths[file_idx];
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.clone()))?
            .finish()?;
        Ok(df)
    }

    /// Locates the time column among the header names, comparing
    /// case-insensitively against the candidate list.
    fn find_time_column(&self, df: &DataFrame, path: &Path) -> StreamResult<String> {
        for column in df.get_columns() {
            let name = column.name().to_string();
            let lower = name.to_lowercase();
            if self.time_names.iter().any(|c| c.to_lowercase() == lower) {
                return Ok(name);
            }
        }
        Err(StreamError::MissingTimeColumn(path.display().to_string()))
    }
}

impl TimeSource for CsvStream {
    type Record = CsvRow;

    fn time_vectors(&mut self) -> StreamResult<Vec<(Vec<f64>, String)>> {
        let mut per_file = Vec::with_capacity(self.paths.len());
        for file_idx in 0..self.paths.len() {
            let df = self.read_frame(file_idx)?;

            // header and time column come from the first file
            if file_idx == 0 {
                self.colnames = df
                    .get_columns()
                    .iter()
                    .map(|c| c.name().to_string())
                    .collect();
                self.time_column = Some(self.find_time_column(&df, &self.paths[0])?);
            }
            let time_column = self
                .time_column
                .clone()
                .ok_or_else(|| StreamError::MissingTimeColumn(self.paths[0].display().to_string()))?;

            let series = df
                .column(&time_column)?
                .as_materialized_series()
                .cast(&DataType::Float64)?;
            let mut values = Vec::with_capacity(df.height());
            for (row, value) in series.f64()?.into_iter().enumerate() {
                // a hole in the time axis breaks the monotonic contract
                values.push(value.ok_or_else(|| StreamError::InvalidTimeValue {
                    file: self.paths[file_idx].display().to_string(),
                    row,
                })?);
            }

            per_file.push((values, self.unit_str.clone()));
        }
        Ok(per_file)
    }

    fn open_file(&mut self, file_idx: usize) -> StreamResult<()> {
        if file_idx >= self.paths.len() {
            return Err(StreamError::FileOutOfRange {
                file: file_idx,
                count: self.paths.len(),
            });
        }
        self.frame = Some(self.read_frame(file_idx)?);
        Ok(())
    }

    fn close_file(&mut self) {
        self.frame = None;
    }

    fn fetch_at(&mut self, local_idx: usize) -> StreamResult<CsvRow> {
        let df = self.frame.as_ref().ok_or(StreamError::NoOpenFile)?;
        let mut values = Vec::with_capacity(df.width());
        for column in df.get_columns() {
            let cell = column.as_materialized_series().get(local_idx)?;
            values.push(cell.try_extract::<f64>().ok());
        }
        Ok(CsvRow { values })
    }
}
