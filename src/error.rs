//! # Error Types
//!
//! This module defines the error taxonomy shared by the temporal index core
//! and the format back-ends. Construction-time errors (malformed units,
//! unsorted or mismatched inputs) are fatal and surface to the caller;
//! nothing is retried or silently swallowed inside the library.

use thiserror::Error;

/// Errors that can occur while building or querying a temporal stream index
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("time unit is not in the expected format (<units> since <yyyy-mm-dd> [<hh:mm:ss>]): {0}")]
    MalformedUnit(String),

    #[error("combined time vector is not in ascending order at position {position}; check the order of files supplied")]
    UnsortedTimeAxis { position: usize },

    #[error("time unit of file {file} ('{found}') differs from the first file's unit ('{expected}')")]
    MismatchedUnit {
        expected: String,
        found: String,
        file: usize,
    },

    #[error("operation requires a non-empty time axis")]
    EmptyAxis,

    #[error("failed to switch to file {file}: {source}")]
    FileSwitch {
        file: usize,
        #[source]
        source: Box<StreamError>,
    },

    #[error("cannot parse date/time string: '{0}'")]
    InvalidDate(String),

    #[error("cannot find a time column in CSV file: {0}")]
    MissingTimeColumn(String),

    #[error("variable '{0}' not found in NetCDF file")]
    MissingVariable(String),

    #[error("file index {file} out of range for a dataset of {count} files")]
    FileOutOfRange { file: usize, count: usize },

    #[error("no file is open; position a cursor before fetching data")]
    NoOpenFile,

    #[error("invalid value in time column of '{file}' at row {row}")]
    InvalidTimeValue { file: String, row: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("NetCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for stream indexing operations
pub type StreamResult<T> = Result<T, StreamError>;
