//! # Dataset Configuration Module
//!
//! This module provides configuration parsing for chronostream datasets.
//! A configuration file (JSON or YAML) describes a time-ordered, possibly
//! multi-file dataset and how to interpret its time axis.
//!
//! ## Configuration Structure
//!
//! - **files**: input files, in chronological order
//! - **kind**: `netcdf` (with `variable`, optional `time_name`) or `csv`
//!   (with `unit`, optional `time_column`)
//! - **periodic**: treat the finite axis as cyclically repeating
//! - **centered**: samples represent interval midpoints, not starts
//!
//! ## Example
//!
//! ```json
//! {
//!   "files": ["gpp.2000-2007.nc", "gpp.2008-2015.nc"],
//!   "kind": "netcdf",
//!   "variable": "gpp",
//!   "periodic": true,
//!   "centered": true
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::axis::GlobalTimeAxis;
use crate::build_axis;
use crate::csvsource::CsvStream;
use crate::error::StreamResult;
use crate::ncsource::NetCdfStream;

/// Complete description of one multi-file dataset.
#[derive(Debug, Deserialize)]
pub struct DatasetConfig {
    /// Input files, in chronological order
    pub files: Vec<String>,
    /// Format-specific settings, tagged by `kind`
    #[serde(flatten)]
    pub format: FormatConfig,
    /// Extend the axis periodically beyond its covered range
    #[serde(default)]
    pub periodic: bool,
    /// Samples represent interval midpoints rather than interval starts
    #[serde(default)]
    pub centered: bool,
}

/// Format-specific part of a dataset description.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind")]
pub enum FormatConfig {
    /// Gridded NetCDF files sharing one time coordinate
    #[serde(rename = "netcdf")]
    NetCdf {
        /// Data variable to stream
        variable: String,
        /// Name of the time coordinate variable
        #[serde(default = "default_time_name")]
        time_name: String,
    },
    /// CSV tables sharing one header layout
    #[serde(rename = "csv")]
    Csv {
        /// Time unit annotation, e.g. `"days since 2000-01-01"`
        unit: String,
        /// Name of the time column, if the default candidates don't apply
        time_column: Option<String>,
    },
}

fn default_time_name() -> String {
    "time".to_string()
}

impl DatasetConfig {
    /// Loads a dataset configuration from a JSON or YAML file, chosen by
    /// file extension (`.yaml`/`.yml` parse as YAML, anything else as JSON).
    pub fn from_file<P: AsRef<Path>>(path: P) -> StreamResult<Self> {
        let content = fs::read_to_string(&path)?;
        let is_yaml = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
            .unwrap_or(false);
        if is_yaml {
            Self::from_yaml(&content)
        } else {
            Self::from_json(&content)
        }
    }

    /// Parses a dataset configuration from a JSON string.
    pub fn from_json(json_str: &str) -> StreamResult<Self> {
        let config: DatasetConfig = serde_json::from_str(json_str)?;
        Ok(config)
    }

    /// Parses a dataset configuration from a YAML string.
    pub fn from_yaml(yaml_str: &str) -> StreamResult<Self> {
        let config: DatasetConfig = serde_yaml::from_str(yaml_str)?;
        Ok(config)
    }

    /// String identifier of the configured format.
    pub fn kind(&self) -> &'static str {
        match self.format {
            FormatConfig::NetCdf { .. } => "netcdf",
            FormatConfig::Csv { .. } => "csv",
        }
    }

    /// Builds the global time axis for the configured dataset by scanning
    /// every file's time vector through the matching back-end.
    pub fn build_axis(&self) -> StreamResult<GlobalTimeAxis> {
        match &self.format {
            FormatConfig::NetCdf { variable, time_name } => {
                let mut source = NetCdfStream::new(&self.files, variable).with_time_name(time_name);
                build_axis(&mut source)
            }
            FormatConfig::Csv { unit, time_column } => {
                let mut source = CsvStream::new(&self.files, unit);
                if let Some(column) = time_column {
                    source = source.with_time_column(column);
                }
                build_axis(&mut source)
            }
        }
    }
}
