//! # NetCDF Back-End
//!
//! Streams a data variable out of a sequence of NetCDF files sharing one
//! time coordinate. The time vectors and their `units` attribute are read
//! once, up front, by opening each file in turn; afterwards only the file a
//! cursor currently points into is kept open.
//!
//! Fetched blocks come back unpacked: `scale_factor`/`add_offset` applied
//! and samples equal to the missing value replaced by NaN.

use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{StreamError, StreamResult};
use crate::source::TimeSource;

/// One time slice of a gridded variable, row-major over the non-time
/// dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct GridBlock {
    pub values: Vec<f64>,
    pub shape: Vec<usize>,
}

/// Multi-file NetCDF source for one named data variable.
pub struct NetCdfStream {
    paths: Vec<PathBuf>,
    variable: String,
    time_name: String,
    file: Option<netcdf::File>,
    scale_factor: f64,
    add_offset: f64,
    missing_value: f64,
}

impl NetCdfStream {
    /// Creates a source over `paths` (in chronological order) reading the
    /// named data variable. The time coordinate defaults to `time`.
    pub fn new<P: AsRef<Path>>(paths: &[P], variable: &str) -> Self {
        NetCdfStream {
            paths: paths.iter().map(|p| p.as_ref().to_path_buf()).collect(),
            variable: variable.to_string(),
            time_name: "time".to_string(),
            file: None,
            scale_factor: 1.0,
            add_offset: 0.0,
            missing_value: f64::NAN,
        }
    }

    /// Overrides the name of the time coordinate variable.
    pub fn with_time_name(mut self, name: &str) -> Self {
        self.time_name = name.to_string();
        self
    }

    pub fn file_count(&self) -> usize {
        self.paths.len()
    }

    /// Reads the unpacking attributes of the data variable in the currently
    /// open file. Absent attributes fall back to scale 1, offset 0 and a NaN
    /// missing value; each fallback is observable at debug level.
    fn read_packing(&mut self) -> StreamResult<()> {
        let file = self.file.as_ref().ok_or(StreamError::NoOpenFile)?;
        let var = file
            .variable(&self.variable)
            .ok_or_else(|| StreamError::MissingVariable(self.variable.clone()))?;

        self.scale_factor = attr_f64(&var, "scale_factor").unwrap_or_else(|| {
            debug!("variable '{}' has no scale_factor, using 1", self.variable);
            1.0
        });
        self.add_offset = attr_f64(&var, "add_offset").unwrap_or_else(|| {
            debug!("variable '{}' has no add_offset, using 0", self.variable);
            0.0
        });
        self.missing_value = attr_f64(&var, "missing_value")
            .or_else(|| attr_f64(&var, "_FillValue"))
            .unwrap_or_else(|| {
                debug!(
                    "variable '{}' has no missing_value or _FillValue, using NaN",
                    self.variable
                );
                f64::NAN
            });
        Ok(())
    }
}

impl TimeSource for NetCdfStream {
    type Record = GridBlock;

    fn time_vectors(&mut self) -> StreamResult<Vec<(Vec<f64>, String)>> {
        let mut per_file = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            let file = netcdf::open(path)?;
            let var = file
                .variable(&self.time_name)
                .ok_or_else(|| StreamError::MissingVariable(self.time_name.clone()))?;

            let values: Vec<f64> = var.get_values(..)?;

            let units = match var.attribute("units").map(|a| a.value()) {
                Some(Ok(netcdf::AttributeValue::Str(s))) => s,
                _ => {
                    return Err(StreamError::MalformedUnit(format!(
                        "time variable '{}' in {} has no string 'units' attribute",
                        self.time_name,
                        path.display()
                    )));
                }
            };

            per_file.push((values, units));
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
        self.file = Some(netcdf::open(&self.paths[file_idx])?);
        self.read_packing()
    }

    fn close_file(&mut self) {
        self.file = None;
    }

    /// Reads the data variable's block at one local time index, all other
    /// dimensions in full. Variables without a time dimension are read
    /// whole.
    fn fetch_at(&mut self, local_idx: usize) -> StreamResult<GridBlock> {
        let file = self.file.as_ref().ok_or(StreamError::NoOpenFile)?;
        let var = file
            .variable(&self.variable)
            .ok_or_else(|| StreamError::MissingVariable(self.variable.clone()))?;

        let dims = var.dimensions();
        let time_pos = dims.iter().position(|d| d.name() == self.time_name);

        let extents: Vec<netcdf::Extent> = dims
            .iter()
            .enumerate()
            .map(|(i, d)| {
                if Some(i) == time_pos {
                    netcdf::Extent::from(local_idx..local_idx + 1)
                } else {
                    netcdf::Extent::from(0..d.len())
                }
            })
            .collect();
        let shape: Vec<usize> = dims
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != time_pos)
            .map(|(_, d)| d.len())
            .collect();

        let raw: Vec<f64> = var.get_values(netcdf::Extents::from(extents))?;
        let values = raw
            .into_iter()
            .map(|v| {
                if v == self.missing_value {
                    f64::NAN
                } else {
                    v * self.scale_factor + self.add_offset
                }
            })
            .collect();

        Ok(GridBlock { values, shape })
    }
}

/// Numeric attribute lookup with the integer widths NetCDF packing
/// attributes show up in.
fn attr_f64(var: &netcdf::Variable, name: &str) -> Option<f64> {
    match var.attribute(name)?.value().ok()? {
        netcdf::AttributeValue::Double(v) => Some(v),
        netcdf::AttributeValue::Float(v) => Some(v as f64),
        netcdf::AttributeValue::Int(v) => Some(v as f64),
        netcdf::AttributeValue::Short(v) => Some(v as f64),
        netcdf::AttributeValue::Schar(v) => Some(v as f64),
        _ => None,
    }
}
