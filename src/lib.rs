//! # chronostream
//!
//! A Rust library for temporal stream indexing over time-ordered, possibly
//! multi-file geospatial and tabular datasets (gridded NetCDF arrays and
//! CSV time series).
//!
//! ## Features
//!
//! - **One global time axis**: per-file time vectors concatenated into a
//!   single monotonic sequence that remembers which file every sample lives in
//! - **CF unit handling**: `"<unit> since <date>"` strings parsed into a
//!   canonical days-since-base scale
//! - **Continuous queries**: any Julian day resolves to the nearest sample
//!   not after it, with periodic (cyclic) extension and centered-interval
//!   correction
//! - **Lazy file switching**: cursors advance across file boundaries and
//!   only then ask the back-end to swap its open handle
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chronostream::TimeSource;
//! use chronostream::calendar::datestring_to_julian;
//! use chronostream::csvsource::CsvStream;
//! use chronostream::cursor::StreamCursor;
//!
//! let mut source = CsvStream::new(
//!     &["co2_2000_2010.csv", "co2_2011_2020.csv"],
//!     "days since 2000-01-01",
//! );
//! let axis = chronostream::build_axis(&mut source)?;
//!
//! let mut cursor = StreamCursor::new();
//! let j = datestring_to_julian("2013-06-01")?;
//! let idx = cursor.jump_to_time(&axis, &mut source, j, true, false)?;
//! let row = source.fetch_at(idx.local_idx)?;
//! # Ok::<(), chronostream::error::StreamError>(())
//! ```

pub mod axis;
pub mod calendar;
pub mod cli;
pub mod csvsource;
pub mod cursor;
pub mod error;
pub mod info;
pub mod input;
pub mod ncsource;
pub mod resolve;
pub mod source;
pub mod units;


pub use crate::axis::GlobalTimeAxis;
pub use crate::cursor::StreamCursor;
pub use crate::error::{StreamError, StreamResult};
pub use crate::resolve::{StreamIndex, resolve};
pub use crate::source::TimeSource;

/// Builds the global time axis for a dataset by scanning every file's time
/// vector through its back-end.
///
/// This is the orchestration entry point: it collects the per-file
/// `(times, unit)` pairs, enforces that every file shares the first file's
/// unit, parses that unit once, and concatenates the scaled vectors into
/// one [`GlobalTimeAxis`]. No file handle is left open afterwards; the
/// first cursor movement performs the first open.
///
/// # Errors
///
/// Any back-end read error, plus [`StreamError::MismatchedUnit`],
/// [`StreamError::MalformedUnit`] and [`StreamError::UnsortedTimeAxis`]
/// from axis construction.
pub fn build_axis<S: TimeSource + ?Sized>(source: &mut S) -> StreamResult<GlobalTimeAxis> {
    let per_file = source.time_vectors()?;
    GlobalTimeAxis::from_annotated(&per_file)
}
