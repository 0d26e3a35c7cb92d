//! # Format Back-End Capability Trait
//!
//! The temporal index core never parses file bytes itself. A format back-end
//! supplies raw per-file time vectors with their unit annotation, switches
//! the externally-owned file handle, and fetches a payload once a discrete
//! location is known. Format-specific readers implement this capability set
//! rather than subclassing shared mutable state.

use crate::error::StreamResult;

/// Capability set a format back-end provides to the temporal index core.
pub trait TimeSource {
    /// Payload type returned by [`fetch_at`](TimeSource::fetch_at): a
    /// gridded block for array formats, a row for tabular ones.
    type Record;

    /// One raw time vector and its unit string per file, in the
    /// caller-specified file order. Each file is opened once for this scan;
    /// no handle is left open afterwards.
    fn time_vectors(&mut self) -> StreamResult<Vec<(Vec<f64>, String)>>;

    /// Switches the open handle to the given file. Opening file `i` closes
    /// whatever was open before it.
    fn open_file(&mut self, file_idx: usize) -> StreamResult<()>;

    /// Closes the currently open file, if any.
    fn close_file(&mut self);

    /// Fetches the payload at a position within the currently open file.
    fn fetch_at(&mut self, local_idx: usize) -> StreamResult<Self::Record>;
}
