//! # Stream Cursor
//!
//! A cursor holds one current position on a [`GlobalTimeAxis`] and moves it
//! by absolute time jumps or relative steps. When a move lands in a
//! different file than the one currently open, the cursor asks the back-end
//! to switch handles before committing the new position, so a failed switch
//! leaves the cursor where it was and the caller can retry after fixing the
//! external problem.
//!
//! The axis itself is immutable and may be shared by many cursors; each
//! concurrent reader owns its own cursor.

use log::debug;

use crate::axis::GlobalTimeAxis;
use crate::error::{StreamError, StreamResult};
use crate::resolve::{StreamIndex, resolve};
use crate::source::TimeSource;

fn positive_mod(x: i64, n: i64) -> i64 {
    let res = x % n;
    if res < 0 { res + n } else { res }
}

/// Mutable traversal state over a shared, read-only time axis.
#[derive(Debug, Default)]
pub struct StreamCursor {
    current: StreamIndex,
    open_file: Option<usize>,
}

impl StreamCursor {
    /// A fresh cursor at the zero triple with no file considered open; the
    /// first jump or advance performs the first open.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current (global, file, local) triple.
    pub fn current(&self) -> StreamIndex {
        self.current
    }

    /// Which file index the cursor has asked the back-end to open, if any.
    pub fn open_file(&self) -> Option<usize> {
        self.open_file
    }

    /// Clears the cursor back to its initial state. The axis is unaffected;
    /// it is rebuilt only by a fresh construction.
    pub fn reset(&mut self) {
        self.current = StreamIndex::default();
        self.open_file = None;
    }

    /// Jumps to the sample resolved for a query Julian day and switches the
    /// back-end's file handle if the sample lives in a different file.
    ///
    /// # Errors
    ///
    /// [`StreamError::EmptyAxis`] on a zero-length axis, or
    /// [`StreamError::FileSwitch`] if the back-end fails to open the target
    /// file; in the latter case the cursor keeps its previous position.
    pub fn jump_to_time<S: TimeSource + ?Sized>(
        &mut self,
        axis: &GlobalTimeAxis,
        source: &mut S,
        julian_day: f64,
        periodic: bool,
        centered: bool,
    ) -> StreamResult<StreamIndex> {
        let target = resolve(axis, julian_day, periodic, centered)?;
        self.commit(source, target)
    }

    /// Moves the cursor by a signed number of samples: cyclically with
    /// `periodic`, clamped to the axis ends otherwise. File switching
    /// behaves exactly as in [`jump_to_time`](StreamCursor::jump_to_time).
    pub fn advance<S: TimeSource + ?Sized>(
        &mut self,
        axis: &GlobalTimeAxis,
        source: &mut S,
        n: i64,
        periodic: bool,
    ) -> StreamResult<StreamIndex> {
        if axis.is_empty() {
            return Err(StreamError::EmptyAxis);
        }
        let len = axis.len() as i64;
        let raw = self.current.global_idx as i64 + n;
        let global_idx = if periodic {
            positive_mod(raw, len) as usize
        } else {
            raw.clamp(0, len - 1) as usize
        };
        self.commit(source, axis.index_at(global_idx))
    }

    /// Switches the file handle if needed, then commits the new position.
    /// The switch happens first so an error leaves `current` untouched.
    fn commit<S: TimeSource + ?Sized>(
        &mut self,
        source: &mut S,
        target: StreamIndex,
    ) -> StreamResult<StreamIndex> {
        if self.open_file != Some(target.file_idx) {
            debug!(
                "switching from file {:?} to file {}",
                self.open_file, target.file_idx
            );
            source
                .open_file(target.file_idx)
                .map_err(|e| StreamError::FileSwitch {
                    file: target.file_idx,
                    source: Box::new(e),
                })?;
            self.open_file = Some(target.file_idx);
        }
        self.current = target;
        Ok(target)
    }
}
