//! # Temporal Index Resolution
//!
//! Maps an arbitrary query time (a Julian day number) onto a discrete sample
//! position of a [`GlobalTimeAxis`]. This single algorithm serves every
//! client of the crate, gridded-array and tabular-row back-ends alike;
//! re-implementing it per format is exactly the duplication this module
//! exists to remove.

use crate::axis::GlobalTimeAxis;
use crate::error::{StreamError, StreamResult};

/// A set of indices locating one sample within a multi-file dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamIndex {
    /// Index within the concatenated global time vector.
    pub global_idx: usize,
    /// Index of the file containing the sample.
    pub file_idx: usize,
    /// Index within that file's own time vector.
    pub local_idx: usize,
}

/// Floating modulo with a result always in `[0, period)`.
pub(crate) fn positive_fmod(x: f64, period: f64) -> f64 {
    let res = x % period;
    if res < 0.0 { res + period } else { res }
}

/// Resolves a query Julian day to the sample whose time is the greatest one
/// not exceeding it.
///
/// With `periodic`, the query is first wrapped into the axis's principal
/// range using `span` as the cyclic period, so the finite axis extends
/// indefinitely in both directions. Without it, out-of-range queries clamp
/// to the nearest boundary sample.
///
/// With `centered`, samples represent interval midpoints rather than
/// interval starts, so the query is shifted forward by half a step before
/// the search:
///
/// ```text
///   |----0----|-----1----|----2----|---
///   x--->0    |     1    |            shift x by half the interval size
///   |    x--->0     1    |    2
///   |    0  x--->0  1    |    2
///   |    0    | x--->1   |    2       a query just past the midpoint lands on 1
/// ```
///
/// A query exactly at a midpoint resolves to the later sample.
///
/// # Errors
///
/// Returns [`StreamError::EmptyAxis`] for a zero-length axis.
pub fn resolve(
    axis: &GlobalTimeAxis,
    julian_day: f64,
    periodic: bool,
    centered: bool,
) -> StreamResult<StreamIndex> {
    if axis.is_empty() {
        return Err(StreamError::EmptyAxis);
    }

    // convert desired time to the axis's unit (days since base)
    let mut t = julian_day - axis.base_julian();

    if centered {
        t += axis.step() / 2.0;
    }

    let times = axis.times();
    if periodic && axis.span() > 0.0 {
        t = times[0] + positive_fmod(t - times[0], axis.span());
    }

    // index such that times[idx] is just less than t; the sentinel -1 (all
    // samples exceed t) and the past-the-end case both clamp to a boundary,
    // which is only reachable when periodic is false
    let upper = times.partition_point(|&sample| sample <= t);
    let idx = (upper as isize - 1).clamp(0, times.len() as isize - 1) as usize;

    Ok(axis.index_at(idx))
}
