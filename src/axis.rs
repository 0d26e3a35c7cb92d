//! # Global Time Axis
//!
//! This module builds one monotonic time axis out of the per-file time
//! vectors of a multi-file dataset. Every global position remembers which
//! file it came from and where it sits inside that file, so a resolved index
//! can be handed straight to a format back-end.
//!
//! The axis is immutable after construction and safe to share read-only
//! across readers; per-reader position state lives in
//! [`StreamCursor`](crate::cursor::StreamCursor).

use serde::Serialize;

use crate::calendar::{date_to_julian, julian_to_datestring};
use crate::error::{StreamError, StreamResult};
use crate::resolve::StreamIndex;
use crate::units::CalendarUnit;

/// One global time axis concatenated from per-file time vectors.
///
/// `times` holds sample instants in canonical days since the unit's base
/// instant, strictly non-decreasing. `file_of`/`local_of` are parallel
/// sequences mapping each global position back to its source file.
#[derive(Debug, Clone)]
pub struct GlobalTimeAxis {
    unit: CalendarUnit,
    times: Vec<f64>,
    file_of: Vec<usize>,
    local_of: Vec<usize>,
    step: f64,
    span: f64,
}

/// One row of an axis dump, used for validation and debugging output.
/// Not a stability-bearing format.
#[derive(Debug, Clone, Serialize)]
pub struct AxisRow {
    pub global_idx: usize,
    pub file_idx: usize,
    pub local_idx: usize,
    pub days: f64,
    pub date: String,
}

impl GlobalTimeAxis {
    /// Builds an axis from per-file time vectors, all expressed in `unit`.
    ///
    /// Files must be supplied in chronological order; the axis does not sort
    /// for the caller, since reordering would hide mistakes about which file
    /// covers which period.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::UnsortedTimeAxis`] if the concatenated time
    /// vector is not non-decreasing.
    pub fn build(per_file_times: &[Vec<f64>], unit: CalendarUnit) -> StreamResult<Self> {
        let total: usize = per_file_times.iter().map(|v| v.len()).sum();
        let mut times = Vec::with_capacity(total);
        let mut file_of = Vec::with_capacity(total);
        let mut local_of = Vec::with_capacity(total);

        for (file_idx, tvec) in per_file_times.iter().enumerate() {
            for (local_idx, &t) in tvec.iter().enumerate() {
                times.push(t * unit.scale_to_days);
                file_of.push(file_idx);
                local_of.push(local_idx);
            }
        }

        if let Some(position) = (1..times.len()).find(|&i| times[i] < times[i - 1]) {
            return Err(StreamError::UnsortedTimeAxis { position });
        }

        // tstep assumes uniform sample spacing; span pads one synthetic step
        // beyond the last sample and serves as the cyclic period. Irregular
        // spacing degrades resolver accuracy, not the structure itself.
        let n = times.len();
        let step = if n > 1 {
            (times[n - 1] - times[0]) / (n - 1) as f64
        } else {
            0.0
        };
        let span = if n > 0 {
            times[n - 1] - times[0] + step
        } else {
            0.0
        };

        Ok(GlobalTimeAxis {
            unit,
            times,
            file_of,
            local_of,
            step,
            span,
        })
    }

    /// Builds an axis from `(times, unit_string)` pairs as delivered by a
    /// format back-end, enforcing that every file shares the first file's
    /// unit.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::MismatchedUnit`] when a later file's unit
    /// string differs from the first file's, plus any error of
    /// [`CalendarUnit::parse`] or [`GlobalTimeAxis::build`].
    pub fn from_annotated(per_file: &[(Vec<f64>, String)]) -> StreamResult<Self> {
        let first_unit = per_file
            .first()
            .map(|(_, u)| u.as_str())
            .unwrap_or("days since 1970-01-01");
        for (file, (_, unit_str)) in per_file.iter().enumerate() {
            if unit_str != first_unit {
                return Err(StreamError::MismatchedUnit {
                    expected: first_unit.to_string(),
                    found: unit_str.clone(),
                    file,
                });
            }
        }
        let unit = CalendarUnit::parse(first_unit)?;
        let vectors: Vec<Vec<f64>> = per_file.iter().map(|(v, _)| v.clone()).collect();
        Self::build(&vectors, unit)
    }

    /// Number of samples across all files.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// The calendar unit shared by every file of the dataset.
    pub fn unit(&self) -> &CalendarUnit {
        &self.unit
    }

    /// Julian day number of the unit's base instant.
    pub fn base_julian(&self) -> f64 {
        date_to_julian(self.unit.base)
    }

    /// Representative sample spacing in days (0 for fewer than two samples).
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Covered span in days, padded by one step past the last sample; used
    /// as the period for cyclic extension. 0 for an empty or single-sample
    /// axis.
    pub fn span(&self) -> f64 {
        self.span
    }

    /// Sample instants in canonical days since base.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Sample instant at a global position, in canonical days since base.
    pub fn time_at(&self, global_idx: usize) -> f64 {
        self.times[global_idx]
    }

    /// The consistent (global, file, local) triple at a global position.
    pub fn index_at(&self, global_idx: usize) -> StreamIndex {
        StreamIndex {
            global_idx,
            file_idx: self.file_of[global_idx],
            local_idx: self.local_of[global_idx],
        }
    }

    /// Human-readable date of the sample at a global position.
    pub fn date_string(&self, global_idx: usize) -> String {
        julian_to_datestring(self.base_julian() + self.times[global_idx])
    }

    /// Dumps the full axis as `(global, file, local, days, date)` rows.
    pub fn dump(&self) -> Vec<AxisRow> {
        let base = self.base_julian();
        (0..self.times.len())
            .map(|i| AxisRow {
                global_idx: i,
                file_idx: self.file_of[i],
                local_idx: self.local_of[i],
                days: self.times[i],
                date: julian_to_datestring(base + self.times[i]),
            })
            .collect()
    }
}
