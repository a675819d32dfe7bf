// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value ranges over groups of series.

use crate::series::{Point, Series};

/// Padding applied around a single instant on a time axis.
pub const TIME_PAD_SECS: f64 = 30.0;

/// A closed `[min, max]` range with `min <= max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Extent {
    /// Creates an extent, ordering the bounds.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Returns `true` if the extent is a single value.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Widens a degenerate extent so a linear mapping never divides by zero.
    ///
    /// `v` becomes `v ± |v| / 10`, or `[-1, 1]` for zero.
    #[must_use]
    pub fn padded_linear(self) -> Self {
        if !self.is_degenerate() {
            return self;
        }
        let pad = if self.min == 0.0 {
            1.0
        } else {
            self.min.abs() * 0.1
        };
        Self::new(self.min - pad, self.max + pad)
    }

    /// Widens a degenerate time extent (unix seconds) by [`TIME_PAD_SECS`] on each side.
    #[must_use]
    pub fn padded_time(self) -> Self {
        if !self.is_degenerate() {
            return self;
        }
        Self::new(self.min - TIME_PAD_SECS, self.max + TIME_PAD_SECS)
    }

    /// Widens a degenerate positive extent by one decade on each side.
    #[must_use]
    pub fn padded_log(self) -> Self {
        if !self.is_degenerate() {
            return self;
        }
        Self::new(self.min / 10.0, self.max * 10.0)
    }

    /// Returns this extent as a `(min, max)` tuple.
    pub fn to_tuple(self) -> (f64, f64) {
        (self.min, self.max)
    }
}

/// Scans every point of every series through `accessor` and returns the covered range.
///
/// - Non-finite values are ignored.
/// - With `strictly_positive`, values `<= 0` are ignored too.
/// - With `include_zero`, the result is widened to contain `0`.
///
/// Returns `None` when no value survives the scan.
pub fn compute_extent<'a>(
    series: impl IntoIterator<Item = &'a Series>,
    accessor: impl Fn(&Point) -> f64,
    include_zero: bool,
    strictly_positive: bool,
) -> Option<Extent> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for s in series {
        for p in &s.points {
            let v = accessor(p);
            if !v.is_finite() || (strictly_positive && v <= 0.0) {
                continue;
            }
            min = min.min(v);
            max = max.max(v);
        }
    }
    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    if include_zero {
        min = min.min(0.0);
        max = max.max(0.0);
    }
    Some(Extent { min, max })
}
