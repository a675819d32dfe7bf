// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series data.

/// A single sample of a series.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// Position along the x axis (a step index, or unix seconds for wall-clock series).
    pub step: f64,
    /// Raw value.
    pub value: f64,
    /// Smoothed value.
    pub smoothed: f64,
}

impl Point {
    /// Creates a point.
    pub const fn new(step: f64, value: f64, smoothed: f64) -> Self {
        Self {
            step,
            value,
            smoothed,
        }
    }
}

/// A named, step-ordered sequence of points.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Series {
    /// Display label, unique within a chart.
    pub name: String,
    /// Points, non-decreasing by step.
    pub points: Vec<Point>,
}

impl Series {
    /// Creates a series.
    pub fn new(name: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    /// Builds a series from parallel columns, truncated to the shortest one.
    pub fn from_columns(
        name: impl Into<String>,
        step: &[f64],
        value: &[f64],
        smoothed: &[f64],
    ) -> Self {
        let points = step
            .iter()
            .zip(value)
            .zip(smoothed)
            .map(|((&s, &v), &m)| Point::new(s, v, m))
            .collect();
        Self::new(name, points)
    }

    /// Returns `true` if the series has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// The last point, if any.
    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    /// Step of the first and last points.
    pub fn step_span(&self) -> Option<(f64, f64)> {
        Some((self.points.first()?.step, self.points.last()?.step))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_truncate_to_shortest() {
        let s = Series::from_columns("loss", &[0.0, 1.0, 2.0], &[3.0, 2.0], &[3.0, 2.5, 2.0]);
        assert_eq!(s.len(), 2);
        assert_eq!(s.last(), Some(&Point::new(1.0, 2.0, 2.5)));
        assert_eq!(s.step_span(), Some((0.0, 1.0)));
    }

    #[test]
    fn empty_series_has_no_span() {
        assert_eq!(Series::new("x", Vec::new()).step_span(), None);
    }
}
