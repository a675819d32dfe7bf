// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line and fill geometry for a single series.

use kurbo::{BezPath, PathEl, Point as KurboPoint};

use crate::curve::monotone_x;
use crate::scale::ScaleContinuous;
use crate::series::{Point, Series};

/// Pixel-space geometry of one series.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesPaths {
    /// Monotone curve through `(step, smoothed)`.
    pub smoothed: BezPath,
    /// Monotone curve through `(step, value)`.
    pub raw: BezPath,
    /// The smoothed curve closed against `y = 0`.
    pub fill: BezPath,
}

impl SeriesPaths {
    /// Builds all three paths for `series`.
    pub fn new(series: &Series, x: &ScaleContinuous, y: &ScaleContinuous) -> Self {
        let smoothed = line_path(series, x, y, |p| p.smoothed);
        let raw = line_path(series, x, y, |p| p.value);
        let fill = fill_path(&smoothed);
        Self {
            smoothed,
            raw,
            fill,
        }
    }
}

/// Builds a monotone curve through `(step, accessor(point))`.
///
/// Points whose mapped coordinates are not finite are skipped.
pub fn line_path(
    series: &Series,
    x: &ScaleContinuous,
    y: &ScaleContinuous,
    accessor: impl Fn(&Point) -> f64,
) -> BezPath {
    monotone_x(
        series
            .points
            .iter()
            .filter_map(|p| Some((x.try_map(p.step)?, y.try_map(accessor(p))?))),
    )
}

/// Closes a line against the pixel baseline `y = 0`.
///
/// The result starts on the baseline below the first point of `line`, follows `line`, and
/// drops back to the baseline below its last point. An empty line yields an empty fill.
pub fn fill_path(line: &BezPath) -> BezPath {
    let mut fill = BezPath::new();
    let mut last: Option<KurboPoint> = None;
    for el in line.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                if last.is_none() {
                    fill.move_to((p.x, 0.0));
                }
                fill.line_to(p);
                last = Some(p);
            }
            PathEl::LineTo(p) => {
                fill.line_to(p);
                last = Some(p);
            }
            PathEl::QuadTo(c, p) => {
                fill.quad_to(c, p);
                last = Some(p);
            }
            PathEl::CurveTo(c1, c2, p) => {
                fill.curve_to(c1, c2, p);
                last = Some(p);
            }
            PathEl::ClosePath => {}
        }
    }
    if let Some(p) = last {
        fill.line_to((p.x, 0.0));
        fill.close_path();
    }
    fill
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extent::Extent;
    use crate::scale::{ScaleKind, compute_scale};

    fn linear(min: f64, max: f64, range: f64) -> ScaleContinuous {
        compute_scale(Extent::new(min, max), range, ScaleKind::Linear)
    }

    #[test]
    fn fill_is_anchored_to_the_baseline() {
        let s = Series::new(
            "a",
            vec![Point::new(0.0, 1.0, 1.0), Point::new(10.0, 5.0, 4.0)],
        );
        let paths = SeriesPaths::new(&s, &linear(0.0, 10.0, 100.0), &linear(0.0, 5.0, -50.0));
        assert_eq!(
            paths.fill.elements(),
            [
                PathEl::MoveTo(KurboPoint::new(0.0, 0.0)),
                PathEl::LineTo(KurboPoint::new(0.0, -10.0)),
                PathEl::LineTo(KurboPoint::new(100.0, -40.0)),
                PathEl::LineTo(KurboPoint::new(100.0, 0.0)),
                PathEl::ClosePath,
            ]
        );
        assert_eq!(
            paths.raw.elements().last(),
            Some(&PathEl::LineTo(KurboPoint::new(100.0, -50.0)))
        );
    }

    #[test]
    fn unmappable_points_are_skipped() {
        let s = Series::new(
            "a",
            vec![
                Point::new(0.0, -1.0, -1.0),
                Point::new(1.0, 10.0, 10.0),
                Point::new(2.0, 100.0, 100.0),
            ],
        );
        let y = compute_scale(Extent::new(10.0, 100.0), -100.0, ScaleKind::Log);
        let paths = SeriesPaths::new(&s, &linear(0.0, 2.0, 100.0), &y);
        for el in paths.raw.elements().iter().chain(paths.fill.elements()) {
            if let PathEl::MoveTo(p) | PathEl::LineTo(p) = el {
                assert!(p.x.is_finite() && p.y.is_finite(), "non-finite point in {el:?}");
            }
        }
        assert_eq!(
            paths.raw.elements()[0],
            PathEl::MoveTo(KurboPoint::new(50.0, 0.0))
        );
    }

    #[test]
    fn empty_series_has_empty_paths() {
        let paths = SeriesPaths::new(
            &Series::new("a", Vec::new()),
            &linear(0.0, 1.0, 1.0),
            &linear(0.0, 1.0, -1.0),
        );
        assert_eq!(paths, SeriesPaths::default());
    }
}
