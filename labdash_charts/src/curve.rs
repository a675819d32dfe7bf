// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotone cubic interpolation in x.
//!
//! The curve passes through every input point and preserves monotonicity in y between
//! consecutive points, assuming x is monotone (Steffen's method). Tangents at interior points
//! come from the three-point slope; the end tangents are one-sided.

use kurbo::BezPath;

/// Builds a monotone-x cubic path through `points` (already in pixel space).
///
/// A point identical to its predecessor is ignored. Two points produce a straight segment;
/// a single point produces a closed, zero-length path.
pub fn monotone_x(points: impl IntoIterator<Item = (f64, f64)>) -> BezPath {
    let mut curve = MonotoneX::new();
    for (x, y) in points {
        curve.point(x, y);
    }
    curve.finish()
}

#[derive(Debug)]
struct MonotoneX {
    path: BezPath,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    t0: f64,
    state: u8,
}

impl MonotoneX {
    fn new() -> Self {
        Self {
            path: BezPath::new(),
            x0: f64::NAN,
            y0: f64::NAN,
            x1: f64::NAN,
            y1: f64::NAN,
            t0: f64::NAN,
            state: 0,
        }
    }

    fn point(&mut self, x: f64, y: f64) {
        if x == self.x1 && y == self.y1 {
            return;
        }
        let mut t1 = f64::NAN;
        match self.state {
            0 => {
                self.state = 1;
                self.path.move_to((x, y));
            }
            1 => self.state = 2,
            2 => {
                self.state = 3;
                t1 = self.slope3(x, y);
                let t0 = self.slope2(t1);
                self.segment(t0, t1);
            }
            _ => {
                t1 = self.slope3(x, y);
                self.segment(self.t0, t1);
            }
        }
        self.x0 = self.x1;
        self.x1 = x;
        self.y0 = self.y1;
        self.y1 = y;
        self.t0 = t1;
    }

    fn finish(mut self) -> BezPath {
        match self.state {
            1 => self.path.close_path(),
            2 => self.path.line_to((self.x1, self.y1)),
            3 => {
                let t1 = self.slope2(self.t0);
                self.segment(self.t0, t1);
            }
            _ => {}
        }
        self.path
    }

    /// Cubic segment from `(x0, y0)` to `(x1, y1)` with the given end tangents.
    fn segment(&mut self, t0: f64, t1: f64) {
        let dx = (self.x1 - self.x0) / 3.0;
        self.path.curve_to(
            (self.x0 + dx, self.y0 + dx * t0),
            (self.x1 - dx, self.y1 - dx * t1),
            (self.x1, self.y1),
        );
    }

    /// Tangent at `(x1, y1)` given the next point.
    fn slope3(&self, x2: f64, y2: f64) -> f64 {
        let h0 = self.x1 - self.x0;
        let h1 = x2 - self.x1;
        let s0 = (self.y1 - self.y0) / nonzero_or_signed_zero(h0, h1);
        let s1 = (y2 - self.y1) / nonzero_or_signed_zero(h1, h0);
        let p = (s0 * h1 + s1 * h0) / (h0 + h1);
        if s0.is_nan() || s1.is_nan() || p.is_nan() {
            return 0.0;
        }
        let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
        if t.is_nan() { 0.0 } else { t }
    }

    /// One-sided tangent at the ends, from the interior tangent `t`.
    fn slope2(&self, t: f64) -> f64 {
        let h = self.x1 - self.x0;
        if h != 0.0 && !h.is_nan() {
            (3.0 * (self.y1 - self.y0) / h - t) / 2.0
        } else {
            t
        }
    }
}

/// Returns `h`, or a zero carrying the sign of `other` when `h` is zero or NaN.
fn nonzero_or_signed_zero(h: f64, other: f64) -> f64 {
    if h != 0.0 && !h.is_nan() {
        h
    } else if other < 0.0 {
        -0.0
    } else {
        0.0
    }
}

fn sign(x: f64) -> f64 {
    if x < 0.0 { -1.0 } else { 1.0 }
}
