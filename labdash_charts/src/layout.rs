// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart layout from an available width.
//!
//! Charts fill the width they are given. A margin proportional to the width surrounds the
//! plot, the bottom and right axes each reserve a fixed band, and the plot is twice as wide
//! as it is tall.

use kurbo::Vec2;

/// Thickness reserved for each axis, in pixels.
pub const AXIS_SIZE: f64 = 30.0;

/// Resolved chart geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    /// Outer margin on every side.
    pub margin: f64,
    /// Thickness of the axis bands.
    pub axis_size: f64,
    /// Plot width.
    pub chart_width: f64,
    /// Plot height.
    pub chart_height: f64,
}

impl ChartLayout {
    /// Lays out a chart for `width` pixels.
    ///
    /// `height_fraction` divides the plot height; `1.0` keeps the 2:1 aspect ratio. Widths too
    /// small to hold the margins and axis produce an empty plot.
    pub fn for_width(width: f64, height_fraction: f64) -> Self {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        let margin = (width / 64.0).floor();
        let chart_width = (width - 2.0 * margin - AXIS_SIZE).max(0.0);
        let mut chart_height = (chart_width / 2.0).round();
        if height_fraction.is_finite() && height_fraction > 0.0 {
            chart_height /= height_fraction;
        }
        Self {
            margin,
            axis_size: AXIS_SIZE,
            chart_width,
            chart_height,
        }
    }

    /// Surface width.
    pub fn width(&self) -> f64 {
        2.0 * self.margin + self.axis_size + self.chart_width
    }

    /// Surface height.
    pub fn height(&self) -> f64 {
        2.0 * self.margin + self.axis_size + self.chart_height
    }

    /// Offset of the plot origin (bottom-left corner of the plot).
    pub fn plot_origin(&self) -> Vec2 {
        Vec2::new(self.margin, self.margin + self.chart_height)
    }

    /// Offset of the right axis origin (bottom-right corner of the plot).
    pub fn right_axis_origin(&self) -> Vec2 {
        Vec2::new(self.margin + self.chart_width, self.margin + self.chart_height)
    }

    /// Pixel range for x scales.
    pub fn x_range(&self) -> f64 {
        self.chart_width
    }

    /// Pixel range for y scales; negative, since values grow upward from the origin.
    pub fn y_range(&self) -> f64 {
        -self.chart_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_640() {
        let l = ChartLayout::for_width(640.0, 1.0);
        assert_eq!(l.margin, 10.0);
        assert_eq!(l.chart_width, 590.0);
        assert_eq!(l.chart_height, 295.0);
        assert_eq!(l.width(), 640.0);
        assert_eq!(l.height(), 345.0);
        assert_eq!(l.plot_origin(), Vec2::new(10.0, 305.0));
        assert_eq!(l.right_axis_origin(), Vec2::new(600.0, 305.0));
    }

    #[test]
    fn height_fraction_shrinks_the_plot() {
        let l = ChartLayout::for_width(640.0, 2.0);
        assert_eq!(l.chart_height, 147.5);
        assert_eq!(l.y_range(), -147.5);
    }

    #[test]
    fn tiny_widths_clamp() {
        let l = ChartLayout::for_width(10.0, 1.0);
        assert_eq!(l.chart_width, 0.0);
        assert_eq!(l.chart_height, 0.0);
    }
}
