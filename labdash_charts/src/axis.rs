// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis generation.
//!
//! An axis is drawn in the coordinate space of its group: the origin sits on the plot edge
//! and the scale range runs along the axis. Each tick is a small group translated to its
//! position, holding a tick line and a label.

use kurbo::{BezPath, Point, Vec2};
use labdash_scene::{Node, Paint, TextAnchor, TextBaseline};
use peniko::Color;

use crate::format::{format_si, format_tick_with_step};
use crate::scale::{ScaleContinuous, ScaleKind, tick_step};
use crate::time::{format_time_tick, time_tick_step};

/// Axis orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis below the plot.
    Bottom,
    /// A vertical axis right of the plot.
    Right,
}

/// How tick labels are written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TickFormat {
    /// Chosen from the scale: step precision for linear, SI for log, clock time for time.
    #[default]
    Auto,
    /// One significant digit with an SI prefix.
    Si,
}

/// Axis styling.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Color of the domain line and tick lines.
    pub rule: Color,
    /// Stroke width of the domain line and tick lines.
    pub rule_width: f64,
    /// Fill color for tick labels.
    pub label_fill: Color,
    /// Font size for tick labels.
    pub label_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            rule: Color::from_rgb8(0x88, 0x88, 0x88),
            rule_width: 1.0,
            label_fill: Color::from_rgb8(0x66, 0x66, 0x66),
            label_font_size: 10.0,
        }
    }
}

/// An axis over a continuous scale.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisSpec {
    /// The scale the axis describes.
    pub scale: ScaleContinuous,
    /// Axis placement relative to the plot.
    pub orient: AxisOrient,
    /// Approximate number of ticks.
    pub tick_count: usize,
    /// Tick line length in pixels, pointing away from the plot.
    pub tick_size: f64,
    /// Gap between the end of a tick line and its label.
    pub tick_padding: f64,
    /// Label format.
    pub format: TickFormat,
    /// Styling.
    pub style: AxisStyle,
}

impl AxisSpec {
    /// Creates an axis with 5 ticks, 6px tick lines and 3px label padding.
    pub fn new(scale: ScaleContinuous, orient: AxisOrient) -> Self {
        Self {
            scale,
            orient,
            tick_count: 5,
            tick_size: 6.0,
            tick_padding: 3.0,
            format: TickFormat::Auto,
            style: AxisStyle::default(),
        }
    }

    /// Convenience for [`AxisOrient::Bottom`].
    pub fn bottom(scale: ScaleContinuous) -> Self {
        Self::new(scale, AxisOrient::Bottom)
    }

    /// Convenience for [`AxisOrient::Right`].
    pub fn right(scale: ScaleContinuous) -> Self {
        Self::new(scale, AxisOrient::Right)
    }

    /// Sets the approximate tick count.
    #[must_use]
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Sets the label format.
    #[must_use]
    pub fn with_format(mut self, format: TickFormat) -> Self {
        self.format = format;
        self
    }

    /// Tick values and their labels.
    pub fn tick_labels(&self) -> Vec<(f64, String)> {
        let ticks = self.scale.ticks(self.tick_count);
        let (d0, d1) = self.scale.domain();
        let step = match self.scale.kind() {
            ScaleKind::Time => time_tick_step(d0, d1, self.tick_count),
            ScaleKind::Linear | ScaleKind::Log => tick_step(d0, d1, self.tick_count),
        };
        ticks
            .into_iter()
            .map(|v| (v, self.format_tick(v, step)))
            .collect()
    }

    fn format_tick(&self, v: f64, step: f64) -> String {
        match (self.format, self.scale.kind()) {
            (TickFormat::Si, _) | (TickFormat::Auto, ScaleKind::Log) => format_si(v),
            (TickFormat::Auto, ScaleKind::Linear) => format_tick_with_step(v, step),
            (TickFormat::Auto, ScaleKind::Time) => format_time_tick(v, step),
        }
    }

    /// Builds the axis: a domain line followed by one group per tick.
    pub fn node(&self) -> Node {
        let mut children = vec![Node::stroked(
            "domain",
            self.domain_path(),
            self.style.rule,
            self.style.rule_width,
        )];
        for (v, label) in self.tick_labels() {
            let Some(pos) = self.scale.try_map(v) else {
                continue;
            };
            children.push(self.tick(pos, label));
        }
        Node::group("axis").with_children(children)
    }

    fn domain_path(&self) -> BezPath {
        let (r0, r1) = self.scale.range();
        let k = self.tick_size;
        let mut p = BezPath::new();
        match self.orient {
            AxisOrient::Bottom => {
                p.move_to((r0, k));
                p.line_to((r0, 0.0));
                p.line_to((r1, 0.0));
                p.line_to((r1, k));
            }
            AxisOrient::Right => {
                p.move_to((k, r0));
                p.line_to((0.0, r0));
                p.line_to((0.0, r1));
                p.line_to((k, r1));
            }
        }
        p
    }

    fn tick(&self, pos: f64, label: String) -> Node {
        let offset = self.tick_size + self.tick_padding;
        let (translate, end, label_pos, anchor, baseline) = match self.orient {
            AxisOrient::Bottom => (
                Vec2::new(pos, 0.0),
                Point::new(0.0, self.tick_size),
                Point::new(0.0, offset),
                TextAnchor::Middle,
                TextBaseline::Hanging,
            ),
            AxisOrient::Right => (
                Vec2::new(0.0, pos),
                Point::new(self.tick_size, 0.0),
                Point::new(offset, 0.0),
                TextAnchor::Start,
                TextBaseline::Middle,
            ),
        };
        let mut line = BezPath::new();
        line.move_to(Point::ZERO);
        line.line_to(end);
        Node::group("tick")
            .translated(translate)
            .with_child(Node::stroked(
                "tick-line",
                line,
                self.style.rule,
                self.style.rule_width,
            ))
            .with_child(Node::Text {
                class: Some("tick-label".into()),
                pos: label_pos,
                text: label,
                anchor,
                baseline,
                font_size: self.style.label_font_size,
                fill: Paint::Solid(self.style.label_fill),
            })
    }
}
