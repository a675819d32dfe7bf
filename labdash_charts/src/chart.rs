// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart composition.
//!
//! A chart is assembled from:
//! - a layout derived from the available width,
//! - the selected series and the scales fitted to them,
//! - one fill (when few enough series are plotted) and two lines per series,
//! - a bottom and a right axis.
//!
//! Rendering is a pure function of its arguments; only the chart id, which namespaces
//! gradient references, differs between two renders of the same input.

use core::sync::atomic::{AtomicU64, Ordering};

use labdash_scene::{LinearGradient, Node, Paint, Rendered, Surface};
use peniko::Color;

use crate::axis::{AxisSpec, TickFormat};
use crate::extent::{Extent, compute_extent};
use crate::layout::ChartLayout;
use crate::palette::{gradient_id, palette_color, palette_index};
use crate::path::SeriesPaths;
use crate::scale::{ScaleContinuous, ScaleKind, compute_scale};
use crate::selection::{Selected, Selection, select_for_plot};
use crate::series::Series;

/// Fills are drawn only when at most this many series are plotted.
pub const MAX_FILLED_SERIES: usize = 3;

/// Tick count used to nice linear value domains.
const NICE_TICK_COUNT: usize = 10;

static NEXT_CHART_ID: AtomicU64 = AtomicU64::new(1);

fn next_chart_id() -> String {
    format!("chart_{}", NEXT_CHART_ID.fetch_add(1, Ordering::Relaxed))
}

/// Value axis scaling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChartType {
    /// Linear value axis.
    #[default]
    Linear,
    /// Base-10 logarithmic value axis; non-positive values are not drawn.
    Log,
}

impl ChartType {
    /// Parses a chart type tag: `"log"` is [`ChartType::Log`], anything else is linear.
    pub fn from_tag(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("log") {
            Self::Log
        } else {
            Self::Linear
        }
    }

    /// The tag for this chart type.
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Log => "log",
        }
    }

    fn value_scale(self, extent: Extent, range: f64) -> ScaleContinuous {
        match self {
            Self::Linear => compute_scale(extent, range, ScaleKind::Linear).nice(NICE_TICK_COUNT),
            Self::Log => compute_scale(extent, range, ScaleKind::Log),
        }
    }

    fn value_extent(self, selected: &Selected<'_>) -> Option<Extent> {
        compute_extent(
            selected.series.iter().copied(),
            |p| p.value,
            false,
            self == Self::Log,
        )
    }
}

/// A chart over step-indexed series (training metrics, gradients, outputs).
///
/// The x domain spans the steps of every candidate series, so toggling series does not
/// move the x axis.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineChartSpec {
    /// Available width in pixels.
    pub width: f64,
    /// Value axis scaling.
    pub chart_type: ChartType,
    /// Which series are plotted.
    pub selection: Selection,
    /// Pinned chart id; a fresh one is allocated per render otherwise.
    pub chart_id: Option<String>,
    /// Approximate number of ticks on each axis.
    pub tick_count: usize,
}

impl LineChartSpec {
    /// Creates a linear chart with the default selection.
    pub fn new(width: f64) -> Self {
        Self {
            width,
            tick_count: 5,
            ..Self::default()
        }
    }

    /// Sets the chart type.
    #[must_use]
    pub fn with_chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = chart_type;
        self
    }

    /// Sets the selection.
    #[must_use]
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Pins the chart id.
    #[must_use]
    pub fn with_chart_id(mut self, id: impl Into<String>) -> Self {
        self.chart_id = Some(id.into());
        self
    }

    /// Renders `series`; `None` means the data is still loading.
    pub fn render(&self, series: Option<&[Series]>) -> Rendered {
        let Some(all) = series else {
            return Rendered::Loading;
        };
        if all.is_empty() {
            return Rendered::Empty;
        }
        let layout = ChartLayout::for_width(self.width, 1.0);
        let selected = select_for_plot(all, &self.selection);

        let Some(x_extent) = compute_extent(all, |p| p.step, false, false) else {
            log::debug!("no finite steps in {} series", all.len());
            return Rendered::Empty;
        };
        let Some(y_extent) = self.chart_type.value_extent(&selected) else {
            log::debug!("no drawable values in {} selected series", selected.len());
            return Rendered::Empty;
        };
        let x = compute_scale(x_extent, layout.x_range(), ScaleKind::Linear);
        let y = self.chart_type.value_scale(y_extent, layout.y_range());
        let x_axis = AxisSpec::bottom(x).with_tick_count(self.tick_count);
        let y_axis = AxisSpec::right(y).with_tick_count(self.tick_count);

        let id = self.chart_id.clone().unwrap_or_else(next_chart_id);
        Rendered::Chart(compose(id, &layout, &selected, x, y, x_axis, y_axis))
    }
}

/// A chart over wall-clock series (computer cpu, memory, disk, network, process).
///
/// Steps are unix seconds. The x domain spans the first series unless overridden.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeriesChartSpec {
    /// Available width in pixels.
    pub width: f64,
    /// Value axis scaling.
    pub chart_type: ChartType,
    /// Which series are plotted.
    pub selection: Selection,
    /// Pinned chart id; a fresh one is allocated per render otherwise.
    pub chart_id: Option<String>,
    /// Explicit value domain for linear charts.
    pub y_extent: Option<Extent>,
    /// Explicit time domain in unix seconds.
    pub x_extent: Option<Extent>,
    /// Forces the lower bound of a linear value domain.
    pub force_y_start: Option<f64>,
    /// Divides the plot height; `1.0` keeps the 2:1 aspect ratio.
    pub height_fraction: f64,
    /// Approximate number of ticks on the value axis.
    pub tick_count: usize,
}

impl Default for TimeSeriesChartSpec {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl TimeSeriesChartSpec {
    /// Creates a linear time chart with the default selection and 5 value ticks.
    pub fn new(width: f64) -> Self {
        Self {
            width,
            chart_type: ChartType::Linear,
            selection: Selection::Default,
            chart_id: None,
            y_extent: None,
            x_extent: None,
            force_y_start: None,
            height_fraction: 1.0,
            tick_count: 5,
        }
    }

    /// Sets the chart type.
    #[must_use]
    pub fn with_chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = chart_type;
        self
    }

    /// Sets the selection.
    #[must_use]
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Pins the chart id.
    #[must_use]
    pub fn with_chart_id(mut self, id: impl Into<String>) -> Self {
        self.chart_id = Some(id.into());
        self
    }

    /// Overrides the value domain (linear charts only).
    #[must_use]
    pub fn with_y_extent(mut self, extent: Extent) -> Self {
        self.y_extent = Some(extent);
        self
    }

    /// Overrides the time domain.
    #[must_use]
    pub fn with_x_extent(mut self, extent: Extent) -> Self {
        self.x_extent = Some(extent);
        self
    }

    /// Forces the lower bound of the value domain (linear charts only).
    #[must_use]
    pub fn with_force_y_start(mut self, start: f64) -> Self {
        self.force_y_start = Some(start);
        self
    }

    /// Sets the height fraction.
    #[must_use]
    pub fn with_height_fraction(mut self, fraction: f64) -> Self {
        self.height_fraction = fraction;
        self
    }

    /// Sets the value axis tick count.
    #[must_use]
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    fn time_extent(&self, all: &[Series]) -> Option<Extent> {
        if let Some(e) = self.x_extent {
            return Some(e);
        }
        match all.first().and_then(Series::step_span) {
            Some((a, b)) if a.is_finite() && b.is_finite() => Some(Extent::new(a, b)),
            _ => compute_extent(all, |p| p.step, false, false),
        }
    }

    fn value_extent(&self, selected: &Selected<'_>) -> Option<Extent> {
        if self.chart_type == ChartType::Log {
            return self.chart_type.value_extent(selected);
        }
        let extent = match self.y_extent {
            Some(e) => e,
            None => self.chart_type.value_extent(selected)?,
        };
        Some(match self.force_y_start {
            Some(start) => Extent::new(start, extent.max),
            None => extent,
        })
    }

    /// Renders `series`; `None` means the data is still loading.
    pub fn render(&self, series: Option<&[Series]>) -> Rendered {
        let Some(all) = series else {
            return Rendered::Loading;
        };
        if all.is_empty() {
            return Rendered::Empty;
        }
        let layout = ChartLayout::for_width(self.width, self.height_fraction);
        let selected = select_for_plot(all, &self.selection);

        let Some(x_extent) = self.time_extent(all) else {
            log::debug!("no finite timestamps in {} series", all.len());
            return Rendered::Empty;
        };
        let Some(y_extent) = self.value_extent(&selected) else {
            log::debug!("no drawable values in {} selected series", selected.len());
            return Rendered::Empty;
        };
        let x = compute_scale(x_extent, layout.x_range(), ScaleKind::Time);
        let y = self.chart_type.value_scale(y_extent, layout.y_range());
        let x_axis = AxisSpec::bottom(x);
        let y_axis = AxisSpec::right(y)
            .with_tick_count(self.tick_count)
            .with_format(TickFormat::Si);

        let id = self.chart_id.clone().unwrap_or_else(next_chart_id);
        Rendered::Chart(compose(id, &layout, &selected, x, y, x_axis, y_axis))
    }
}

fn compose(
    id: String,
    layout: &ChartLayout,
    selected: &Selected<'_>,
    x: ScaleContinuous,
    y: ScaleContinuous,
    x_axis: AxisSpec,
    y_axis: AxisSpec,
) -> Surface {
    let with_fill = selected.len() <= MAX_FILLED_SERIES;
    log::debug!(
        "composing {id}: {} series, x {:?}, y {:?}, fill {with_fill}",
        selected.len(),
        x.domain(),
        y.domain(),
    );

    let mut surface = Surface::new(id, layout.width(), layout.height());
    let mut fills = Vec::new();
    let mut lines = Vec::new();
    for (series, &index) in selected.series.iter().zip(&selected.original_indices) {
        let color = palette_color(index);
        let paths = SeriesPaths::new(series, &x, &y);
        if with_fill {
            let slot = palette_index(index);
            let gid = gradient_id(&surface.id, slot);
            if !surface.defs.iter().any(|g| g.id == gid) {
                surface.define(LinearGradient {
                    id: gid.clone(),
                    color,
                    top_opacity: 0.5,
                    bottom_opacity: 0.0,
                });
            }
            fills.push(Node::filled("line-fill", paths.fill, Paint::Gradient(gid)));
        }
        lines.push(Node::group("series").with_children([
            Node::stroked("smoothed-line", paths.smoothed, color, 2.0),
            Node::stroked("unsmoothed-line", paths.raw, faded(color), 1.0),
        ]));
    }

    surface.push(
        Node::group("plot")
            .translated(layout.plot_origin())
            .with_children(fills)
            .with_children(lines),
    );
    surface.push(
        Node::group("bottom-axis")
            .translated(layout.plot_origin())
            .with_child(x_axis.node()),
    );
    surface.push(
        Node::group("right-axis")
            .translated(layout.right_axis_origin())
            .with_child(y_axis.node()),
    );
    surface
}

fn faded(color: Color) -> Color {
    color.multiply_alpha(0.5)
}

#[cfg(test)]
mod tests {
    use kurbo::PathEl;

    use super::*;
    use crate::series::Point;

    fn series(name: &str, pts: &[(f64, f64, f64)]) -> Series {
        Series::new(
            name,
            pts.iter().map(|&(s, v, m)| Point::new(s, v, m)).collect(),
        )
    }

    fn many(n: usize) -> Vec<Series> {
        (0..n)
            .map(|i| {
                let k = i as f64;
                series(
                    &format!("s{i}"),
                    &[(0.0, k + 1.0, k + 1.0), (5.0, k + 2.0, k + 1.5)],
                )
            })
            .collect()
    }

    #[test]
    fn end_to_end_single_series() {
        let all = [series("a", &[(0.0, 1.0, 1.0), (10.0, 5.0, 4.0)])];
        let rendered = LineChartSpec::new(640.0)
            .with_selection(Selection::from_plot_idx(&[0]))
            .render(Some(&all));
        let surface = rendered.surface().expect("chart");
        assert_eq!(surface.height, 345.0);
        assert_eq!(surface.width, 640.0);
        assert_eq!(surface.paths_with_class("smoothed-line").len(), 1);
        assert_eq!(surface.paths_with_class("unsmoothed-line").len(), 1);
        assert_eq!(surface.paths_with_class("line-fill").len(), 1);
        assert_eq!(surface.defs.len(), 1);
    }

    #[test]
    fn fills_only_for_three_or_fewer_series() {
        for n in 1..=5 {
            let all = many(n);
            let sel = Selection::explicit(0..n);
            let rendered = LineChartSpec::new(400.0).with_selection(sel).render(Some(&all));
            let surface = rendered.surface().expect("chart");
            let fills = surface.paths_with_class("line-fill").len();
            assert_eq!(fills, if n <= 3 { n } else { 0 }, "n = {n}");
            assert_eq!(surface.paths_with_class("smoothed-line").len(), n);
        }
    }

    #[test]
    fn fills_paint_below_lines() {
        let all = many(2);
        let rendered = LineChartSpec::new(400.0)
            .with_selection(Selection::explicit([0, 1]))
            .render(Some(&all));
        let mut order = Vec::new();
        rendered.surface().expect("chart").walk(&mut |n| {
            if let Some(c @ ("line-fill" | "smoothed-line")) = n.class() {
                order.push(c);
            }
        });
        assert_eq!(
            order,
            ["line-fill", "line-fill", "smoothed-line", "smoothed-line"]
        );
    }

    #[test]
    fn missing_and_empty_data() {
        let spec = LineChartSpec::new(640.0);
        assert!(spec.render(None).is_loading());
        assert!(spec.render(Some(&[])).is_empty());
        let ts = TimeSeriesChartSpec::new(640.0);
        assert!(ts.render(None).is_loading());
        assert!(ts.render(Some(&[])).is_empty());
    }

    #[test]
    fn renders_are_deterministic_up_to_the_id() {
        let all = many(3);
        let spec = LineChartSpec::new(640.0).with_selection(Selection::explicit([0, 2]));
        let a = spec.render(Some(&all)).into_surface().expect("chart");
        let b = spec.render(Some(&all)).into_surface().expect("chart");
        assert_ne!(a.id, b.id);
        let pinned = spec.clone().with_chart_id(a.id.clone());
        assert_eq!(pinned.render(Some(&all)).into_surface(), Some(a.clone()));
        assert_eq!(
            a.to_svg_string().replace(&a.id, "X"),
            b.to_svg_string().replace(&b.id, "X")
        );
    }

    #[test]
    fn palette_follows_original_indices() {
        let all = many(3);
        let rendered = LineChartSpec::new(640.0)
            .with_chart_id("c")
            .with_selection(Selection::explicit([2]))
            .render(Some(&all));
        let surface = rendered.surface().expect("chart");
        assert_eq!(surface.defs[0].id, "c-gradient-2");
        let Node::Path { stroke, .. } = surface.paths_with_class("smoothed-line")[0] else {
            panic!("smoothed line is a path");
        };
        assert_eq!(*stroke, Paint::Solid(palette_color(2)));
    }

    #[test]
    fn log_charts_drop_non_positive_values() {
        let all = [series(
            "a",
            &[(0.0, -1.0, -1.0), (1.0, 2.0, 2.0), (2.0, 3.0, 3.0)],
        )];
        let rendered = LineChartSpec::new(640.0)
            .with_chart_type(ChartType::Log)
            .render(Some(&all));
        let surface = rendered.surface().expect("chart");
        for node in surface.paths_with_class("unsmoothed-line") {
            let Node::Path { path, .. } = node else {
                panic!("path");
            };
            assert!(!path.elements().is_empty());
            for el in path.elements() {
                if let PathEl::MoveTo(p) | PathEl::LineTo(p) = el {
                    assert!(p.x.is_finite() && p.y.is_finite(), "{el:?}");
                }
            }
        }
        let only_negative = [series("a", &[(0.0, -1.0, -1.0)])];
        assert!(
            LineChartSpec::new(640.0)
                .with_chart_type(ChartType::Log)
                .render(Some(&only_negative))
                .is_empty()
        );
    }

    #[test]
    fn step_axis_spans_all_series() {
        let all = [
            series("a", &[(0.0, 1.0, 1.0), (10.0, 2.0, 2.0)]),
            series("b", &[(0.0, 1.0, 1.0), (20.0, 2.0, 2.0)]),
        ];
        let rendered = LineChartSpec::new(640.0).render(Some(&all));
        let surface = rendered.surface().expect("chart");
        let Node::Path { path, .. } = surface.paths_with_class("smoothed-line")[0] else {
            panic!("path");
        };
        // Series "a" ends halfway across the plot.
        assert_eq!(
            path.elements().last(),
            Some(&PathEl::LineTo(kurbo::Point::new(295.0, -295.0)))
        );
    }

    #[test]
    fn time_chart_options() {
        let t0 = 1_709_647_200.0;
        let all = [series(
            "mem",
            &[(t0, 10.0, 10.0), (t0 + 600.0, 30.0, 30.0), (t0 + 1200.0, 20.0, 20.0)],
        )];
        let rendered = TimeSeriesChartSpec::new(640.0)
            .with_chart_id("t")
            .with_height_fraction(2.0)
            .with_force_y_start(0.0)
            .render(Some(&all));
        let surface = rendered.surface().expect("chart");
        assert_eq!(surface.height, 2.0 * 10.0 + 30.0 + 147.5);
        let svg = surface.to_svg_string();
        assert!(svg.contains(">14:00<"), "{svg}");
        assert!(svg.contains(">30<"), "{svg}");

        let fixed = TimeSeriesChartSpec::new(640.0)
            .with_chart_id("t")
            .with_y_extent(Extent::new(0.0, 100.0))
            .render(Some(&all));
        assert!(fixed.to_svg_string().contains(">100<"));
    }

    fn axis_labels(surface: &Surface, axis: &str) -> Vec<String> {
        let mut labels = Vec::new();
        for node in surface.nodes_with_class(axis) {
            node.walk(&mut |n| {
                if let Node::Text { text, .. } = n {
                    labels.push(text.clone());
                }
            });
        }
        labels
    }

    #[test]
    fn one_sample_time_chart_keeps_a_clock_axis() {
        // 2024-03-05 14:00:00 UTC
        let t0 = 1_709_647_200.0;
        let all = [series("mem", &[(t0, 10.0, 10.0)])];
        let rendered = TimeSeriesChartSpec::new(640.0).render(Some(&all));
        let surface = rendered.surface().expect("chart");
        let labels = axis_labels(surface, "bottom-axis");
        assert!(labels.len() >= 2, "{labels:?}");
        for label in &labels {
            assert!(
                label.starts_with("13:59:") || label.starts_with("14:00:"),
                "{labels:?}"
            );
        }
        let Node::Path { path, .. } = surface.paths_with_class("smoothed-line")[0] else {
            panic!("path");
        };
        // The sample sits in the middle of the plot.
        assert_eq!(
            path.elements().first(),
            Some(&PathEl::MoveTo(kurbo::Point::new(295.0, -147.5)))
        );
    }

    #[test]
    fn log_time_chart_ignores_value_overrides() {
        let t0 = 1_709_647_200.0;
        let all = [series(
            "net",
            &[(t0, 10.0, 10.0), (t0 + 60.0, 1000.0, 1000.0), (t0 + 120.0, 100.0, 100.0)],
        )];
        let rendered = TimeSeriesChartSpec::new(640.0)
            .with_chart_type(ChartType::Log)
            .with_y_extent(Extent::new(-5.0, 50.0))
            .with_force_y_start(-1.0)
            .render(Some(&all));
        let surface = rendered.surface().expect("chart");
        let labels = axis_labels(surface, "right-axis");
        assert!(labels.iter().any(|l| l == "1k"), "{labels:?}");
        assert!(labels.iter().any(|l| l == "10"), "{labels:?}");
        assert!(
            labels.iter().all(|l| l != "0" && !l.starts_with('-')),
            "{labels:?}"
        );
        for node in surface.paths_with_class("smoothed-line") {
            let Node::Path { path, .. } = node else {
                panic!("path");
            };
            for el in path.elements() {
                if let PathEl::MoveTo(p) | PathEl::LineTo(p) = el {
                    assert!(p.x.is_finite() && p.y.is_finite(), "{el:?}");
                }
            }
        }
    }

    #[test]
    fn chart_type_tags() {
        assert_eq!(ChartType::from_tag("log"), ChartType::Log);
        assert_eq!(ChartType::from_tag("linear"), ChartType::Linear);
        assert_eq!(ChartType::from_tag("anything"), ChartType::Linear);
        assert_eq!(ChartType::Log.as_tag(), "log");
    }
}
