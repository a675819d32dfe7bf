// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart building blocks for labdash.
//!
//! The pipeline turns a list of [`Series`] into a [`labdash_scene::Rendered`] chart:
//! - **Selection** picks the plotted subset ([`select_for_plot`]).
//! - **Extents and scales** fit the plotted data to pixel space ([`compute_extent`],
//!   [`compute_scale`]).
//! - **Paths** draw smoothed and raw monotone curves plus a baseline fill per series
//!   ([`SeriesPaths`]).
//! - **Composition** lays out the plot and its bottom and right axes for a given width
//!   ([`LineChartSpec`], [`TimeSeriesChartSpec`]).
//!
//! Everything here is synchronous and free of shared mutable state, apart from the counter
//! that hands out default chart ids.

mod axis;
mod chart;
mod curve;
mod extent;
mod format;
mod layout;
mod palette;
mod path;
mod scale;
mod selection;
mod series;
mod time;

pub use axis::{AxisOrient, AxisSpec, AxisStyle, TickFormat};
pub use chart::{ChartType, LineChartSpec, MAX_FILLED_SERIES, TimeSeriesChartSpec};
pub use curve::monotone_x;
pub use extent::{Extent, TIME_PAD_SECS, compute_extent};
pub use format::{format_si, format_tick_with_step};
pub use layout::{AXIS_SIZE, ChartLayout};
pub use palette::{CHART_COLORS, gradient_id, palette_color, palette_index};
pub use path::{SeriesPaths, fill_path, line_path};
pub use scale::{
    ScaleContinuous, ScaleKind, ScaleLinear, ScaleLog, ScaleTime, compute_scale, nice_ticks,
    tick_step,
};
pub use selection::{Selected, Selection, select_for_plot};
pub use series::{Point, Series};
pub use time::{format_time_tick, nice_time_ticks_seconds, time_tick_step};
