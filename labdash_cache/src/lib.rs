// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data access for labdash analyses.
//!
//! - [`SeriesSource`] is the backend seam; [`DirSource`] reads JSON documents from disk and
//!   [`FnSource`] wraps a closure.
//! - [`SeriesCache`], [`PreferenceCache`] and [`StatusCache`] memoize one document each;
//!   [`CacheRegistry`] shares them per entity and analysis.
//! - [`AnalysisController`] holds the state of one chart card and renders it through
//!   `labdash_charts`.

mod cache;
mod controller;
mod error;
mod kind;
mod preferences;
mod registry;
mod source;
mod status;
mod wire;

pub use cache::{DEFAULT_RELOAD_TIMEOUT, PreferenceCache, SeriesCache, StatusCache};
pub use controller::{AnalysisController, ChartState};
pub use error::CacheError;
pub use kind::{Entity, SeriesKind};
pub use preferences::Preferences;
pub use registry::CacheRegistry;
pub use source::{DirSource, FnSource, SeriesSource};
pub use status::{Status, format_time, now_secs, time_diff, time_diff_now};
pub use wire::{AnalysisData, Insight, SeriesWire};
