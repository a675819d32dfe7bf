// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State behind one analysis card.
//!
//! The controller owns a snapshot of what the card shows. Loading and refreshing replace the
//! snapshot from the caches; toggling series or switching the chart type edits it and writes
//! the preferences back. Rendering reads the snapshot and nothing else.

use std::sync::Arc;

use labdash_charts::{ChartType, LineChartSpec, Selection, Series, TimeSeriesChartSpec};
use labdash_scene::Rendered;

use crate::cache::{PreferenceCache, SeriesCache};
use crate::error::CacheError;
use crate::kind::SeriesKind;
use crate::preferences::Preferences;
use crate::source::SeriesSource;
use crate::status::time_diff;
use crate::wire::Insight;

/// What a card currently shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ChartState {
    /// Nothing fetched yet.
    #[default]
    Loading,
    /// Data and preferences are available.
    Ready {
        /// Every series of the analysis.
        series: Vec<Series>,
        /// Plotted series.
        selection: Selection,
        /// Value axis scaling.
        chart_type: ChartType,
    },
}

/// Drives one analysis card.
#[derive(Debug)]
pub struct AnalysisController<S> {
    kind: SeriesKind,
    series: Arc<SeriesCache<S>>,
    preferences: Arc<PreferenceCache<S>>,
    state: ChartState,
    insights: Vec<Insight>,
    last_updated: Option<f64>,
    chart_id: Option<String>,
}

impl<S: SeriesSource> AnalysisController<S> {
    /// Creates a controller in the [`ChartState::Loading`] state.
    pub fn new(
        kind: SeriesKind,
        series: Arc<SeriesCache<S>>,
        preferences: Arc<PreferenceCache<S>>,
    ) -> Self {
        Self {
            kind,
            series,
            preferences,
            state: ChartState::Loading,
            insights: Vec::new(),
            last_updated: None,
            chart_id: None,
        }
    }

    /// Pins the id used for rendered charts.
    #[must_use]
    pub fn with_chart_id(mut self, id: impl Into<String>) -> Self {
        self.chart_id = Some(id.into());
        self
    }

    /// Loads data and preferences, using cached copies when fresh.
    pub async fn load(&mut self) -> Result<(), CacheError> {
        self.fetch(false).await
    }

    /// Reloads data from the source, keeping preferences.
    pub async fn refresh(&mut self) -> Result<(), CacheError> {
        self.fetch(true).await
    }

    async fn fetch(&mut self, refresh: bool) -> Result<(), CacheError> {
        let data = self.series.get(refresh).await?;
        let prefs = self.preferences.get().await?;
        let series = data.to_series();
        log::debug!(
            "{} of {}: {} series loaded",
            self.kind,
            self.series.uuid(),
            series.len()
        );
        self.insights.clone_from(&data.insights);
        self.last_updated = self.series.last_updated().await;
        self.state = ChartState::Ready {
            series,
            selection: prefs.selection(),
            chart_type: prefs.chart_type(),
        };
        Ok(())
    }

    /// Shows or hides series `i` and stores the new selection.
    ///
    /// Does nothing while loading.
    pub async fn toggle(&mut self, i: usize) -> Result<(), CacheError> {
        let ChartState::Ready {
            series, selection, ..
        } = &mut self.state
        else {
            return Ok(());
        };
        *selection = selection.toggle(i, series.len());
        self.save().await
    }

    /// Switches the value axis scaling and stores it.
    ///
    /// Does nothing while loading.
    pub async fn set_chart_type(&mut self, chart_type: ChartType) -> Result<(), CacheError> {
        let ChartState::Ready { chart_type: ct, .. } = &mut self.state else {
            return Ok(());
        };
        *ct = chart_type;
        self.save().await
    }

    async fn save(&self) -> Result<(), CacheError> {
        if let ChartState::Ready {
            series,
            selection,
            chart_type,
        } = &self.state
        {
            let prefs = Preferences::new(selection, series.len(), *chart_type);
            self.preferences.set(prefs).await?;
        }
        Ok(())
    }

    /// The analysis kind.
    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    /// The current snapshot.
    pub fn state(&self) -> &ChartState {
        &self.state
    }

    /// Notes attached to the loaded analysis.
    pub fn insights(&self) -> &[Insight] {
        &self.insights
    }

    /// A "last updated" label relative to `now` (unix seconds), once data is loaded.
    pub fn last_updated_label(&self, now: f64) -> Option<String> {
        self.last_updated.map(|t| time_diff(t, now))
    }

    /// Renders the snapshot at `width` pixels.
    pub fn render(&self, width: f64) -> Rendered {
        let ChartState::Ready {
            series,
            selection,
            chart_type,
        } = &self.state
        else {
            return Rendered::Loading;
        };
        if self.kind.is_time_series() {
            let mut spec = TimeSeriesChartSpec::new(width)
                .with_chart_type(*chart_type)
                .with_selection(selection.clone());
            spec.chart_id.clone_from(&self.chart_id);
            spec.render(Some(series.as_slice()))
        } else {
            let mut spec = LineChartSpec::new(width)
                .with_chart_type(*chart_type)
                .with_selection(selection.clone());
            spec.chart_id.clone_from(&self.chart_id);
            spec.render(Some(series.as_slice()))
        }
    }
}
