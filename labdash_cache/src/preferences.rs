// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use labdash_charts::{ChartType, Selection};
use serde::{Deserialize, Serialize};

/// Per-analysis chart preferences, as stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// One entry per series; non-negative means plotted.
    #[serde(default)]
    pub series_preferences: Vec<i64>,
    /// `0` for linear, `1` for log.
    #[serde(default)]
    pub chart_type: i32,
}

impl Preferences {
    /// The stored selection.
    pub fn selection(&self) -> Selection {
        Selection::from_plot_idx(&self.series_preferences)
    }

    /// The stored chart type; unknown codes read as linear.
    pub fn chart_type(&self) -> ChartType {
        if self.chart_type == 1 {
            ChartType::Log
        } else {
            ChartType::Linear
        }
    }

    /// Builds preferences for `n` series.
    pub fn new(selection: &Selection, n: usize, chart_type: ChartType) -> Self {
        Self {
            series_preferences: selection.to_plot_idx(n),
            chart_type: match chart_type {
                ChartType::Linear => 0,
                ChartType::Log => 1,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_form_round_trips() {
        let p: Preferences =
            serde_json::from_str(r#"{"series_preferences": [-1, 1, 2], "chart_type": 1}"#)
                .unwrap();
        assert_eq!(p.selection(), Selection::Explicit(vec![1, 2]));
        assert_eq!(p.chart_type(), ChartType::Log);
        assert_eq!(Preferences::new(&p.selection(), 3, p.chart_type()), p);
    }

    #[test]
    fn empty_preferences_are_defaults() {
        let p: Preferences = serde_json::from_str("{}").unwrap();
        assert_eq!(p.selection(), Selection::Default);
        assert_eq!(p.chart_type(), ChartType::Linear);
    }
}
