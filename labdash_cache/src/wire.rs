// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Analysis documents as stored and exchanged.

use labdash_charts::Series;
use serde::{Deserialize, Serialize};

/// One series as parallel columns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesWire {
    /// Display label.
    pub name: String,
    /// X positions.
    pub step: Vec<f64>,
    /// Raw values.
    pub value: Vec<f64>,
    /// Smoothed values; a copy of `value` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoothed: Option<Vec<f64>>,
}

impl SeriesWire {
    /// Converts to a [`Series`], truncating to the shortest column.
    pub fn to_series(&self) -> Series {
        let smoothed = self.smoothed.as_deref().unwrap_or(&self.value);
        let lens = [self.step.len(), self.value.len(), smoothed.len()];
        if lens.iter().any(|&l| l != lens[0]) {
            log::warn!(
                "series {:?} has uneven columns (step {}, value {}, smoothed {}); truncating",
                self.name,
                lens[0],
                lens[1],
                lens[2],
            );
        }
        Series::from_columns(self.name.clone(), &self.step, &self.value, smoothed)
    }
}

impl From<&Series> for SeriesWire {
    fn from(s: &Series) -> Self {
        Self {
            name: s.name.clone(),
            step: s.points.iter().map(|p| p.step).collect(),
            value: s.points.iter().map(|p| p.value).collect(),
            smoothed: Some(s.points.iter().map(|p| p.smoothed).collect()),
        }
    }
}

/// A note attached to an analysis.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    /// Severity or category, e.g. `"warning"`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Message text.
    #[serde(default)]
    pub message: String,
}

/// The response for one analysis of one entity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisData {
    /// Chartable series.
    #[serde(default)]
    pub series: Vec<SeriesWire>,
    /// Notes about the series.
    #[serde(default)]
    pub insights: Vec<Insight>,
    /// Condensed series for summary cards, when the analysis provides them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Vec<SeriesWire>>,
}

impl AnalysisData {
    /// Converts every series.
    pub fn to_series(&self) -> Vec<Series> {
        self.series.iter().map(SeriesWire::to_series).collect()
    }

    /// Converts the summary series, falling back to the full series.
    pub fn summary_series(&self) -> Vec<Series> {
        self.summary
            .as_deref()
            .unwrap_or(&self.series)
            .iter()
            .map(SeriesWire::to_series)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use labdash_charts::Point;

    use super::*;

    #[test]
    fn parses_a_response() {
        let json = r#"{
            "series": [
                {"name": "loss", "step": [0, 10], "value": [1.0, 5.0], "smoothed": [1.0, 4.0]},
                {"name": "acc", "step": [0, 10, 20], "value": [0.1, 0.2]}
            ],
            "insights": [{"type": "warning", "message": "diverging"}]
        }"#;
        let data: AnalysisData = serde_json::from_str(json).unwrap();
        assert_eq!(data.insights[0].kind, "warning");
        let series = data.to_series();
        assert_eq!(series[0].points[1], Point::new(10.0, 5.0, 4.0));
        assert_eq!(series[1].len(), 2);
        assert_eq!(series[1].points[1].smoothed, 0.2);
        assert_eq!(data.summary_series(), series);
    }

    #[test]
    fn missing_fields_default() {
        let data: AnalysisData = serde_json::from_str("{}").unwrap();
        assert!(data.series.is_empty() && data.insights.is_empty());
        assert!(data.summary.is_none());
    }

    #[test]
    fn series_convert_back_to_columns() {
        let s = Series::new("x", vec![Point::new(1.0, 2.0, 3.0)]);
        let w = SeriesWire::from(&s);
        assert_eq!(w.step, [1.0]);
        assert_eq!(w.smoothed.as_deref(), Some(&[3.0][..]));
        assert_eq!(w.to_series(), s);
    }
}
