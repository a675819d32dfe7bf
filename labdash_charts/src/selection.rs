// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Choosing which series a chart plots.

use crate::series::Series;

/// Which candidate series are plotted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    /// Nothing explicitly selected; plot the first series only.
    #[default]
    Default,
    /// Plot the series at these indices (drawn in index order).
    Explicit(Vec<usize>),
}

impl Selection {
    /// Creates an explicit selection, sorted and deduplicated.
    ///
    /// An empty set of indices yields [`Selection::Default`].
    pub fn explicit(indices: impl IntoIterator<Item = usize>) -> Self {
        let mut indices: Vec<usize> = indices.into_iter().collect();
        indices.sort_unstable();
        indices.dedup();
        if indices.is_empty() {
            Self::Default
        } else {
            Self::Explicit(indices)
        }
    }

    /// Reads the stored form: one entry per series, non-negative means "plotted".
    pub fn from_plot_idx(plot_idx: &[i64]) -> Self {
        Self::explicit(
            plot_idx
                .iter()
                .enumerate()
                .filter(|(_, v)| **v >= 0)
                .map(|(i, _)| i),
        )
    }

    /// Writes the stored form for `n` series.
    ///
    /// Plotted series carry their own index; everything else is `-1`. The default selection
    /// is written as all `-1`.
    pub fn to_plot_idx(&self, n: usize) -> Vec<i64> {
        (0..n)
            .map(|i| match self {
                Self::Explicit(indices) if indices.binary_search(&i).is_ok() => {
                    i64::try_from(i).unwrap_or(i64::MAX)
                }
                _ => -1,
            })
            .collect()
    }

    /// Indices that are effectively plotted among `n` series.
    pub fn effective(&self, n: usize) -> Vec<usize> {
        if n == 0 {
            return Vec::new();
        }
        let picked: Vec<usize> = match self {
            Self::Default => Vec::new(),
            Self::Explicit(indices) => indices.iter().copied().filter(|&i| i < n).collect(),
        };
        if picked.is_empty() { vec![0] } else { picked }
    }

    /// Returns `true` if series `i` of `n` is plotted.
    pub fn contains(&self, i: usize, n: usize) -> bool {
        self.effective(n).contains(&i)
    }

    /// Shows series `i` if hidden, hides it if shown.
    ///
    /// Hiding the last shown series returns to [`Selection::Default`]. Out-of-range indices
    /// leave the selection unchanged.
    #[must_use]
    pub fn toggle(&self, i: usize, n: usize) -> Self {
        if i >= n {
            return self.clone();
        }
        let mut shown = self.effective(n);
        if let Some(pos) = shown.iter().position(|&j| j == i) {
            shown.remove(pos);
        } else {
            shown.push(i);
        }
        Self::explicit(shown)
    }
}

/// The series a chart plots, with their positions among all candidates.
#[derive(Clone, Debug, PartialEq)]
pub struct Selected<'a> {
    /// Plotted series, in draw order.
    pub series: Vec<&'a Series>,
    /// Index of each plotted series among all candidates; keys the palette.
    pub original_indices: Vec<usize>,
}

impl Selected<'_> {
    /// Number of plotted series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns `true` if nothing is plotted.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Filters `all` down to the series `selection` plots.
///
/// When nothing usable is selected, the first series is plotted alone. An empty `all` yields
/// an empty result.
pub fn select_for_plot<'a>(all: &'a [Series], selection: &Selection) -> Selected<'a> {
    let original_indices = selection.effective(all.len());
    let series = original_indices.iter().map(|&i| &all[i]).collect();
    Selected {
        series,
        original_indices,
    }
}
