// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series colors.

use peniko::Color;

/// Categorical palette for series, indexed by a series' position among all candidates.
pub const CHART_COLORS: [Color; 10] = [
    Color::from_rgb8(0x4e, 0x79, 0xa7),
    Color::from_rgb8(0xf2, 0x8e, 0x2c),
    Color::from_rgb8(0xe1, 0x57, 0x59),
    Color::from_rgb8(0x76, 0xb7, 0xb2),
    Color::from_rgb8(0x59, 0xa1, 0x4f),
    Color::from_rgb8(0xed, 0xc9, 0x49),
    Color::from_rgb8(0xaf, 0x7a, 0xa1),
    Color::from_rgb8(0xff, 0x9d, 0xa7),
    Color::from_rgb8(0x9c, 0x75, 0x5f),
    Color::from_rgb8(0xba, 0xb0, 0xab),
];

/// Palette slot for a series index.
pub fn palette_index(i: usize) -> usize {
    i % CHART_COLORS.len()
}

/// Color for a series index, wrapping around the palette.
pub fn palette_color(i: usize) -> Color {
    CHART_COLORS[palette_index(i)]
}

/// Element id of the fill gradient for palette slot `slot` within a chart.
pub fn gradient_id(chart_id: &str, slot: usize) -> String {
    format!("{chart_id}-gradient-{slot}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_wrap() {
        assert_eq!(palette_color(0), palette_color(10));
        assert_ne!(palette_color(1), palette_color(0));
        assert_eq!(palette_index(23), 3);
        assert_eq!(gradient_id("chart_4", 2), "chart_4-gradient-2");
    }
}
