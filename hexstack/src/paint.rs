// Copyright 2025 the Hexstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series colors and legend entries.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use peniko::Brush;
use peniko::color::palette::css;

use crate::SeriesTable;

const PALETTE: [peniko::Color; 10] = [
    css::CORNFLOWER_BLUE,
    css::ORANGE,
    css::MEDIUM_SEA_GREEN,
    css::CRIMSON,
    css::GOLDENROD,
    css::SLATE_BLUE,
    css::DARK_CYAN,
    css::HOT_PINK,
    css::SIENNA,
    css::OLIVE_DRAB,
];

/// Returns a categorical fill per series.
///
/// Colors are keyed by series index, not stack position, so reordering does not recolor a
/// series. They repeat if `count` exceeds the palette length.
pub fn series_fills(count: usize) -> Vec<Brush> {
    (0..count)
        .map(|i| Brush::Solid(PALETTE[i % PALETTE.len()]))
        .collect()
}

/// A legend row: series label plus swatch paint.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    /// Series index in the table.
    pub series: usize,
    /// The series name.
    pub label: String,
    /// The swatch fill paint.
    pub fill: Brush,
}

/// Builds legend items top to bottom, i.e. the reverse of the bottom-first `order`.
///
/// Items whose series has no fill are skipped.
pub fn legend_items(table: &SeriesTable, order: &[usize], fills: &[Brush]) -> Vec<LegendItem> {
    order
        .iter()
        .rev()
        .filter_map(|&s| {
            let series = table.series().get(s)?;
            let fill = fills.get(s)?.clone();
            Some(LegendItem {
                series: s,
                label: series.name.clone(),
                fill,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::Series;

    #[test]
    fn fills_repeat_after_palette() {
        let fills = series_fills(12);
        assert_eq!(fills.len(), 12);
        assert_eq!(fills[0], fills[10]);
        assert_ne!(fills[0], fills[1]);
    }

    #[test]
    fn legend_lists_top_of_stack_first() {
        let table = SeriesTable::with_index_axis(vec![
            Series::new("a", vec![1.0]),
            Series::new("b", vec![1.0]),
            Series::new("c", vec![1.0]),
        ])
        .unwrap();
        let fills = series_fills(3);
        let items = legend_items(&table, &[2, 0, 1], &fills);
        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["b", "a", "c"]);
        assert_eq!(items[0].fill, fills[1]);
    }
}
