// Copyright 2025 the Hexstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalized stacked-area layout.
//!
//! The stacked view shares the global order with the hex view, so a series keeps the same
//! vertical band when the user switches between the two.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use kurbo::{BezPath, Rect};

use crate::ShareMatrix;
use crate::scale::{ScaleLinear, sample_scale};

/// Bottom (`y0`) and top (`y1`) of each series band at each sample, in share units.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedLayout {
    /// Series indices, bottom of the stack first.
    order: Vec<usize>,
    /// Indexed by series, then sample.
    y0: Vec<Vec<f64>>,
    /// Indexed by series, then sample.
    y1: Vec<Vec<f64>>,
}

impl StackedLayout {
    /// Stacks `shares` bottom to top in `order`.
    pub fn build(shares: &ShareMatrix, order: &[usize]) -> Self {
        let n = shares.sample_count();
        let series_count = shares.series_count();
        let mut y0 = vec![vec![0.0; n]; series_count];
        let mut y1 = vec![vec![0.0; n]; series_count];
        for i in 0..n {
            let mut acc = 0.0;
            for &s in order {
                y0[s][i] = acc;
                acc += shares.series(s)[i];
                y1[s][i] = acc;
            }
            // Same drift correction as the allocation engine.
            if let Some(&top) = order.last() {
                y1[top][i] = 1.0;
            }
        }
        Self {
            order: order.to_vec(),
            y0,
            y1,
        }
    }

    /// The stacking order, bottom first.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Band bottoms of `series`, one per sample.
    pub fn y0(&self, series: usize) -> &[f64] {
        &self.y0[series]
    }

    /// Band tops of `series`, one per sample.
    pub fn y1(&self, series: usize) -> &[f64] {
        &self.y1[series]
    }

    /// The series whose band contains `level` (in `[0, 1]`, from the bottom) at `sample`.
    pub fn series_at(&self, sample: usize, level: f64) -> Option<usize> {
        self.order
            .iter()
            .copied()
            .find(|&s| self.y1[s].get(sample).is_some_and(|&top| level <= top))
            .or_else(|| self.order.last().copied())
    }

    /// Traces one closed area path per series inside `plot`, indexed by series.
    ///
    /// Sample `0` maps to the left edge, the last sample to the right edge; share `0` maps to
    /// the bottom edge and `1` to the top edge.
    pub fn paths(&self, plot: Rect) -> Vec<BezPath> {
        let n = self.y0.first().map_or(0, Vec::len);
        let x_scale = sample_scale(n, plot.x0, plot.x1);
        let y_scale = ScaleLinear::new((0.0, 1.0), (plot.y1, plot.y0));
        (0..self.y0.len())
            .map(|s| trace_band(&self.y0[s], &self.y1[s], x_scale, y_scale))
            .collect()
    }
}

fn trace_band(y0: &[f64], y1: &[f64], x_scale: ScaleLinear, y_scale: ScaleLinear) -> BezPath {
    let mut p = BezPath::new();
    if y1.is_empty() {
        return p;
    }
    let pt = |i: usize, y: f64| (x_scale.map(i as f64), y_scale.map(y));

    p.move_to(pt(0, y0[0]));
    p.line_to(pt(0, y1[0]));
    for (i, &top) in y1.iter().enumerate().skip(1) {
        p.line_to(pt(i, top));
    }
    for (i, &bot) in y0.iter().enumerate().rev() {
        p.line_to(pt(i, bot));
    }
    p.close_path();
    p
}
