// Copyright 2025 the Hexstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-sample share normalization.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use crate::SeriesTable;

/// Per-series, per-sample shares in `[0, 1]`.
///
/// For every sample index, the shares across all series sum to `1` (within float tolerance).
#[derive(Debug, Clone, PartialEq)]
pub struct ShareMatrix {
    /// One row per series, one value per sample.
    rows: Vec<Vec<f64>>,
    sample_count: usize,
}

impl ShareMatrix {
    /// Normalizes a table into per-sample shares.
    ///
    /// Raw values are clamped to `>= 0` (non-finite values count as `0`). A sample whose clamped
    /// values sum to `0` becomes a uniform distribution.
    pub fn from_table(table: &SeriesTable) -> Self {
        let series_count = table.series_count();
        let sample_count = table.sample_count();
        let mut rows = vec![vec![0.0; sample_count]; series_count];
        let mut column = vec![0.0; series_count];

        for i in 0..sample_count {
            for (s, series) in table.series().iter().enumerate() {
                column[s] = clamp_raw(series.values[i]);
            }
            normalize_distribution(&mut column);
            for (row, &share) in rows.iter_mut().zip(&column) {
                row[i] = share;
            }
        }

        Self { rows, sample_count }
    }

    /// Builds a matrix from per-series rows without renormalizing.
    ///
    /// Used by transforms (smoothing) that preserve the column-sum invariant.
    pub(crate) fn from_rows(rows: Vec<Vec<f64>>, sample_count: usize) -> Self {
        Self { rows, sample_count }
    }

    /// Number of series.
    pub fn series_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of samples.
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Shares of one series across all samples.
    pub fn series(&self, series: usize) -> &[f64] {
        &self.rows[series]
    }

    /// All per-series rows.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// The share of `series` at `sample`, if both are in range.
    pub fn share(&self, series: usize, sample: usize) -> Option<f64> {
        self.rows.get(series)?.get(sample).copied()
    }

    /// Sum of all series' shares at `sample`.
    pub fn column_sum(&self, sample: usize) -> f64 {
        self.rows.iter().map(|r| r[sample]).sum()
    }
}

fn clamp_raw(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

/// Rescales `values` in place so they sum to `1`.
///
/// Negative entries are clamped to `0`. If nothing positive remains, every entry becomes
/// `1 / len`.
pub(crate) fn normalize_distribution(values: &mut [f64]) {
    if values.is_empty() {
        return;
    }
    let mut sum = 0.0;
    for v in values.iter_mut() {
        *v = clamp_raw(*v);
        sum += *v;
    }
    if sum > 0.0 {
        for v in values.iter_mut() {
            *v /= sum;
        }
    } else {
        let uniform = 1.0 / values.len() as f64;
        values.fill(uniform);
    }
}
