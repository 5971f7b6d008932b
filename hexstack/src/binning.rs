// Copyright 2025 the Hexstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column binning at two row parities.
//!
//! A staggered hex grid shifts odd rows right by half a hex width. Odd rows therefore read
//! from bins whose sample windows are shifted by half a bin, so each hex samples the data
//! under its own horizontal extent.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::ShareMatrix;
use crate::normalize::normalize_distribution;

/// Row parity in a staggered hex grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RowParity {
    /// Even rows (`0, 2, 4, ...`): bins start at the column start.
    Even,
    /// Odd rows (`1, 3, 5, ...`): bins are shifted by half a bin.
    Odd,
}

impl RowParity {
    /// Parity of a grid row.
    pub fn of_row(row: usize) -> Self {
        if row % 2 == 0 { Self::Even } else { Self::Odd }
    }

    /// Number of grid rows of this parity among `rows` total rows.
    pub fn rows_in(self, rows: usize) -> usize {
        match self {
            Self::Even => rows.div_ceil(2),
            Self::Odd => rows / 2,
        }
    }

    /// Window offset as a fraction of the bin size.
    fn offset_fraction(self) -> f64 {
        match self {
            Self::Even => 0.0,
            Self::Odd => 0.5,
        }
    }
}

/// Per-column share distributions for one row parity.
#[derive(Debug, Clone, PartialEq)]
pub struct BinTable {
    parity: RowParity,
    /// One distribution per column, each `series_count` long and summing to `1`.
    columns: Vec<Vec<f64>>,
    /// Half-open sample window `[start, end)` aggregated into each column.
    windows: Vec<(usize, usize)>,
}

impl BinTable {
    /// Aggregates `shares` into `columns` bins for `parity`.
    pub fn build(shares: &ShareMatrix, columns: usize, parity: RowParity) -> Self {
        let len = shares.sample_count();
        let series_count = shares.series_count();
        let bin_size = if columns == 0 {
            0.0
        } else {
            len as f64 / columns as f64
        };
        let offset = bin_size * parity.offset_fraction();

        let mut dists = Vec::with_capacity(columns);
        let mut windows = Vec::with_capacity(columns);
        for b in 0..columns {
            let start = clamp_sample((b as f64 * bin_size + offset).floor(), len);
            let end = clamp_sample(((b + 1) as f64 * bin_size + offset).ceil(), len);
            let mut dist = vec![0.0; series_count];
            for (s, row) in shares.rows().iter().enumerate() {
                dist[s] = row[start..end.max(start)].iter().sum();
            }
            normalize_distribution(&mut dist);
            dists.push(dist);
            windows.push((start, end.max(start)));
        }

        Self {
            parity,
            columns: dists,
            windows,
        }
    }

    /// The parity this table serves.
    pub fn parity(&self) -> RowParity {
        self.parity
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Distribution of column `col`.
    pub fn column(&self, col: usize) -> &[f64] {
        &self.columns[col]
    }

    /// All column distributions.
    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    /// Sample window `[start, end)` of column `col`.
    pub fn window(&self, col: usize) -> (usize, usize) {
        self.windows[col]
    }
}

/// The even and odd bin tables for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct BinPair {
    /// Bins read by even rows.
    pub even: BinTable,
    /// Bins read by odd rows.
    pub odd: BinTable,
}

impl BinPair {
    /// Builds both parities with the same column count.
    pub fn build(shares: &ShareMatrix, columns: usize) -> Self {
        Self {
            even: BinTable::build(shares, columns, RowParity::Even),
            odd: BinTable::build(shares, columns, RowParity::Odd),
        }
    }

    /// The table for `parity`.
    pub fn get(&self, parity: RowParity) -> &BinTable {
        match parity {
            RowParity::Even => &self.even,
            RowParity::Odd => &self.odd,
        }
    }
}

fn clamp_sample(v: f64, len: usize) -> usize {
    let v = v.clamp(0.0, len as f64);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to [0, len]")]
    {
        v as usize
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::{Series, SeriesTable};

    fn shares(series: Vec<Vec<f64>>) -> ShareMatrix {
        let table = SeriesTable::with_index_axis(
            series.into_iter().map(|v| Series::new("s", v)).collect(),
        )
        .unwrap();
        ShareMatrix::from_table(&table)
    }

    #[test]
    fn parity_row_counts() {
        assert_eq!(RowParity::Even.rows_in(5), 3);
        assert_eq!(RowParity::Odd.rows_in(5), 2);
        assert_eq!(RowParity::Odd.rows_in(1), 0);
        assert_eq!(RowParity::of_row(3), RowParity::Odd);
    }

    #[test]
    fn even_windows_tile_the_samples() {
        let m = shares(vec![vec![1.0; 10], vec![1.0; 10]]);
        let t = BinTable::build(&m, 4, RowParity::Even);
        // bin size 2.5
        assert_eq!(t.window(0), (0, 3));
        assert_eq!(t.window(1), (2, 5));
        assert_eq!(t.window(3), (7, 10));
    }

    #[test]
    fn odd_windows_shift_by_half_a_bin_and_clamp() {
        let m = shares(vec![vec![1.0; 8]]);
        let t = BinTable::build(&m, 4, RowParity::Odd);
        assert_eq!(t.window(0), (1, 3));
        assert_eq!(t.window(3), (7, 8));
    }

    #[test]
    fn bins_are_distributions() {
        let m = shares(vec![
            vec![4.0, 0.0, 1.0, 0.0, 3.0, 2.0, 0.0],
            vec![0.0, 0.0, 1.0, 5.0, 1.0, 2.0, 0.0],
            vec![1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        ]);
        let pair = BinPair::build(&m, 3);
        for table in [&pair.even, &pair.odd] {
            for col in table.columns() {
                let sum: f64 = col.iter().sum();
                assert!((sum - 1.0).abs() < 1e-12, "{col:?}");
            }
        }
    }

    #[test]
    fn bin_shares_follow_the_samples() {
        let m = shares(vec![
            vec![1.0, 1.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0, 1.0],
        ]);
        let t = BinTable::build(&m, 2, RowParity::Even);
        assert_eq!(t.column(0), &[1.0, 0.0]);
        assert_eq!(t.column(1), &[0.0, 1.0]);
    }
}
