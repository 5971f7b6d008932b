// Copyright 2025 the Hexstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row-slot allocation.
//!
//! Each column is treated like one x-position of a stacked area chart: series occupy
//! contiguous vertical bands proportional to their share, stacked bottom to top in the active
//! order. A row slot takes the series whose band contains the slot's vertical midpoint.

extern crate alloc;

use alloc::vec::Vec;

use crate::BinTable;

/// Winning series per column and row slot for one row parity.
///
/// Row slot `0` is the top slot of the parity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationTable {
    rows: usize,
    /// Column-major: `cells[col * rows + row]`.
    cells: Vec<usize>,
}

impl AllocationTable {
    /// Allocates `rows` slots in every column of `bins` using `order` (bottom first).
    ///
    /// `order` must be a permutation of the bin table's series indices.
    pub fn build(bins: &BinTable, rows: usize, order: &[usize]) -> Self {
        let mut cells = Vec::with_capacity(bins.column_count() * rows);
        if rows == 0 || order.is_empty() {
            return Self {
                rows: 0,
                cells: Vec::new(),
            };
        }

        let mut cumulative = Vec::with_capacity(order.len());
        for column in bins.columns() {
            cumulative.clear();
            let mut acc = 0.0;
            for &s in order {
                acc += column[s];
                cumulative.push(acc);
            }
            // Absorb float drift so the top slot always lands in the last band.
            if let Some(last) = cumulative.last_mut() {
                *last = 1.0;
            }

            for r in 0..rows {
                let y_from_bottom = 1.0 - (r as f64 + 0.5) / rows as f64;
                let k = cumulative
                    .partition_point(|&c| c < y_from_bottom)
                    .min(order.len() - 1);
                cells.push(order[k]);
            }
        }

        Self { rows, cells }
    }

    /// Number of row slots per column.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        if self.rows == 0 {
            0
        } else {
            self.cells.len() / self.rows
        }
    }

    /// The series allocated to `(col, row)`, if in range.
    pub fn get(&self, col: usize, row: usize) -> Option<usize> {
        if row >= self.rows {
            return None;
        }
        self.cells.get(col * self.rows + row).copied()
    }

    /// All slots of column `col`, top slot first.
    pub fn column(&self, col: usize) -> &[usize] {
        let start = (col * self.rows).min(self.cells.len());
        let end = (start + self.rows).min(self.cells.len());
        &self.cells[start..end]
    }

    /// Returns `true` if there are no slots.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::order::positions;
    use crate::{RowParity, Series, SeriesTable, ShareMatrix};

    fn bin_table(series: Vec<Vec<f64>>, columns: usize) -> BinTable {
        let table = SeriesTable::with_index_axis(
            series.into_iter().map(|v| Series::new("s", v)).collect(),
        )
        .unwrap();
        BinTable::build(&ShareMatrix::from_table(&table), columns, RowParity::Even)
    }

    #[test]
    fn bands_stack_bottom_to_top_in_order() {
        // One column: 25% / 75%.
        let bins = bin_table(vec![vec![1.0], vec![3.0]], 1);
        let a = AllocationTable::build(&bins, 4, &[0, 1]);
        // Top three slots belong to series 1, the bottom slot to series 0.
        assert_eq!(a.column(0), &[1, 1, 1, 0]);

        let a = AllocationTable::build(&bins, 4, &[1, 0]);
        assert_eq!(a.column(0), &[0, 1, 1, 1]);
    }

    #[test]
    fn equal_shares_split_evenly() {
        let bins = bin_table(vec![vec![1.0, 1.0], vec![1.0, 1.0]], 2);
        let a = AllocationTable::build(&bins, 6, &[0, 1]);
        for col in 0..2 {
            let zeros = a.column(col).iter().filter(|&&s| s == 0).count();
            assert_eq!(zeros, 3, "column {col}: {:?}", a.column(col));
        }
    }

    #[test]
    fn zero_rows_is_empty() {
        let bins = bin_table(vec![vec![1.0], vec![3.0]], 1);
        let a = AllocationTable::build(&bins, 0, &[0, 1]);
        assert!(a.is_empty());
        assert_eq!(a.column_count(), 0);
        assert_eq!(a.get(0, 0), None);
    }

    #[test]
    fn scanning_upward_never_moves_down_the_order() {
        let bins = bin_table(
            vec![
                vec![3.0, 0.0, 1.0, 2.0, 9.0],
                vec![1.0, 1.0, 4.0, 0.0, 1.0],
                vec![0.1, 2.0, 1.0, 5.0, 2.0],
            ],
            5,
        );
        let order = [1, 2, 0];
        let pos = positions(&order);
        let a = AllocationTable::build(&bins, 7, &order);
        for col in 0..a.column_count() {
            let column = a.column(col);
            for w in column.windows(2) {
                // `w[0]` is above `w[1]`.
                assert!(pos[w[0]] >= pos[w[1]], "column {col}: {column:?}");
            }
        }
    }

    #[test]
    fn zero_share_series_never_wins() {
        let bins = bin_table(vec![vec![0.0], vec![1.0], vec![0.0]], 1);
        let a = AllocationTable::build(&bins, 5, &[0, 1, 2]);
        assert!(a.column(0).iter().all(|&s| s == 1), "{:?}", a.column(0));
    }
}
