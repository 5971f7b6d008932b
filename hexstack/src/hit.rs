// Copyright 2025 the Hexstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer hit-testing over hex cells.
//!
//! Cells are bucketed on a uniform grid (one bucket per hex width by row step), so a query
//! only tests the handful of cells whose bounding boxes touch the pointer's bucket. Results
//! match a front-to-back linear scan: cells do not overlap, and candidates are tested in cell
//! order.

extern crate alloc;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use smallvec::SmallVec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::{HexCell, HexGrid};

type BucketKey = (i64, i64);

/// A spatial index over the cells of one render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitIndex {
    origin: Point,
    bucket_w: f64,
    bucket_h: f64,
    buckets: HashMap<BucketKey, SmallVec<[usize; 4]>>,
}

impl HitIndex {
    /// Indexes `cells`, laid out by `grid`.
    pub fn build(grid: &HexGrid, cells: &[HexCell]) -> Self {
        let bucket_w = grid.geometry.width();
        let bucket_h = grid.geometry.row_step();
        let mut index = Self {
            origin: Point::new(grid.plot.x0, grid.plot.y0),
            bucket_w,
            bucket_h,
            buckets: HashMap::new(),
        };
        if !(bucket_w > 0.0 && bucket_h > 0.0) {
            return index;
        }
        for (i, cell) in cells.iter().enumerate() {
            let (kx0, ky0) = index.key(Point::new(cell.bounds.x0, cell.bounds.y0));
            let (kx1, ky1) = index.key(Point::new(cell.bounds.x1, cell.bounds.y1));
            for ky in ky0..=ky1 {
                for kx in kx0..=kx1 {
                    index.buckets.entry((kx, ky)).or_default().push(i);
                }
            }
        }
        log::trace!(
            "hit index: {} cells in {} buckets",
            cells.len(),
            index.buckets.len()
        );
        index
    }

    /// Returns the index of the cell containing `p`, if any.
    ///
    /// `cells` must be the slice the index was built from.
    pub fn query(&self, cells: &[HexCell], p: Point) -> Option<usize> {
        let bucket = self.buckets.get(&self.key(p))?;
        bucket
            .iter()
            .copied()
            .find(|&i| cells.get(i).is_some_and(|c| c.contains(p)))
    }

    fn key(&self, p: Point) -> BucketKey {
        let kx = ((p.x - self.origin.x) / self.bucket_w).floor();
        let ky = ((p.y - self.origin.y) / self.bucket_h).floor();
        (saturate(kx), saturate(ky))
    }
}

fn saturate(v: f64) -> i64 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "float to int casts saturate; out-of-range buckets are simply empty"
    )]
    {
        v as i64
    }
}

/// First cell containing `p`, by linear scan with bounding-box rejection.
pub fn hit_linear(cells: &[HexCell], p: Point) -> Option<usize> {
    cells.iter().position(|c| c.contains(p))
}

/// Whether `p` lies within `plot` (half-open on the far edges).
pub(crate) fn in_plot(plot: Rect, p: Point) -> bool {
    plot.contains(p)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::{BinPair, HexGeometry, ParityAllocations, Series, SeriesTable, ShareMatrix};

    fn cells() -> (HexGrid, Vec<HexCell>) {
        let table = SeriesTable::with_index_axis(vec![
            Series::new("a", (0..40).map(f64::from).collect()),
            Series::new("b", (0..40).map(|i| f64::from(40 - i)).collect()),
        ])
        .unwrap();
        let shares = ShareMatrix::from_table(&table);
        let grid = HexGrid::fit(Rect::new(10.0, 20.0, 210.0, 160.0), HexGeometry::new(8.0));
        let bins = BinPair::build(&shares, grid.shape.columns);
        let alloc = ParityAllocations::build(&bins, grid.shape, &[0, 1]);
        let cells = grid.cells(&bins, &alloc);
        (grid, cells)
    }

    #[test]
    fn every_center_hits_its_own_cell() {
        let (grid, cells) = cells();
        let index = HitIndex::build(&grid, &cells);
        for (i, c) in cells.iter().enumerate() {
            assert_eq!(index.query(&cells, c.center), Some(i));
        }
    }

    #[test]
    fn bucketed_query_matches_linear_scan() {
        let (grid, cells) = cells();
        let index = HitIndex::build(&grid, &cells);
        let mut y = 0.0;
        while y < 180.0 {
            let mut x = 0.0;
            while x < 230.0 {
                let p = Point::new(x, y);
                assert_eq!(index.query(&cells, p), hit_linear(&cells, p), "{p:?}");
                x += 1.3;
            }
            y += 1.1;
        }
    }

    #[test]
    fn outside_points_miss() {
        let (grid, cells) = cells();
        let index = HitIndex::build(&grid, &cells);
        assert_eq!(index.query(&cells, Point::new(-50.0, -50.0)), None);
        assert_eq!(index.query(&cells, Point::new(1e12, 1e12)), None);
        assert!(!in_plot(grid.plot, Point::new(5.0, 30.0)));
    }
}
