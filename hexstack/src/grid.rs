// Copyright 2025 the Hexstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Staggered hex grid layout.
//!
//! Hexagons are pointy-top: a hex of radius `r` is `sqrt(3) * r` wide, rows are `1.5 * r`
//! apart, and odd rows are shifted right by half a hex width (a brick pattern).
//!
//! Grid row `row` reads from the allocation table of its parity, at row slot `row / 2`.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect};
use smallvec::SmallVec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::{AllocationTable, BinPair, RowParity};

/// `sqrt(3)`.
pub const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Default visual gap: polygons are drawn with the radius shrunk by this much.
pub const DEFAULT_HEX_GAP: f64 = 1.0;

/// Columns may overhang the plot edges by this fraction of the radius.
pub const COLUMN_MARGIN_FRACTION: f64 = 0.1;

/// Bin shares are scaled by this and rounded to get tooltip sample counts.
pub const SAMPLE_SCALE: f64 = 100.0;

/// Hexagon size parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HexGeometry {
    /// Nominal radius (center to vertex) used for layout.
    pub radius: f64,
    /// Amount subtracted from the radius when generating polygons.
    pub gap: f64,
}

impl HexGeometry {
    /// Creates a geometry with [`DEFAULT_HEX_GAP`].
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            gap: DEFAULT_HEX_GAP,
        }
    }

    /// Sets the visual gap.
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Horizontal distance between neighboring centers in a row.
    pub fn width(&self) -> f64 {
        SQRT_3 * self.radius
    }

    /// Vertical distance between row centers.
    pub fn row_step(&self) -> f64 {
        1.5 * self.radius
    }

    /// Radius used for polygons.
    ///
    /// Never shrinks below half the nominal radius so cells stay hit-testable.
    pub fn draw_radius(&self) -> f64 {
        (self.radius - self.gap.max(0.0)).max(0.5 * self.radius)
    }

    /// Polygon vertices around `center`, starting at the top vertex, clockwise on screen.
    pub fn vertices(&self, center: Point) -> [Point; 6] {
        let r = self.draw_radius();
        let dx = 0.5 * SQRT_3 * r;
        let dy = 0.5 * r;
        [
            Point::new(center.x, center.y - r),
            Point::new(center.x + dx, center.y - dy),
            Point::new(center.x + dx, center.y + dy),
            Point::new(center.x, center.y + r),
            Point::new(center.x - dx, center.y + dy),
            Point::new(center.x - dx, center.y - dy),
        ]
    }

    fn is_usable(&self) -> bool {
        self.radius.is_finite() && self.radius > 0.0
    }
}

/// How many columns and rows fit in a plot rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridShape {
    /// Even-row columns; also the number of bins per parity.
    pub columns: usize,
    /// Grid rows of both parities.
    pub rows: usize,
}

impl GridShape {
    /// Row slots available to `parity`.
    pub fn rows_for(&self, parity: RowParity) -> usize {
        parity.rows_in(self.rows)
    }
}

/// Positions hex centers inside a plot rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HexGrid {
    /// Plot rectangle in screen coordinates.
    pub plot: Rect,
    /// Hex size.
    pub geometry: HexGeometry,
    /// Fitted shape.
    pub shape: GridShape,
}

impl HexGrid {
    /// Fits a grid of `geometry` hexes into `plot`.
    pub fn fit(plot: Rect, geometry: HexGeometry) -> Self {
        let shape = if geometry.is_usable() {
            GridShape {
                columns: fit_columns(plot.width(), geometry),
                rows: fit_rows(plot.height(), geometry),
            }
        } else {
            GridShape::default()
        };
        Self {
            plot,
            geometry,
            shape,
        }
    }

    /// Center of the hex at `(col, row)`.
    pub fn center(&self, col: usize, row: usize) -> Point {
        let w = self.geometry.width();
        let stagger = match RowParity::of_row(row) {
            RowParity::Even => 0.0,
            RowParity::Odd => 0.5 * w,
        };
        let x = self.plot.x0 + 0.5 * w + stagger + col as f64 * w;
        let y = self.plot.y0 + self.geometry.radius + row as f64 * self.geometry.row_step();
        Point::new(x, y)
    }

    /// Whether a hex centered at `x` stays inside the plot's horizontal bounds.
    fn column_fits(&self, x: f64) -> bool {
        let half = 0.5 * self.geometry.width();
        let margin = COLUMN_MARGIN_FRACTION * self.geometry.radius;
        x - half + margin >= self.plot.x0 && x + half - margin <= self.plot.x1
    }

    /// Lays out every visible cell.
    ///
    /// `allocations` are the even and odd tables, built for this grid's shape.
    pub fn cells(&self, bins: &BinPair, allocations: &ParityAllocations) -> Vec<HexCell> {
        let mut cells = Vec::new();
        for row in 0..self.shape.rows {
            let parity = RowParity::of_row(row);
            let table = allocations.get(parity);
            let slot = row / 2;
            let source = bins.get(parity);
            for col in 0..self.shape.columns {
                let center = self.center(col, row);
                if !self.column_fits(center.x) {
                    continue;
                }
                let Some(series) = table.get(col, slot) else {
                    continue;
                };
                let counts: SmallVec<[u32; 8]> =
                    source.column(col).iter().map(|&s| sample_count(s)).collect();
                let total = counts.iter().sum();
                let vertices = self.geometry.vertices(center);
                cells.push(HexCell {
                    center,
                    bounds: polygon_bounds(&vertices),
                    vertices,
                    series,
                    column: col,
                    row,
                    counts,
                    total,
                });
            }
        }
        cells
    }
}

fn fit_columns(width: f64, geometry: HexGeometry) -> usize {
    let w = geometry.width();
    let margin = COLUMN_MARGIN_FRACTION * geometry.radius;
    // Column `c` spans `[c * w, (c + 1) * w]` relative to the plot's left edge.
    let n = ((width + margin) / w).floor();
    if n.is_finite() && n > 0.0 {
        #[allow(clippy::cast_possible_truncation, reason = "finite and positive")]
        {
            n as usize
        }
    } else {
        0
    }
}

fn fit_rows(height: f64, geometry: HexGeometry) -> usize {
    let r = geometry.radius;
    if height < 2.0 * r {
        return 0;
    }
    let n = ((height - 2.0 * r) / geometry.row_step()).floor() + 1.0;
    if n.is_finite() && n > 0.0 {
        #[allow(clippy::cast_possible_truncation, reason = "finite and positive")]
        {
            n as usize
        }
    } else {
        0
    }
}

fn sample_count(share: f64) -> u32 {
    let v = (share * SAMPLE_SCALE).round().clamp(0.0, f64::from(u32::MAX));
    #[allow(clippy::cast_possible_truncation, reason = "clamped to the u32 range")]
    {
        v as u32
    }
}

fn polygon_bounds(vertices: &[Point]) -> Rect {
    let mut r = Rect::new(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in vertices {
        r.x0 = r.x0.min(p.x);
        r.y0 = r.y0.min(p.y);
        r.x1 = r.x1.max(p.x);
        r.y1 = r.y1.max(p.y);
    }
    r
}

/// The even and odd allocation tables for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParityAllocations {
    /// Slots of even rows.
    pub even: AllocationTable,
    /// Slots of odd rows.
    pub odd: AllocationTable,
}

impl ParityAllocations {
    /// Allocates both parities for `shape` using `order`.
    pub fn build(bins: &BinPair, shape: GridShape, order: &[usize]) -> Self {
        Self {
            even: AllocationTable::build(&bins.even, shape.rows_for(RowParity::Even), order),
            odd: AllocationTable::build(&bins.odd, shape.rows_for(RowParity::Odd), order),
        }
    }

    /// The table for `parity`.
    pub fn get(&self, parity: RowParity) -> &AllocationTable {
        match parity {
            RowParity::Even => &self.even,
            RowParity::Odd => &self.odd,
        }
    }
}

/// One rendered hexagon.
#[derive(Debug, Clone, PartialEq)]
pub struct HexCell {
    /// Center in screen coordinates.
    pub center: Point,
    /// Polygon, shrunk by the visual gap.
    pub vertices: [Point; 6],
    /// Axis-aligned bounds of `vertices`.
    pub bounds: Rect,
    /// Allocated series.
    pub series: usize,
    /// Grid column (bin index).
    pub column: usize,
    /// Grid row (`0` is the top row).
    pub row: usize,
    /// Per-series sample counts of the source bin.
    pub counts: SmallVec<[u32; 8]>,
    /// Sum of `counts`.
    pub total: u32,
}

impl HexCell {
    /// Ray-casting point-in-polygon test, short-circuited by the bounding box.
    pub fn contains(&self, p: Point) -> bool {
        if !self.bounds.contains(p) {
            return false;
        }
        let mut inside = false;
        let n = self.vertices.len();
        let mut j = n - 1;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[j];
            if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Fraction of this cell's samples that belong to its allocated series.
    pub fn majority_strength(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let won = self.counts.get(self.series).copied().unwrap_or(0);
        f64::from(won) / f64::from(self.total)
    }

    /// A closed path for this cell's polygon.
    pub fn path(&self) -> BezPath {
        let mut p = BezPath::new();
        push_polygon(&mut p, &self.vertices);
        p
    }
}

fn push_polygon(p: &mut BezPath, vertices: &[Point]) {
    let Some((first, rest)) = vertices.split_first() else {
        return;
    };
    p.move_to(*first);
    for &v in rest {
        p.line_to(v);
    }
    p.close_path();
}

/// Batches every cell into one path per series, for single-fill rendering.
///
/// The result is indexed by series.
pub fn series_paths(cells: &[HexCell], series_count: usize) -> Vec<BezPath> {
    let mut paths: Vec<BezPath> = (0..series_count).map(|_| BezPath::new()).collect();
    for cell in cells {
        if let Some(p) = paths.get_mut(cell.series) {
            push_polygon(p, &cell.vertices);
        }
    }
    paths
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::{Series, SeriesTable, ShareMatrix};

    #[test]
    fn fits_columns_and_rows() {
        let geometry = HexGeometry::new(10.0);
        let grid = HexGrid::fit(Rect::new(0.0, 0.0, 100.0, 80.0), geometry);
        // w = 17.32..., (100 + 1) / 17.32 = 5.83
        assert_eq!(grid.shape.columns, 5);
        // (80 - 20) / 15 + 1 = 5
        assert_eq!(grid.shape.rows, 5);
        assert_eq!(grid.shape.rows_for(RowParity::Even), 3);
        assert_eq!(grid.shape.rows_for(RowParity::Odd), 2);
    }

    #[test]
    fn short_plot_has_no_rows() {
        let grid = HexGrid::fit(Rect::new(0.0, 0.0, 100.0, 15.0), HexGeometry::new(10.0));
        assert_eq!(grid.shape.rows, 0);
        let grid = HexGrid::fit(Rect::new(0.0, 0.0, 100.0, 100.0), HexGeometry::new(0.0));
        assert_eq!(grid.shape, GridShape::default());
    }

    #[test]
    fn odd_rows_are_staggered() {
        let grid = HexGrid::fit(Rect::new(0.0, 0.0, 100.0, 80.0), HexGeometry::new(10.0));
        let a = grid.center(0, 0);
        let b = grid.center(0, 1);
        assert!((b.x - a.x - 0.5 * grid.geometry.width()).abs() < 1e-9);
        assert!((b.y - a.y - 15.0).abs() < 1e-9);
    }

    #[test]
    fn cells_clip_overhanging_odd_columns() {
        let table = SeriesTable::with_index_axis(vec![Series::new("a", vec![1.0; 20])]).unwrap();
        let shares = ShareMatrix::from_table(&table);
        let grid = HexGrid::fit(Rect::new(0.0, 0.0, 90.0, 80.0), HexGeometry::new(10.0));
        assert_eq!(grid.shape.columns, 5);
        let bins = BinPair::build(&shares, grid.shape.columns);
        let alloc = ParityAllocations::build(&bins, grid.shape, &[0]);
        let cells = grid.cells(&bins, &alloc);
        let even = cells.iter().filter(|c| c.row % 2 == 0).count();
        let odd = cells.iter().filter(|c| c.row % 2 == 1).count();
        assert_eq!(even, 3 * 5);
        // The last odd column would end at 5.5 * w > 90.
        assert_eq!(odd, 2 * 4);
        for c in &cells {
            assert!(c.bounds.x0 >= 0.0 && c.bounds.x1 <= 90.0, "{:?}", c.bounds);
            assert_eq!(c.series, 0);
            assert_eq!(c.total, 100);
            assert!((c.majority_strength() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn polygon_contains_center_but_not_gap() {
        let geometry = HexGeometry::new(10.0).with_gap(2.0);
        let center = Point::new(50.0, 50.0);
        let vertices = geometry.vertices(center);
        let cell = HexCell {
            center,
            bounds: polygon_bounds(&vertices),
            vertices,
            series: 0,
            column: 0,
            row: 0,
            counts: SmallVec::from_slice(&[3, 1]),
            total: 4,
        };
        assert!(cell.contains(center));
        assert!(cell.contains(Point::new(50.0, 43.0)));
        // Inside the nominal radius, outside the drawn polygon.
        assert!(!cell.contains(Point::new(50.0, 41.0)));
        // Inside the bounding box corner, outside the hexagon.
        assert!(!cell.contains(Point::new(56.0, 43.0)));
        assert!((cell.majority_strength() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn series_paths_batch_by_series() {
        let geometry = HexGeometry::new(10.0);
        let mk = |series, x| {
            let center = Point::new(x, 10.0);
            let vertices = geometry.vertices(center);
            HexCell {
                center,
                bounds: polygon_bounds(&vertices),
                vertices,
                series,
                column: 0,
                row: 0,
                counts: SmallVec::new(),
                total: 0,
            }
        };
        let cells = vec![mk(1, 10.0), mk(0, 30.0), mk(1, 50.0)];
        let paths = series_paths(&cells, 3);
        assert_eq!(paths.len(), 3);
        // move + 5 lines + close per hexagon.
        assert_eq!(paths[0].elements().len(), 7);
        assert_eq!(paths[1].elements().len(), 14);
        assert!(paths[2].elements().is_empty());
    }
}
