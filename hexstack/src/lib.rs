// Copyright 2025 the Hexstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composition charts for many time series.
//!
//! Given `M` series sampled at `L` shared x positions, this crate lays out two views of how
//! each series' share of the total changes along x:
//! - **Stacked**: normalized stacked areas, one band per series.
//! - **Hex**: a pointy-top hex grid where each column of hexes is a histogram of the shares
//!   in an x-window, and each hex is colored by the series that wins its row slot.
//!
//! The pipeline is:
//! 1. [`ShareMatrix::from_table`] normalizes every sample to shares summing to one.
//! 2. [`smooth`] applies an optional centered moving average.
//! 3. [`BinPair::build`] aggregates shares into column bins, once for even rows and once for
//!    the half-column-offset odd rows.
//! 4. [`computed_order`] ranks series by aggregate share once per data load (see
//!    [`ChartData`]); an [`OrderOverride`] may replace it.
//! 5. [`AllocationTable::build`] assigns each row slot of a column to a series.
//! 6. [`HexGrid::cells`] produces drawable cells, batched per series by [`series_paths`].
//!
//! [`render`] runs all of it; [`ChartSession`] keeps state between frames and coalesces
//! change requests into a single render per frame. Output is geometry ([`kurbo`]) and paint
//! ([`peniko`]); drawing it is up to the caller.
//!
//! ## Features
//!
//! - `std`: use `std` float math.
//! - `libm` (default): use `libm` float math in `no_std` builds.

#![no_std]

extern crate alloc;

mod allocate;
mod binning;
#[cfg(not(feature = "std"))]
mod float;
mod grid;
mod hit;
mod normalize;
mod order;
mod paint;
mod reorder;
mod scale;
mod schedule;
mod session;
mod smooth;
mod stack;
mod table;
mod ticks;


pub use allocate::AllocationTable;
pub use binning::{BinPair, BinTable, RowParity};
pub use grid::{
    COLUMN_MARGIN_FRACTION, DEFAULT_HEX_GAP, GridShape, HexCell, HexGeometry, HexGrid,
    ParityAllocations, SAMPLE_SCALE, SQRT_3, series_paths,
};
pub use hit::{HitIndex, hit_linear};
pub use normalize::ShareMatrix;
pub use order::{
    ActiveOrder, OrderOverride, OrderSource, computed_order, is_permutation, positions,
};
pub use paint::{LegendItem, legend_items, series_fills};
pub use reorder::OrderList;
pub use scale::ScaleLinear;
pub use schedule::{FrameHost, ManualFrames, RenderScheduler};
pub use session::{
    ChartData, ChartSession, ChartSettings, HexView, RenderOutput, StackedView, Tooltip,
    ViewMode, ViewOutput, render,
};
pub use smooth::{MIN_SMOOTHING_PERCENT, MIN_SMOOTHING_WINDOW, smooth, smoothing_window};
pub use stack::StackedLayout;
pub use table::{Series, SeriesTable, TableError};
pub use ticks::{XTick, x_ticks};
