// Copyright 2025 the Hexstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart session: settings, render pipeline, and pointer queries.
//!
//! [`render`] is the full pipeline as a pure function. [`ChartSession`] owns the state a
//! chart keeps between frames (data, settings, the user order override, the last output)
//! and runs [`render`] at most once per frame.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect};
use peniko::Brush;

use crate::grid::DEFAULT_HEX_GAP;
use crate::hit::in_plot;
use crate::order::computed_order;
use crate::paint::{legend_items, series_fills};
use crate::scale::{nearest_sample, sample_scale};
use crate::schedule::{FrameHost, ManualFrames, RenderScheduler};
use crate::smooth::smooth;
use crate::{
    ActiveOrder, BinPair, HexCell, HexGeometry, HexGrid, HitIndex, LegendItem, OrderOverride,
    ParityAllocations, SeriesTable, ShareMatrix, StackedLayout, XTick, series_paths, x_ticks,
};

/// Which chart to produce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Normalized stacked areas.
    Stacked,
    /// Hex-binned majority vote.
    #[default]
    Hex,
}

/// User-adjustable render settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartSettings {
    /// View to render.
    pub view: ViewMode,
    /// Hex radius in plot units.
    pub hex_radius: f64,
    /// Visual gap between hexes.
    pub hex_gap: f64,
    /// Smoothing window as a percentage of the sample count. `0` disables smoothing.
    pub smoothing_percent: f64,
    /// Desired number of x-axis ticks.
    pub tick_count: usize,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            view: ViewMode::Hex,
            hex_radius: 10.0,
            hex_gap: DEFAULT_HEX_GAP,
            smoothing_percent: 0.0,
            tick_count: 6,
        }
    }
}

impl ChartSettings {
    /// Sets the view mode.
    pub fn with_view(mut self, view: ViewMode) -> Self {
        self.view = view;
        self
    }

    /// Sets the hex radius.
    pub fn with_hex_radius(mut self, radius: f64) -> Self {
        self.hex_radius = radius;
        self
    }

    /// Sets the visual gap between hexes.
    pub fn with_hex_gap(mut self, gap: f64) -> Self {
        self.hex_gap = gap;
        self
    }

    /// Sets the smoothing percentage.
    pub fn with_smoothing_percent(mut self, percent: f64) -> Self {
        self.smoothing_percent = percent;
        self
    }

    /// Sets the desired tick count.
    pub fn with_tick_count(mut self, count: usize) -> Self {
        self.tick_count = count;
        self
    }

    fn geometry(&self) -> HexGeometry {
        HexGeometry::new(self.hex_radius).with_gap(self.hex_gap)
    }
}

/// Hex view output.
#[derive(Debug, Clone, PartialEq)]
pub struct HexView {
    /// The fitted grid.
    pub grid: HexGrid,
    /// Even/odd bin distributions.
    pub bins: BinPair,
    /// Even/odd row-slot allocations.
    pub allocations: ParityAllocations,
    /// Every visible cell, row by row from the top.
    pub cells: Vec<HexCell>,
    /// One batched path per series, indexed by series.
    pub paths: Vec<BezPath>,
    /// Pointer lookup over `cells`.
    pub index: HitIndex,
}

/// Stacked-area view output.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedView {
    /// Band bounds per series and sample.
    pub layout: StackedLayout,
    /// One closed area path per series, indexed by series.
    pub paths: Vec<BezPath>,
}

/// View-specific output.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewOutput {
    /// Stacked areas.
    Stacked(StackedView),
    /// Hex cells.
    Hex(HexView),
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    /// Plot rectangle the output was laid out in.
    pub plot: Rect,
    /// Shares after smoothing.
    pub shares: ShareMatrix,
    /// Order ranked by aggregate share, before any override.
    pub computed_order: Vec<usize>,
    /// Order used for stacking and allocation.
    pub order: ActiveOrder,
    /// Fill per series, indexed by series.
    pub fills: Vec<Brush>,
    /// Legend rows, top of the stack first.
    pub legend: Vec<LegendItem>,
    /// X-axis ticks with original x values.
    pub ticks: Vec<XTick>,
    /// View-specific geometry.
    pub view: ViewOutput,
}

impl RenderOutput {
    /// The hex view, if this output is one.
    pub fn hex(&self) -> Option<&HexView> {
        match &self.view {
            ViewOutput::Hex(h) => Some(h),
            ViewOutput::Stacked(_) => None,
        }
    }

    /// The stacked view, if this output is one.
    pub fn stacked(&self) -> Option<&StackedView> {
        match &self.view {
            ViewOutput::Stacked(s) => Some(s),
            ViewOutput::Hex(_) => None,
        }
    }

    /// Paths indexed by series, whichever view this is.
    pub fn series_paths(&self) -> &[BezPath] {
        match &self.view {
            ViewOutput::Hex(h) => &h.paths,
            ViewOutput::Stacked(s) => &s.paths,
        }
    }
}

/// Tooltip data for a pointer position.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    /// Series under the pointer.
    pub series: usize,
    /// Its name.
    pub name: String,
    /// Sample index under the pointer.
    pub sample: usize,
    /// Original x value at `sample`.
    pub x_value: f64,
    /// The series' (smoothed) share at `sample`.
    pub share: f64,
    /// Fraction of the hex cell's samples won by `series`; `None` in the stacked view.
    pub majority: Option<f64>,
    /// Index of the hit cell in [`HexView::cells`]; `None` in the stacked view.
    pub cell: Option<usize>,
}

/// A loaded table with the state derived from it once per load.
///
/// The computed order is ranked here, from unsmoothed shares binned one column per sample, so
/// it depends only on the data. Radius, smoothing, and plot changes never reorder the bands.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    table: SeriesTable,
    shares: ShareMatrix,
    ranked: Vec<usize>,
}

impl ChartData {
    /// Normalizes and ranks `table`.
    pub fn new(table: SeriesTable) -> Self {
        let shares = ShareMatrix::from_table(&table);
        let bins = BinPair::build(&shares, shares.sample_count());
        let ranked = computed_order(&bins, table.series_count());
        log::debug!(
            "loaded table: {} series x {} samples, ranked {:?}",
            table.series_count(),
            table.sample_count(),
            ranked
        );
        Self {
            table,
            shares,
            ranked,
        }
    }

    /// The source table.
    pub fn table(&self) -> &SeriesTable {
        &self.table
    }

    /// Unsmoothed shares.
    pub fn shares(&self) -> &ShareMatrix {
        &self.shares
    }

    /// Series ranked by aggregate share, largest first (bottom of the stack).
    pub fn computed_order(&self) -> &[usize] {
        &self.ranked
    }
}

/// Runs the full pipeline.
pub fn render(
    data: &ChartData,
    settings: &ChartSettings,
    plot: Rect,
    order_override: &OrderOverride,
) -> RenderOutput {
    let table = &data.table;
    let series_count = table.series_count();
    let shares = smooth(&data.shares, settings.smoothing_percent);
    let grid = HexGrid::fit(plot, settings.geometry());
    let bins = BinPair::build(&shares, grid.shape.columns);
    let order = order_override.resolve(data.ranked.clone());

    let view = match settings.view {
        ViewMode::Hex => {
            let allocations = ParityAllocations::build(&bins, grid.shape, &order.order);
            let cells = grid.cells(&bins, &allocations);
            let paths = series_paths(&cells, series_count);
            let index = HitIndex::build(&grid, &cells);
            log::debug!(
                "hex render: {}x{} grid, {} cells, order {:?}",
                grid.shape.columns,
                grid.shape.rows,
                cells.len(),
                order.order
            );
            ViewOutput::Hex(HexView {
                grid,
                bins,
                allocations,
                cells,
                paths,
                index,
            })
        }
        ViewMode::Stacked => {
            let layout = StackedLayout::build(&shares, &order.order);
            let paths = layout.paths(plot);
            log::debug!("stacked render: order {:?}", order.order);
            ViewOutput::Stacked(StackedView { layout, paths })
        }
    };

    let fills = series_fills(series_count);
    let legend = legend_items(table, &order.order, &fills);
    let ticks = x_ticks(table.x_values(), plot.x0, plot.x1, settings.tick_count);

    RenderOutput {
        plot,
        shares,
        computed_order: data.ranked.clone(),
        order,
        fills,
        legend,
        ticks,
        view,
    }
}

/// Owns chart state between frames.
#[derive(Debug)]
pub struct ChartSession<H: FrameHost = ManualFrames> {
    host: H,
    data: Option<ChartData>,
    settings: ChartSettings,
    plot: Rect,
    order_override: OrderOverride,
    scheduler: RenderScheduler,
    output: Option<RenderOutput>,
}

impl Default for ChartSession<ManualFrames> {
    fn default() -> Self {
        Self::new(ManualFrames)
    }
}

impl<H: FrameHost> ChartSession<H> {
    /// Creates an empty session that asks `host` for frames.
    pub fn new(host: H) -> Self {
        Self {
            host,
            data: None,
            settings: ChartSettings::default(),
            plot: Rect::ZERO,
            order_override: OrderOverride::new(),
            scheduler: RenderScheduler::new(),
            output: None,
        }
    }

    /// Replaces the data.
    ///
    /// The computed order is ranked here and kept until the next load. The order override
    /// survives only if the series count is unchanged.
    pub fn load_table(&mut self, table: SeriesTable) {
        self.order_override.retain_if_fits(table.series_count());
        self.data = Some(ChartData::new(table));
        self.request_render();
    }

    /// The current data, if any.
    pub fn table(&self) -> Option<&SeriesTable> {
        self.data.as_ref().map(ChartData::table)
    }

    /// The current data with its derived shares and ranking, if any.
    pub fn data(&self) -> Option<&ChartData> {
        self.data.as_ref()
    }

    /// Current settings.
    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    /// Replaces all settings.
    pub fn set_settings(&mut self, settings: ChartSettings) {
        if self.settings != settings {
            self.settings = settings;
            self.request_render();
        }
    }

    /// Switches between the stacked and hex views.
    pub fn set_view(&mut self, view: ViewMode) {
        self.set_settings(self.settings.with_view(view));
    }

    /// Sets the hex radius.
    pub fn set_hex_radius(&mut self, radius: f64) {
        self.set_settings(self.settings.with_hex_radius(radius));
    }

    /// Sets the smoothing percentage.
    pub fn set_smoothing_percent(&mut self, percent: f64) {
        self.set_settings(self.settings.with_smoothing_percent(percent));
    }

    /// Sets the plot rectangle (e.g. after a resize).
    pub fn set_plot(&mut self, plot: Rect) {
        if self.plot != plot {
            self.plot = plot;
            self.request_render();
        }
    }

    /// The plot rectangle.
    pub fn plot(&self) -> Rect {
        self.plot
    }

    /// The order the next render will use, or `None` without data.
    pub fn active_order(&self) -> Option<ActiveOrder> {
        let data = self.data.as_ref()?;
        Some(self.order_override.resolve(data.ranked.clone()))
    }

    /// Uses `order` (bottom first) on the next render.
    ///
    /// An order that is not a permutation of the series is kept but ignored in favor of the
    /// computed order.
    pub fn set_order_override(&mut self, order: Vec<usize>) {
        self.order_override.set(order);
        self.request_render();
    }

    /// Returns to the computed order on the next render.
    pub fn clear_order_override(&mut self) {
        self.order_override.clear();
        self.request_render();
    }

    /// The stored override, if any.
    pub fn order_override(&self) -> Option<&[usize]> {
        self.order_override.get()
    }

    /// Queues a render. Returns `true` if a frame was requested from the host.
    pub fn request_render(&mut self) -> bool {
        self.scheduler.request(&mut self.host)
    }

    /// Render bookkeeping.
    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    /// Frame callback: runs the pipeline if a render is pending.
    ///
    /// Returns the new output, or `None` if nothing was pending or there is no data.
    pub fn frame(&mut self) -> Option<&RenderOutput> {
        if !self.scheduler.take() {
            return None;
        }
        let data = self.data.as_ref()?;
        self.output = Some(render(
            data,
            &self.settings,
            self.plot,
            &self.order_override,
        ));
        self.output.as_ref()
    }

    /// Output of the last render.
    pub fn output(&self) -> Option<&RenderOutput> {
        self.output.as_ref()
    }

    /// Tooltip data for `p` (plot coordinates) against the last render.
    pub fn hit_test(&self, p: Point) -> Option<Tooltip> {
        let out = self.output.as_ref()?;
        let table = self.table()?;
        if !in_plot(out.plot, p) {
            return None;
        }
        let len = out.shares.sample_count();
        let sample = nearest_sample(sample_scale(len, out.plot.x0, out.plot.x1).invert(p.x), len);

        let (series, majority, cell) = match &out.view {
            ViewOutput::Hex(h) => {
                let i = h.index.query(&h.cells, p)?;
                let c = &h.cells[i];
                (c.series, Some(c.majority_strength()), Some(i))
            }
            ViewOutput::Stacked(s) => {
                let height = out.plot.height();
                let level = if height > 0.0 {
                    (out.plot.y1 - p.y) / height
                } else {
                    0.0
                };
                (s.layout.series_at(sample, level)?, None, None)
            }
        };

        Some(Tooltip {
            series,
            name: table.series().get(series)?.name.clone(),
            sample,
            x_value: *table.x_values().get(sample)?,
            share: out.shares.share(series, sample)?,
            majority,
            cell,
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::{OrderSource, Series};

    fn session(table: SeriesTable) -> ChartSession {
        let mut s: ChartSession = ChartSession::default();
        s.set_plot(Rect::new(0.0, 0.0, 200.0, 120.0));
        s.load_table(table);
        s
    }

    fn three_series() -> SeriesTable {
        SeriesTable::with_index_axis(vec![
            Series::new("mid", vec![3.0, 3.0, 3.0, 3.0]),
            Series::new("low", vec![1.0, 1.0, 1.0, 1.0]),
            Series::new("high", vec![6.0, 6.0, 6.0, 6.0]),
        ])
        .unwrap()
    }

    #[test]
    fn changes_between_frames_render_once() {
        let mut s = session(three_series());
        s.set_hex_radius(8.0);
        s.set_smoothing_percent(10.0);
        assert_eq!(s.scheduler().coalesced(), 3);
        assert!(s.frame().is_some());
        assert!(s.frame().is_none());
    }

    #[test]
    fn unchanged_settings_do_not_request() {
        let mut s = session(three_series());
        s.frame();
        s.set_hex_radius(s.settings().hex_radius);
        s.set_plot(s.plot());
        assert!(!s.scheduler().is_pending());
    }

    #[test]
    fn override_applies_until_reset() {
        let mut s = session(three_series());
        s.frame();
        assert_eq!(s.active_order().unwrap().order, vec![2, 0, 1]);

        s.set_order_override(vec![1, 2, 0]);
        let out = s.frame().unwrap();
        assert_eq!(out.order.order, vec![1, 2, 0]);
        assert_eq!(out.order.source, OrderSource::User);

        s.clear_order_override();
        let out = s.frame().unwrap();
        assert_eq!(out.order.order, vec![2, 0, 1]);
        assert_eq!(out.order.source, OrderSource::Computed);
    }

    #[test]
    fn override_survives_settings_but_not_series_count_change() {
        let mut s = session(three_series());
        s.set_order_override(vec![1, 2, 0]);
        s.set_smoothing_percent(50.0);
        s.set_hex_radius(6.0);
        assert_eq!(s.frame().unwrap().order.order, vec![1, 2, 0]);

        s.load_table(
            SeriesTable::with_index_axis(vec![
                Series::new("a", vec![1.0, 2.0]),
                Series::new("b", vec![2.0, 1.0]),
            ])
            .unwrap(),
        );
        assert_eq!(s.order_override(), None);
        assert_eq!(s.frame().unwrap().order.source, OrderSource::Computed);
    }

    #[test]
    fn tooltip_reports_majority_and_share() {
        let mut s = session(three_series());
        let out = s.frame().unwrap();
        let cell = out.hex().unwrap().cells[0].clone();
        let tip = s.hit_test(cell.center).unwrap();
        assert_eq!(tip.series, cell.series);
        assert_eq!(tip.cell, Some(0));
        // Constant shares: 30% / 10% / 60%.
        let expected = [0.3, 0.1, 0.6][tip.series];
        assert!((tip.share - expected).abs() < 1e-12);
        assert!((tip.majority.unwrap() - expected).abs() < 1e-12);
        assert_eq!(tip.name, ["mid", "low", "high"][tip.series]);
    }

    #[test]
    fn stacked_tooltip_reads_bands() {
        let mut s = session(three_series());
        s.set_view(ViewMode::Stacked);
        s.frame();
        // Bottom of the plot belongs to the largest series.
        let tip = s.hit_test(Point::new(100.0, 119.0)).unwrap();
        assert_eq!(tip.series, 2);
        assert_eq!(tip.majority, None);
        // Top belongs to the smallest.
        let tip = s.hit_test(Point::new(100.0, 1.0)).unwrap();
        assert_eq!(tip.series, 1);
        assert!(s.hit_test(Point::new(-5.0, 10.0)).is_none());
    }

    #[test]
    fn computed_order_ignores_radius_and_smoothing() {
        // Per-bin totals of `b` and `c` trade places as the column count changes.
        let mut s = session(
            SeriesTable::with_index_axis(vec![
                Series::new("a", vec![0.0, 0.0, 0.0, 0.0, 1.0]),
                Series::new("b", vec![1.0; 5]),
                Series::new("c", vec![1.0, 0.05, 0.05, 0.05, 0.05]),
            ])
            .unwrap(),
        );
        let ranked = s.data().unwrap().computed_order().to_vec();
        let mut seen = Vec::new();
        for (radius, percent) in [(10.0, 0.0), (23.0, 0.0), (10.0, 40.0), (23.0, 40.0)] {
            s.set_hex_radius(radius);
            s.set_smoothing_percent(percent);
            let out = s.frame().unwrap();
            assert_eq!(out.computed_order, ranked);
            assert_eq!(out.order.order, ranked);
            seen.push(out.hex().unwrap().grid.shape.columns);
        }
        s.set_view(ViewMode::Stacked);
        assert_eq!(s.frame().unwrap().stacked().unwrap().layout.order(), &ranked[..]);
        assert_ne!(seen[0], seen[1]);
    }

    #[test]
    fn no_data_renders_nothing() {
        let mut s: ChartSession = ChartSession::default();
        s.request_render();
        assert!(s.frame().is_none());
        assert!(s.active_order().is_none());
        assert!(s.hit_test(Point::new(1.0, 1.0)).is_none());
    }
}
