// Copyright 2025 the Hexstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Writes `hexstack_demo.html`: the same data as stacked areas and as hex grids.
mod html;
mod svg;

use hexstack::{
    ChartSession, OrderList, RenderOutput, Series, SeriesTable, Tooltip, ViewMode,
};
use kurbo::{Point, Rect};

const PLOT: Rect = Rect::new(0.0, 0.0, 640.0, 320.0);

/// (name, peak sample, width, height, floor)
const GENRES: [(&str, f64, f64, f64, f64); 6] = [
    ("Swing", 5.0, 14.0, 60.0, 1.0),
    ("Rock", 30.0, 18.0, 80.0, 4.0),
    ("Disco", 34.0, 5.0, 50.0, 0.5),
    ("Hip hop", 58.0, 16.0, 70.0, 2.0),
    ("Electronic", 66.0, 20.0, 45.0, 3.0),
    ("Folk", 20.0, 40.0, 15.0, 6.0),
];

fn demo_table() -> SeriesTable {
    let len: u32 = 80;
    let x_values = (0..len).map(|i| 1945.0 + f64::from(i)).collect();
    let series = GENRES
        .iter()
        .map(|&(name, peak, width, height, floor)| {
            let values = (0..len)
                .map(|i| {
                    let d = (f64::from(i) - peak) / width;
                    floor + height * (-d * d).exp()
                })
                .collect();
            Series::new(name, values)
        })
        .collect();
    SeriesTable::new(x_values, series).expect("demo table is well formed")
}

fn main() {
    let mut session: ChartSession = ChartSession::default();
    session.set_plot(PLOT);
    session.load_table(demo_table());

    let mut sections = Vec::new();

    session.set_view(ViewMode::Stacked);
    let out = render(&mut session);
    sections.push(section(
        "Stacked areas",
        format!(
            "Each sample normalized to 100%. Bottom to top: {}.",
            names(&session, &out.order.order)
        ),
        &out,
        None,
    ));

    session.set_view(ViewMode::Hex);
    session.set_hex_radius(9.0);
    let out = render(&mut session);
    let tip = session.hit_test(PLOT.center());
    print_tooltip(tip.as_ref());
    sections.push(section(
        "Hex majority vote",
        format!(
            "{} cells; each column is a histogram of shares, each hex the series that wins its slot.",
            out.hex().map_or(0, |h| h.cells.len())
        ),
        &out,
        tip.as_ref(),
    ));

    // Several changes between frames collapse into one render.
    session.set_smoothing_percent(20.0);
    session.set_hex_radius(7.0);
    let out = render(&mut session);
    println!(
        "scheduler: {} requests, {} coalesced",
        session.scheduler().requested(),
        session.scheduler().coalesced()
    );
    sections.push(section(
        "Hex, smoothed",
        "20% centered moving average before binning, smaller hexes.".to_string(),
        &out,
        None,
    ));

    // Drag the top series to the bottom.
    let mut order = OrderList::new(out.order.order.clone());
    let top = order.len() - 1;
    order.move_item(top, 0);
    session.set_order_override(order.into_vec());
    let out = render(&mut session);
    let tip = session.hit_test(Point::new(PLOT.x0 + 40.0, PLOT.y1 - 12.0));
    print_tooltip(tip.as_ref());
    sections.push(section(
        "Hex, user order",
        format!(
            "Override order, bottom to top: {}.",
            names(&session, &out.order.order)
        ),
        &out,
        tip.as_ref(),
    ));

    let html = html::render_report("hexstack demo", &sections);
    std::fs::write("hexstack_demo.html", html).expect("write hexstack_demo.html");
    println!("wrote hexstack_demo.html");
}

fn render(session: &mut ChartSession) -> RenderOutput {
    session.frame();
    session.output().cloned().expect("session has data")
}

fn names(session: &ChartSession, order: &[usize]) -> String {
    let Some(table) = session.table() else {
        return String::new();
    };
    order
        .iter()
        .filter_map(|&s| table.series().get(s).map(|s| s.name.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn section(
    title: &'static str,
    description: String,
    out: &RenderOutput,
    tip: Option<&Tooltip>,
) -> html::HtmlSection {
    html::HtmlSection {
        title,
        description,
        svg: svg::render_svg(out, tip),
    }
}

fn print_tooltip(tip: Option<&Tooltip>) {
    match tip {
        Some(t) => println!(
            "{} at {}: {:.1}% share{}",
            t.name,
            t.x_value,
            100.0 * t.share,
            t.majority
                .map(|m| format!(", wins {:.0}% of its hex", 100.0 * m))
                .unwrap_or_default()
        ),
        None => println!("no hex under pointer"),
    }
}
