// Copyright 2025 the Hexstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump of a [`RenderOutput`].

use std::fmt::Write as _;

use hexstack::{RenderOutput, Tooltip, ViewOutput};
use kurbo::Rect;
use peniko::Brush;
use peniko::color::palette::css;

const AXIS_GAP: f64 = 6.0;
const FONT_SIZE: f64 = 11.0;
const LEGEND_ROW: f64 = 16.0;
const LEGEND_WIDTH: f64 = 130.0;
const MARGIN: f64 = 30.0;

/// Writes `out` as an SVG document.
///
/// The plot sits at `out.plot`; ticks go below it and the legend to its right. `highlight`
/// outlines the hex a tooltip came from.
pub(crate) fn render_svg(out: &RenderOutput, highlight: Option<&Tooltip>) -> String {
    let plot = out.plot;
    let view = Rect::new(
        plot.x0 - MARGIN,
        plot.y0 - MARGIN,
        plot.x1 + MARGIN + LEGEND_WIDTH,
        plot.y1 + MARGIN + 2.0 * FONT_SIZE,
    );
    let mut s = String::new();

    let _ = writeln!(
        s,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}">"#,
        view.x0,
        view.y0,
        view.width(),
        view.height(),
        view.width(),
        view.height()
    );
    let _ = write!(
        s,
        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
        plot.x0,
        plot.y0,
        plot.width(),
        plot.height()
    );
    write_paint_attr(&mut s, "fill", &Brush::Solid(css::WHITE_SMOKE));
    s.push_str("/>\n");

    // One path per series keeps the document small for large grids.
    for (series, path) in out.series_paths().iter().enumerate() {
        if path.elements().is_empty() {
            continue;
        }
        let _ = write!(s, r#"<path d="{}""#, path.to_svg());
        write_paint_attr(&mut s, "fill", &out.fills[series]);
        s.push_str("/>\n");
    }

    if let (Some(tip), ViewOutput::Hex(hex)) = (highlight, &out.view) {
        if let Some(cell) = tip.cell.and_then(|i| hex.cells.get(i)) {
            let _ = write!(s, r#"<path d="{}" fill="none""#, cell.path().to_svg());
            write_paint_attr(&mut s, "stroke", &Brush::Solid(css::BLACK));
            s.push_str(" stroke-width=\"1.5\"/>\n");
        }
    }

    for tick in &out.ticks {
        let _ = write!(
            s,
            r#"<line x1="{x}" y1="{y0}" x2="{x}" y2="{y1}""#,
            x = tick.x,
            y0 = plot.y1,
            y1 = plot.y1 + AXIS_GAP * 0.5,
        );
        write_paint_attr(&mut s, "stroke", &Brush::Solid(css::DIM_GRAY));
        s.push_str("/>\n");
        let _ = writeln!(
            s,
            r#"<text x="{}" y="{}" font-size="{FONT_SIZE}" text-anchor="middle" dominant-baseline="hanging">{}</text>"#,
            tick.x,
            plot.y1 + AXIS_GAP,
            escape_xml(&tick.value.to_string())
        );
    }

    let lx = plot.x1 + MARGIN * 0.5;
    for (k, item) in out.legend.iter().enumerate() {
        let y = plot.y0 + k as f64 * LEGEND_ROW;
        let _ = write!(
            s,
            r#"<rect x="{lx}" y="{y}" width="{FONT_SIZE}" height="{FONT_SIZE}""#
        );
        write_paint_attr(&mut s, "fill", &item.fill);
        s.push_str("/>\n");
        let _ = writeln!(
            s,
            r#"<text x="{}" y="{}" font-size="{FONT_SIZE}" dominant-baseline="middle">{}</text>"#,
            lx + FONT_SIZE + 4.0,
            y + 0.5 * FONT_SIZE,
            escape_xml(&item.label)
        );
    }

    s.push_str("</svg>\n");
    s
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, fill_opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
