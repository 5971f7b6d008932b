// Copyright 2025 the Hexstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-page HTML report.

use crate::svg::escape_xml;

/// One titled chart in the report.
#[derive(Debug)]
pub(crate) struct HtmlSection {
    pub(crate) title: &'static str,
    pub(crate) description: String,
    pub(crate) svg: String,
}

pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html><head><meta charset=\"utf-8\">");
    out.push_str(&format!("<title>{}</title>", escape_xml(title)));
    out.push_str(
        "<style>body{font-family:sans-serif;margin:2em;max-width:60em}\
         section{margin-bottom:2.5em}p{color:#444}</style>",
    );
    out.push_str("</head><body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape_xml(title)));
    for section in sections {
        out.push_str("<section>\n");
        out.push_str(&format!("<h2>{}</h2>\n", escape_xml(section.title)));
        out.push_str(&format!("<p>{}</p>\n", escape_xml(&section.description)));
        out.push_str(&section.svg);
        out.push_str("</section>\n");
    }
    out.push_str("</body></html>\n");
    out
}
