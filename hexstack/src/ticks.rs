// Copyright 2025 the Hexstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! X-axis ticks.
//!
//! Shares are computed per sample, so the x-axis is positional: ticks sit at evenly spaced
//! sample indices and carry the original (pre-normalization) x value for labeling.

extern crate alloc;

use alloc::vec::Vec;

use crate::scale::{nearest_sample, sample_scale};

/// One x-axis tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct XTick {
    /// Sample index.
    pub sample: usize,
    /// Original x value at `sample`.
    pub value: f64,
    /// Screen x coordinate.
    pub x: f64,
}

/// Returns up to `count` ticks spread evenly from the first to the last sample.
pub fn x_ticks(x_values: &[f64], x0: f64, x1: f64, count: usize) -> Vec<XTick> {
    let len = x_values.len();
    if len == 0 || count == 0 {
        return Vec::new();
    }
    let scale = sample_scale(len, x0, x1);
    let last = (len - 1) as f64;
    let n = count.min(len);
    let steps = n.saturating_sub(1).max(1) as f64;

    let mut out: Vec<XTick> = Vec::with_capacity(n);
    for k in 0..n {
        let sample = nearest_sample(k as f64 * last / steps, len);
        if out.last().is_some_and(|t| t.sample == sample) {
            continue;
        }
        out.push(XTick {
            sample,
            value: x_values[sample],
            x: scale.map(sample as f64),
        });
    }
    out
}
