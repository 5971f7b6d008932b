// Copyright 2025 the Hexstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Moving-average smoothing of share rows.
//!
//! The window is symmetric around each sample and truncated at the edges. Each series is
//! smoothed independently using prefix sums, so the cost is `O(L)` per series whatever the
//! window size. Since every series is averaged over the same window, per-sample sums stay `1`.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::ShareMatrix;

/// Percentages at or below this value disable smoothing.
pub const MIN_SMOOTHING_PERCENT: f64 = 2.0;

/// Windows at or below this size are a pass-through.
pub const MIN_SMOOTHING_WINDOW: usize = 2;

/// Returns the window size (in samples) for a smoothing percentage of `sample_count`.
///
/// The result is at least `1`. [`smooth`] centers the window on each sample with `window / 2`
/// samples on either side, so an even window averages `window + 1` samples away from the
/// edges (a window of 4 is a 5-sample mean).
pub fn smoothing_window(percent: f64, sample_count: usize) -> usize {
    if !percent.is_finite() || percent <= 0.0 {
        return 1;
    }
    let w = (sample_count as f64 * percent / 100.0).round();
    #[allow(
        clippy::cast_possible_truncation,
        reason = "non-negative and bounded by a multiple of sample_count"
    )]
    let w = w as usize;
    w.max(1)
}

/// Smooths every series of `shares` with a window derived from `percent`.
///
/// Returns an unchanged copy when `percent <= MIN_SMOOTHING_PERCENT` or the derived window is
/// `<= MIN_SMOOTHING_WINDOW`.
pub fn smooth(shares: &ShareMatrix, percent: f64) -> ShareMatrix {
    let n = shares.sample_count();
    let window = smoothing_window(percent, n);
    if percent <= MIN_SMOOTHING_PERCENT || window <= MIN_SMOOTHING_WINDOW {
        return shares.clone();
    }

    let half = window / 2;
    let mut prefix: Vec<f64> = Vec::with_capacity(n + 1);
    let rows = shares
        .rows()
        .iter()
        .map(|row| {
            prefix.clear();
            prefix.push(0.0);
            let mut acc = 0.0;
            for &v in row {
                acc += v;
                prefix.push(acc);
            }
            (0..n)
                .map(|i| {
                    let lo = i.saturating_sub(half);
                    let hi = (i + half).min(n - 1);
                    (prefix[hi + 1] - prefix[lo]) / (hi - lo + 1) as f64
                })
                .collect()
        })
        .collect();

    log::trace!("smoothed {} series with window {window}", shares.series_count());
    ShareMatrix::from_rows(rows, n)
}
