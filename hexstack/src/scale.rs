// Copyright 2025 the Hexstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear scale between sample space and plot space.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Maps a value from range space back into domain space.
    pub fn invert(&self, y: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 {
            return d0;
        }
        let t = (y - r0) / denom;
        d0 + t * (d1 - d0)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Maps sample indices `0..len` across a horizontal plot span.
///
/// Sample `0` sits on the left edge and sample `len - 1` on the right edge. A single-sample
/// table maps to the left edge.
pub(crate) fn sample_scale(len: usize, x0: f64, x1: f64) -> ScaleLinear {
    let last = len.saturating_sub(1) as f64;
    ScaleLinear::new((0.0, last), (x0, x1))
}

/// Rounds a fractional sample position to the nearest valid index.
pub(crate) fn nearest_sample(pos: f64, len: usize) -> usize {
    if len == 0 || !pos.is_finite() {
        return 0;
    }
    let pos = pos.round().clamp(0.0, (len - 1) as f64);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to [0, len - 1]")]
    {
        pos as usize
    }
}
