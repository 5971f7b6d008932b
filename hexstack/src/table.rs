// Copyright 2025 the Hexstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validated series tables.
//!
//! A [`SeriesTable`] is the value handed over by whatever ingests user data (TSV, JSON, a
//! generator). Construction is the only validation point: once a table exists, every series
//! has exactly one value per x-axis sample and the engine never re-checks.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Errors returned when building a [`SeriesTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The series list is empty.
    NoSeries,
    /// The x-axis has no samples.
    NoSamples,
    /// A series does not have one value per x-axis sample.
    LengthMismatch {
        /// Index of the offending series.
        series: usize,
        /// Number of x-axis samples.
        expected: usize,
        /// Number of values in the series.
        found: usize,
    },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSeries => f.write_str("series table has no series"),
            Self::NoSamples => f.write_str("series table has no samples"),
            Self::LengthMismatch {
                series,
                expected,
                found,
            } => write!(
                f,
                "series {series} has {found} values, expected {expected} (one per x value)"
            ),
        }
    }
}

impl core::error::Error for TableError {}

/// A named numeric series.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Display name. Names are not required to be unique.
    pub name: String,
    /// One raw value per x-axis sample.
    pub values: Vec<f64>,
}

impl Series {
    /// Creates a series.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// A rectangular table of series sharing one x-axis.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesTable {
    x_values: Vec<f64>,
    series: Vec<Series>,
}

impl SeriesTable {
    /// Validates and builds a table.
    ///
    /// Fails if there are no series, no samples, or any series length differs from the
    /// x-axis length.
    pub fn new(x_values: Vec<f64>, series: Vec<Series>) -> Result<Self, TableError> {
        if series.is_empty() {
            return Err(TableError::NoSeries);
        }
        if x_values.is_empty() {
            return Err(TableError::NoSamples);
        }
        let expected = x_values.len();
        if let Some((idx, s)) = series
            .iter()
            .enumerate()
            .find(|(_, s)| s.values.len() != expected)
        {
            return Err(TableError::LengthMismatch {
                series: idx,
                expected,
                found: s.values.len(),
            });
        }
        Ok(Self { x_values, series })
    }

    /// Builds a table whose x-axis is the sample index `0..len`.
    pub fn with_index_axis(series: Vec<Series>) -> Result<Self, TableError> {
        let len = series.first().map_or(0, |s| s.values.len());
        let x_values = (0..len).map(|i| i as f64).collect();
        Self::new(x_values, series)
    }

    /// The x-axis values, one per sample.
    pub fn x_values(&self) -> &[f64] {
        &self.x_values
    }

    /// The series, in input order.
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Number of series (`sCount`).
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Number of samples (`L`).
    pub fn sample_count(&self) -> usize {
        self.x_values.len()
    }

    /// Series names, in input order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;
    use alloc::vec;

    use super::*;

    #[test]
    fn rejects_empty_series_list() {
        assert_eq!(
            SeriesTable::new(vec![0.0], Vec::new()),
            Err(TableError::NoSeries)
        );
    }

    #[test]
    fn rejects_empty_axis() {
        let err = SeriesTable::new(Vec::new(), vec![Series::new("a", Vec::new())]);
        assert_eq!(err, Err(TableError::NoSamples));
    }

    #[test]
    fn reports_first_mismatched_series() {
        let err = SeriesTable::new(
            vec![0.0, 1.0, 2.0],
            vec![
                Series::new("a", vec![1.0, 2.0, 3.0]),
                Series::new("b", vec![1.0, 2.0]),
                Series::new("c", vec![1.0]),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            TableError::LengthMismatch {
                series: 1,
                expected: 3,
                found: 2
            }
        );
        assert!(err.to_string().contains("series 1"), "{err}");
    }

    #[test]
    fn index_axis_counts_samples() {
        let t = SeriesTable::with_index_axis(vec![Series::new("a", vec![5.0, 6.0, 7.0])]).unwrap();
        assert_eq!(t.x_values(), &[0.0, 1.0, 2.0]);
        assert_eq!(t.sample_count(), 3);
        assert_eq!(t.series_count(), 1);
    }
}
