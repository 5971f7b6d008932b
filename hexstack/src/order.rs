// Copyright 2025 the Hexstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Global bottom-to-top series order.
//!
//! Every column stacks series in the same order so bands never swap vertical position from
//! one column to the next. The computed order ranks series by total share across all bins of
//! both parities; a user override replaces it while it remains a valid permutation for the
//! current series count.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use crate::BinPair;

/// Where the active order came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderSource {
    /// Ranked by aggregate share.
    Computed,
    /// Supplied by the user.
    User,
}

/// The order used for a render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveOrder {
    /// Series indices, bottom of the stack first.
    pub order: Vec<usize>,
    /// Whether `order` is the computed ranking or a user override.
    pub source: OrderSource,
}

impl ActiveOrder {
    /// Position of each series within [`Self::order`], indexed by series.
    pub fn positions(&self) -> Vec<usize> {
        positions(&self.order)
    }
}

/// Ranks series by their total share over both bin tables, largest first.
///
/// Ties keep series index order.
pub fn computed_order(bins: &BinPair, series_count: usize) -> Vec<usize> {
    let mut totals = vec![0.0_f64; series_count];
    for table in [&bins.even, &bins.odd] {
        for column in table.columns() {
            for (total, &share) in totals.iter_mut().zip(column) {
                *total += share;
            }
        }
    }
    let mut order: Vec<usize> = (0..series_count).collect();
    // `sort_by` is stable, so equal totals stay in index order.
    order.sort_by(|&a, &b| totals[b].total_cmp(&totals[a]));
    order
}

/// Returns `true` if `order` contains each of `0..series_count` exactly once.
pub fn is_permutation(order: &[usize], series_count: usize) -> bool {
    if order.len() != series_count {
        return false;
    }
    let mut seen = vec![false; series_count];
    for &s in order {
        if s >= series_count || seen[s] {
            return false;
        }
        seen[s] = true;
    }
    true
}

/// Inverse of a permutation: `positions(order)[series] == k` iff `order[k] == series`.
pub fn positions(order: &[usize]) -> Vec<usize> {
    let mut out = vec![0; order.len()];
    for (k, &s) in order.iter().enumerate() {
        if let Some(slot) = out.get_mut(s) {
            *slot = k;
        }
    }
    out
}

/// Holds the optional user override across renders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderOverride {
    user: Option<Vec<usize>>,
}

impl OrderOverride {
    /// Creates an empty override.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored override, valid or not.
    pub fn get(&self) -> Option<&[usize]> {
        self.user.as_deref()
    }

    /// Stores a replacement order. Validity is checked when the order is resolved.
    pub fn set(&mut self, order: Vec<usize>) {
        self.user = Some(order);
    }

    /// Forgets the override; the computed order applies again.
    pub fn clear(&mut self) {
        self.user = None;
    }

    /// Drops the override if it no longer fits `series_count`.
    pub fn retain_if_fits(&mut self, series_count: usize) {
        if self
            .user
            .as_ref()
            .is_some_and(|o| o.len() != series_count)
        {
            log::debug!("discarding order override after series count changed to {series_count}");
            self.user = None;
        }
    }

    /// Picks the override when it is a valid permutation, otherwise `computed`.
    pub fn resolve(&self, computed: Vec<usize>) -> ActiveOrder {
        match &self.user {
            Some(user) if is_permutation(user, computed.len()) => ActiveOrder {
                order: user.clone(),
                source: OrderSource::User,
            },
            Some(user) => {
                log::debug!(
                    "ignoring order override {user:?}: not a permutation of {} series",
                    computed.len()
                );
                ActiveOrder {
                    order: computed,
                    source: OrderSource::Computed,
                }
            }
            None => ActiveOrder {
                order: computed,
                source: OrderSource::Computed,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::{Series, SeriesTable, ShareMatrix};

    fn bins(series: Vec<Vec<f64>>, columns: usize) -> BinPair {
        let table = SeriesTable::with_index_axis(
            series.into_iter().map(|v| Series::new("s", v)).collect(),
        )
        .unwrap();
        BinPair::build(&ShareMatrix::from_table(&table), columns)
    }

    #[test]
    fn ranks_by_total_share_descending() {
        let b = bins(
            vec![
                vec![1.0, 1.0, 1.0, 1.0],
                vec![1.0, 2.0, 1.0, 2.0],
                vec![5.0, 5.0, 5.0, 5.0],
            ],
            2,
        );
        assert_eq!(computed_order(&b, 3), vec![2, 1, 0]);
    }

    #[test]
    fn ties_keep_index_order() {
        let b = bins(vec![vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0]], 2);
        assert_eq!(computed_order(&b, 2), vec![0, 1]);
    }

    #[test]
    fn permutation_check() {
        assert!(is_permutation(&[2, 0, 1], 3));
        assert!(!is_permutation(&[0, 1], 3));
        assert!(!is_permutation(&[0, 0, 1], 3));
        assert!(!is_permutation(&[0, 1, 3], 3));
    }

    #[test]
    fn override_takes_precedence_until_cleared() {
        let mut o = OrderOverride::new();
        o.set(vec![1, 2, 0]);
        let active = o.resolve(vec![2, 0, 1]);
        assert_eq!(active.order, vec![1, 2, 0]);
        assert_eq!(active.source, OrderSource::User);

        o.clear();
        let active = o.resolve(vec![2, 0, 1]);
        assert_eq!(active.order, vec![2, 0, 1]);
        assert_eq!(active.source, OrderSource::Computed);
    }

    #[test]
    fn wrong_length_override_is_ignored_silently() {
        let mut o = OrderOverride::new();
        o.set(vec![1, 0]);
        let active = o.resolve(vec![2, 0, 1]);
        assert_eq!(active.order, vec![2, 0, 1]);
        // The override is kept; only the series count change discards it.
        assert_eq!(o.get(), Some(&[1, 0][..]));
        o.retain_if_fits(3);
        assert_eq!(o.get(), None);
    }

    #[test]
    fn positions_invert_the_order() {
        assert_eq!(positions(&[2, 0, 1]), vec![1, 2, 0]);
    }
}
