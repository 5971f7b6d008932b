// Copyright 2025 the Hexstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Order editing for reorder UIs.
//!
//! A drag-to-reorder list only needs to move one entry to a new position. [`OrderList`] keeps
//! that mutation on a plain permutation; the UI reads it back and hands it to the session as
//! the user override.

extern crate alloc;

use alloc::vec::Vec;

/// An editable series order (bottom of the stack first).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderList {
    order: Vec<usize>,
}

impl OrderList {
    /// Wraps an order, usually the session's active order.
    pub fn new(order: Vec<usize>) -> Self {
        Self { order }
    }

    /// The current order.
    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Moves the entry at position `from` so it ends up at position `to`.
    ///
    /// Entries in between shift by one. Out-of-range positions leave the list unchanged and
    /// return `false`.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from >= self.order.len() || to >= self.order.len() {
            return false;
        }
        if from != to {
            let item = self.order.remove(from);
            self.order.insert(to, item);
        }
        true
    }

    /// Moves the entry for `series` to position `to`.
    pub fn move_series(&mut self, series: usize, to: usize) -> bool {
        match self.order.iter().position(|&s| s == series) {
            Some(from) => self.move_item(from, to),
            None => false,
        }
    }

    /// Consumes the list, returning the order.
    pub fn into_vec(self) -> Vec<usize> {
        self.order
    }
}
