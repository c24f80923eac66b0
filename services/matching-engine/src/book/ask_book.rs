//! Ask (sell-side) order book
//!
//! Maintains sell order keys sorted by price ascending (best ask first).
//! Uses BTreeSet for deterministic iteration order. Orders sharing a price
//! iterate in id order; no separate queue per price is kept.

use std::collections::BTreeSet;
use types::ids::OrderId;
use types::numeric::Price;

/// Ask (sell) side order book
///
/// Stores `(price, order_id)` keys only. The order records themselves live in
/// the engine's id index, so volume changes never need to touch this set.
#[derive(Debug, Clone, Default)]
pub struct AskBook {
    /// Keys sorted ascending (lowest price first)
    entries: BTreeSet<(Price, OrderId)>,
}

impl AskBook {
    /// Create a new empty ask book
    pub fn new() -> Self {
        Self {
            entries: BTreeSet::new(),
        }
    }

    /// Insert an order key into the ask book
    pub fn insert(&mut self, price: Price, order_id: OrderId) {
        self.entries.insert((price, order_id));
    }

    /// Remove an order key from the ask book
    ///
    /// Returns true if the order was found and removed
    pub fn remove(&mut self, price: Price, order_id: OrderId) -> bool {
        self.entries.remove(&(price, order_id))
    }

    /// Get the best ask (lowest price)
    pub fn best(&self) -> Option<(Price, OrderId)> {
        self.entries.first().copied()
    }

    /// Get the best ask price
    pub fn best_price(&self) -> Option<Price> {
        self.best().map(|(price, _)| price)
    }

    /// Iterate keys in matching priority (lowest price first)
    pub fn iter(&self) -> impl Iterator<Item = (Price, OrderId)> + '_ {
        self.entries.iter().copied()
    }

    /// Check if the ask book is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the number of resting orders
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
