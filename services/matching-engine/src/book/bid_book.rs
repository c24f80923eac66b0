//! Bid (buy-side) order book
//!
//! Maintains buy order keys sorted by price descending (best bid first).
//! The descending order is carried by the key type itself (`Reverse<Price>`),
//! so iterating the set front to back is always matching priority.

use std::cmp::Reverse;
use std::collections::BTreeSet;
use types::ids::OrderId;
use types::numeric::Price;

/// Bid (buy) side order book
///
/// Stores `(Reverse(price), order_id)` keys; highest price first, then
/// lowest id among equal prices.
#[derive(Debug, Clone, Default)]
pub struct BidBook {
    /// Keys sorted descending by price
    entries: BTreeSet<(Reverse<Price>, OrderId)>,
}

impl BidBook {
    /// Create a new empty bid book
    pub fn new() -> Self {
        Self {
            entries: BTreeSet::new(),
        }
    }

    /// Insert an order key into the bid book
    pub fn insert(&mut self, price: Price, order_id: OrderId) {
        self.entries.insert((Reverse(price), order_id));
    }

    /// Remove an order key from the bid book
    ///
    /// Returns true if the order was found and removed
    pub fn remove(&mut self, price: Price, order_id: OrderId) -> bool {
        self.entries.remove(&(Reverse(price), order_id))
    }

    /// Get the best bid (highest price)
    pub fn best(&self) -> Option<(Price, OrderId)> {
        self.entries
            .first()
            .map(|(Reverse(price), order_id)| (*price, *order_id))
    }

    /// Get the best bid price
    pub fn best_price(&self) -> Option<Price> {
        self.best().map(|(price, _)| price)
    }

    /// Iterate keys in matching priority (highest price first)
    pub fn iter(&self) -> impl Iterator<Item = (Price, OrderId)> + '_ {
        self.entries
            .iter()
            .map(|(Reverse(price), order_id)| (*price, *order_id))
    }

    /// Check if the bid book is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the number of resting orders
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
