//! Matching engine core
//!
//! Main coordinator for order storage, matching and event dispatch.
//!
//! Orders live in a single id-keyed index; each instrument's book only keeps
//! `(price, id)` keys per side. Mutations go through the index, so a volume
//! change never has to be applied in two places.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};
use types::errors::OrderError;
use types::ids::{InstrumentId, OrderId};
use types::numeric::{Price, Volume};
use types::order::{Order, Side};

use crate::book::InstrumentBook;
use crate::events::{
    EngineListener, MatchEvent, OrderAdded, OrderAmended, OrderRemoved, SharedListener,
};
use crate::matching::executor;

/// Main matching engine
///
/// Single-threaded and fully synchronous: every call, including the event
/// callbacks it triggers, completes before it returns.
pub struct MatchingEngine {
    /// Books per instrument, created on first add
    books: HashMap<InstrumentId, InstrumentBook>,
    /// Every resting order, by id
    orders: BTreeMap<OrderId, Order>,
    /// Subscribers in registration order
    listeners: Vec<SharedListener>,
    next_order_id: OrderId,
}

impl MatchingEngine {
    /// Create an empty engine; the first order gets id 1
    pub fn new() -> Self {
        Self {
            books: HashMap::new(),
            orders: BTreeMap::new(),
            listeners: Vec::new(),
            next_order_id: OrderId::FIRST,
        }
    }

    /// Register a subscriber
    ///
    /// Events reach subscribers in the order they were attached.
    pub fn attach(&mut self, listener: SharedListener) {
        self.listeners.push(listener);
        debug!(listeners = self.listeners.len(), "Listener attached");
    }

    /// Add an order and match it against the instrument's book
    ///
    /// Always succeeds. Price and volume are not validated; a non-positive
    /// volume is accepted as given. Publishes `OrderAdded`, then one
    /// `MatchEvent` per fill in the order the fills happen.
    ///
    /// # Panics
    /// Panics if a listener calls back into the engine from a callback that
    /// holds its own borrow (the listener `RefCell` is already borrowed).
    pub fn add(
        &mut self,
        instrument: InstrumentId,
        price: Price,
        volume: Volume,
        side: Side,
    ) -> OrderId {
        let order_id = self.next_order_id;
        self.next_order_id = order_id.next();

        if volume <= 0 {
            warn!(%instrument, %order_id, volume, "Order added with non-positive volume");
        }

        let book = self.books.entry(instrument).or_default();
        match side {
            Side::BUY => book.bids.insert(price, order_id),
            Side::SELL => book.asks.insert(price, order_id),
        }
        self.orders.insert(order_id, Order::new(order_id, instrument, side, price, volume));

        debug!(%instrument, %order_id, %price, volume, ?side, "Order added");

        let event = OrderAdded {
            instrument,
            order_id,
            price,
            volume,
            side,
        };
        self.notify(|listener| listener.on_order_add(&event));

        self.match_instrument(instrument, side);

        order_id
    }

    /// Replace an order's remaining volume
    ///
    /// Returns false, with no change and no event, if the order is unknown
    /// or `volume` is not positive.
    pub fn amend(&mut self, order_id: OrderId, volume: Volume) -> bool {
        match self.try_amend(order_id, volume) {
            Ok(()) => true,
            Err(err) => {
                debug!(error = %err, "Amend rejected");
                false
            }
        }
    }

    /// Replace an order's remaining volume, reporting why it failed
    ///
    /// Price and book position are untouched, so this never triggers matching.
    pub fn try_amend(&mut self, order_id: OrderId, volume: Volume) -> Result<(), OrderError> {
        let order = self
            .orders
            .get_mut(&order_id)
            .ok_or(OrderError::NotFound { order_id })?;

        if volume <= 0 {
            return Err(OrderError::InvalidVolume { order_id, volume });
        }

        order.volume = volume;
        debug!(%order_id, volume, "Order amended");

        let event = OrderAmended { order_id, volume };
        self.notify(|listener| listener.on_order_amend(&event));
        Ok(())
    }

    /// Remove an order from the book
    ///
    /// Returns false if the order is unknown (including already filled).
    pub fn remove(&mut self, order_id: OrderId) -> bool {
        match self.try_remove(order_id) {
            Ok(_) => true,
            Err(err) => {
                debug!(error = %err, "Remove rejected");
                false
            }
        }
    }

    /// Remove an order from the book, returning the removed record
    pub fn try_remove(&mut self, order_id: OrderId) -> Result<Order, OrderError> {
        let order = self
            .orders
            .remove(&order_id)
            .ok_or(OrderError::NotFound { order_id })?;

        if let Some(book) = self.books.get_mut(&order.instrument) {
            match order.side {
                Side::BUY => book.bids.remove(order.price, order_id),
                Side::SELL => book.asks.remove(order.price, order_id),
            };
        }
        debug!(%order_id, instrument = %order.instrument, "Order removed");

        let event = OrderRemoved { order_id };
        self.notify(|listener| listener.on_order_remove(&event));
        Ok(order)
    }

    /// Look up a resting order
    pub fn order(&self, order_id: OrderId) -> Option<&Order> {
        self.orders.get(&order_id)
    }

    /// Number of resting orders across all instruments
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Highest-priority buy order for an instrument
    pub fn best_bid(&self, instrument: InstrumentId) -> Option<&Order> {
        let (_, order_id) = self.books.get(&instrument)?.bids.best()?;
        self.orders.get(&order_id)
    }

    /// Highest-priority sell order for an instrument
    pub fn best_ask(&self, instrument: InstrumentId) -> Option<&Order> {
        let (_, order_id) = self.books.get(&instrument)?.asks.best()?;
        self.orders.get(&order_id)
    }

    /// Resting orders on one side, in matching priority
    pub fn resting_orders(&self, instrument: InstrumentId, side: Side) -> Vec<&Order> {
        let Some(book) = self.books.get(&instrument) else {
            return Vec::new();
        };
        let keys: Vec<(Price, OrderId)> = match side {
            Side::BUY => book.bids.iter().collect(),
            Side::SELL => book.asks.iter().collect(),
        };
        keys.into_iter()
            .filter_map(|(_, order_id)| self.orders.get(&order_id))
            .collect()
    }

    /// Aggregated volume per price for the top `levels` prices, best first
    pub fn depth(
        &self,
        instrument: InstrumentId,
        side: Side,
        levels: usize,
    ) -> Vec<(Price, Volume)> {
        let mut depth: Vec<(Price, Volume)> = Vec::new();
        for order in self.resting_orders(instrument, side) {
            let same_level = depth.last().is_some_and(|(price, _)| *price == order.price);
            if same_level {
                if let Some((_, volume)) = depth.last_mut() {
                    *volume += order.volume;
                }
                continue;
            }
            if depth.len() == levels {
                break;
            }
            depth.push((order.price, order.volume));
        }
        depth
    }

    /// Run the matching loop for one instrument after an add
    fn match_instrument(&mut self, instrument: InstrumentId, aggressor: Side) {
        loop {
            let Some(book) = self.books.get_mut(&instrument) else {
                return;
            };
            let Some(fill) = executor::execute_next(book, &mut self.orders, aggressor) else {
                return;
            };

            debug!(
                %instrument,
                price = %fill.price,
                volume = fill.volume,
                bid_order_id = %fill.bid_order_id,
                ask_order_id = %fill.ask_order_id,
                ?aggressor,
                "Orders matched"
            );

            let event = MatchEvent {
                instrument,
                price: fill.price,
                volume: fill.volume,
                bid_order_id: fill.bid_order_id,
                ask_order_id: fill.ask_order_id,
                aggressor,
            };
            self.notify(|listener| listener.on_match(&event));
        }
    }

    fn notify(&self, mut deliver: impl FnMut(&mut dyn EngineListener)) {
        for listener in &self.listeners {
            deliver(&mut *listener.borrow_mut());
        }
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}
