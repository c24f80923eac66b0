//! Recording subscriber
//!
//! Captures the full event stream and keeps a listener-side view of the
//! book built purely from events: adds insert, amends replace volume,
//! removes delete, and matches subtract the traded volume from both orders.
//! Useful for tests and for replaying what a downstream consumer would see.

use std::collections::BTreeMap;

use types::ids::InstrumentId;
use types::ids::OrderId;
use types::numeric::{Price, Volume};
use types::order::Side;

use crate::events::{
    EngineEvent, EngineListener, MatchEvent, OrderAdded, OrderAmended, OrderRemoved,
};

/// Listener that stores every event it receives
#[derive(Debug, Default)]
pub struct RecordingListener {
    events: Vec<EngineEvent>,
    /// Orders visible to this listener, by id
    live: BTreeMap<OrderId, OrderAdded>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events in delivery order
    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    pub fn matches(&self) -> impl Iterator<Item = &MatchEvent> {
        self.events.iter().filter_map(|event| match event {
            EngineEvent::Match(m) => Some(m),
            _ => None,
        })
    }

    pub fn match_count(&self) -> usize {
        self.matches().count()
    }

    /// Drop recorded events, keeping the book view
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Orders currently visible on one side
    pub fn order_count(&self, side: Side) -> usize {
        self.live.values().filter(|order| order.side == side).count()
    }

    /// Whether an order with exactly this price and volume is visible
    pub fn has_order(
        &self,
        instrument: InstrumentId,
        side: Side,
        price: Price,
        volume: Volume,
    ) -> bool {
        self.live.values().any(|order| {
            order.instrument == instrument
                && order.side == side
                && order.price == price
                && order.volume == volume
        })
    }

    fn reduce(&mut self, order_id: OrderId, volume: Volume) {
        let filled = match self.live.get_mut(&order_id) {
            Some(order) => {
                order.volume -= volume;
                order.volume <= 0
            }
            None => false,
        };
        if filled {
            self.live.remove(&order_id);
        }
    }
}

impl EngineListener for RecordingListener {
    fn on_match(&mut self, event: &MatchEvent) {
        self.reduce(event.bid_order_id, event.volume);
        self.reduce(event.ask_order_id, event.volume);
        self.events.push(EngineEvent::Match(event.clone()));
    }

    fn on_order_add(&mut self, event: &OrderAdded) {
        self.live.insert(event.order_id, event.clone());
        self.events.push(EngineEvent::OrderAdded(event.clone()));
    }

    fn on_order_amend(&mut self, event: &OrderAmended) {
        if let Some(order) = self.live.get_mut(&event.order_id) {
            order.volume = event.volume;
        }
        self.events.push(EngineEvent::OrderAmended(*event));
    }

    fn on_order_remove(&mut self, event: &OrderRemoved) {
        self.live.remove(&event.order_id);
        self.events.push(EngineEvent::OrderRemoved(*event));
    }
}
