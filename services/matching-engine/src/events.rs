//! Event structures and subscriber interface for the matching engine
//!
//! Every mutation of the book is published to attached listeners, in the
//! order the mutations happen and before the engine call returns.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use types::ids::{InstrumentId, OrderId};
use types::numeric::{Price, Volume};
use types::order::Side;

/// An order entered the book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAdded {
    pub instrument: InstrumentId,
    pub order_id: OrderId,
    pub price: Price,
    pub volume: Volume,
    pub side: Side,
}

/// An order's remaining volume was replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAmended {
    pub order_id: OrderId,
    pub volume: Volume,
}

/// An order was removed on request (fills do not produce this event)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRemoved {
    pub order_id: OrderId,
}

/// A bid and an ask traded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub instrument: InstrumentId,
    /// Price of the resting order
    pub price: Price,
    pub volume: Volume,
    pub bid_order_id: OrderId,
    pub ask_order_id: OrderId,
    /// Side of the order whose entry caused the match
    pub aggressor: Side,
}

impl MatchEvent {
    pub fn aggressor_is_buy(&self) -> bool {
        self.aggressor.is_buy()
    }

    /// Id of the order that was already resting when the match happened
    pub fn resting_order_id(&self) -> OrderId {
        match self.aggressor {
            Side::BUY => self.ask_order_id,
            Side::SELL => self.bid_order_id,
        }
    }
}

/// Any engine event, for subscribers that record a single stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type")]
pub enum EngineEvent {
    OrderAdded(OrderAdded),
    OrderAmended(OrderAmended),
    OrderRemoved(OrderRemoved),
    Match(MatchEvent),
}

/// Engine subscriber
///
/// Match notification is required; the order lifecycle hooks are optional.
/// Callbacks run synchronously inside the engine call that caused them and
/// must not call back into the engine.
pub trait EngineListener {
    fn on_match(&mut self, event: &MatchEvent);

    fn on_order_add(&mut self, _event: &OrderAdded) {}

    fn on_order_amend(&mut self, _event: &OrderAmended) {}

    fn on_order_remove(&mut self, _event: &OrderRemoved) {}
}

/// Listener handle as stored by the engine
pub type SharedListener = Rc<RefCell<dyn EngineListener>>;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_match(aggressor: Side) -> MatchEvent {
        MatchEvent {
            instrument: InstrumentId::new(1),
            price: Price::from_u64(100),
            volume: 5,
            bid_order_id: OrderId::new(1),
            ask_order_id: OrderId::new(2),
            aggressor,
        }
    }

    #[test]
    fn test_resting_order_is_opposite_of_aggressor() {
        assert_eq!(sample_match(Side::BUY).resting_order_id(), OrderId::new(2));
        assert_eq!(sample_match(Side::SELL).resting_order_id(), OrderId::new(1));
    }

    #[test]
    fn test_event_serialization_is_tagged() {
        let event = EngineEvent::Match(sample_match(Side::SELL));
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event_type\":\"Match\""));

        let deserialized: EngineEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }

    #[test]
    fn test_default_hooks_are_no_ops() {
        struct MatchesOnly(u32);
        impl EngineListener for MatchesOnly {
            fn on_match(&mut self, _event: &MatchEvent) {
                self.0 += 1;
            }
        }

        let mut listener = MatchesOnly(0);
        listener.on_order_remove(&OrderRemoved { order_id: OrderId::new(1) });
        listener.on_match(&sample_match(Side::BUY));
        assert_eq!(listener.0, 1);
    }
}
