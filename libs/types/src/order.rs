//! Order types
//!
//! An order carries only what the engine needs to rank and match it:
//! instrument, side, limit price and remaining volume. Price and side never
//! change after entry; volume is reduced by fills and replaced by amends.

use crate::ids::{InstrumentId, OrderId};
use crate::numeric::{Price, Volume};
use serde::{Deserialize, Serialize};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    BUY,
    /// Sell order (ask)
    SELL,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::BUY => Side::SELL,
            Side::SELL => Side::BUY,
        }
    }

    pub fn from_is_buy(is_buy: bool) -> Self {
        if is_buy {
            Side::BUY
        } else {
            Side::SELL
        }
    }

    pub fn is_buy(&self) -> bool {
        matches!(self, Side::BUY)
    }
}

/// A resting order as held by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub instrument: InstrumentId,
    pub side: Side,
    pub price: Price,
    /// Remaining volume
    pub volume: Volume,
}

impl Order {
    pub fn new(
        order_id: OrderId,
        instrument: InstrumentId,
        side: Side,
        price: Price,
        volume: Volume,
    ) -> Self {
        Self {
            order_id,
            instrument,
            side,
            price,
            volume,
        }
    }

    /// Check if nothing remains to be matched
    pub fn is_filled(&self) -> bool {
        self.volume <= 0
    }

    /// Reduce remaining volume by a fill and report whether the order is done
    pub fn fill(&mut self, volume: Volume) -> bool {
        self.volume -= volume;
        self.is_filled()
    }
}
