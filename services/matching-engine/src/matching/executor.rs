//! Fill execution logic
//!
//! Performs one step of the matching loop: take the best bid and best ask,
//! trade the smaller remaining volume, and drop whichever order ran out.

use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::{Price, Volume};
use types::order::{Order, Side};

use crate::book::InstrumentBook;
use super::crossing;

/// Outcome of a single crossing step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill {
    pub bid_order_id: OrderId,
    pub ask_order_id: OrderId,
    pub price: Price,
    pub volume: Volume,
}

/// Execute the next fill for an instrument, if its book is crossed
///
/// Both orders lose the traded volume. An order left with nothing is removed
/// from its side and from `orders` before this returns, so by the time the
/// caller publishes the match the book no longer shows it.
pub fn execute_next(
    book: &mut InstrumentBook,
    orders: &mut BTreeMap<OrderId, Order>,
    aggressor: Side,
) -> Option<Fill> {
    let (bid_price, bid_order_id) = book.bids.best()?;
    let (ask_price, ask_order_id) = book.asks.best()?;

    if !crossing::can_match(bid_price, ask_price) {
        return None;
    }

    let bid_volume = orders.get(&bid_order_id)?.volume;
    let ask_volume = orders.get(&ask_order_id)?.volume;
    let volume = bid_volume.min(ask_volume);

    let bid_filled = orders
        .get_mut(&bid_order_id)
        .is_some_and(|bid| bid.fill(volume));
    if bid_filled {
        orders.remove(&bid_order_id);
        book.bids.remove(bid_price, bid_order_id);
    }

    let ask_filled = orders
        .get_mut(&ask_order_id)
        .is_some_and(|ask| ask.fill(volume));
    if ask_filled {
        orders.remove(&ask_order_id);
        book.asks.remove(ask_price, ask_order_id);
    }

    Some(Fill {
        bid_order_id,
        ask_order_id,
        price: crossing::execution_price(aggressor, bid_price, ask_price),
        volume,
    })
}
