//! Crossing detection logic
//!
//! Determines when a bid and ask can match and at which price they trade

use types::numeric::Price;
use types::order::Side;

/// Check if a bid and ask can match at given prices
///
/// For a buy order to match with a sell order the buy price must be
/// greater than or equal to the sell price.
pub fn can_match(bid_price: Price, ask_price: Price) -> bool {
    bid_price >= ask_price
}

/// Execution price for a crossed pair
///
/// Trades happen at the resting order's price. A buy aggressor lifts the
/// resting ask, so it pays the lower of the two; a sell aggressor hits the
/// resting bid and receives the higher.
pub fn execution_price(aggressor: Side, bid_price: Price, ask_price: Price) -> Price {
    match aggressor {
        Side::BUY => bid_price.min(ask_price),
        Side::SELL => bid_price.max(ask_price),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_match_crossing() {
        let bid = Price::from_u64(101);
        let ask = Price::from_u64(100);
        assert!(can_match(bid, ask), "Bid >= ask should match");
    }

    #[test]
    fn test_can_match_exact() {
        let price = Price::from_u64(100);
        assert!(can_match(price, price), "Equal prices should match");
    }

    #[test]
    fn test_can_match_no_cross() {
        let bid = Price::from_u64(99);
        let ask = Price::from_u64(100);
        assert!(!can_match(bid, ask), "Bid < ask should not match");
    }

    #[test]
    fn test_buy_aggressor_pays_resting_ask() {
        let price = execution_price(Side::BUY, Price::from_u64(101), Price::from_u64(100));
        assert_eq!(price, Price::from_u64(100));
    }

    #[test]
    fn test_sell_aggressor_receives_resting_bid() {
        let price = execution_price(Side::SELL, Price::from_u64(100), Price::from_u64(99));
        assert_eq!(price, Price::from_u64(100));
    }
}
