//! Market-depth feed input
//!
//! A depth snapshot is the already-decoded form of an external feed message:
//! two ranked sequences of price levels, one per side. Ranks are trusted to
//! be best-first (descending for bids, ascending for asks). Nothing here
//! re-sorts or validates monotonic price order.

use serde::{Deserialize, Serialize};

use crate::errors::FeedError;
use crate::numeric::{Price, Volume};
use crate::order::Side;

/// One rank of a depth snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: Price,
    pub volume: Volume,
}

impl PriceLevel {
    pub fn new(price: Price, volume: Volume) -> Self {
        Self { price, volume }
    }

    /// Build a level from the textual price a feed decoder hands over
    pub fn parse(price: &str, volume: Volume) -> Result<Self, FeedError> {
        let parsed = Price::from_str(price).map_err(|e| FeedError::InvalidPrice {
            value: price.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(parsed, volume))
    }
}

/// Ranked depth for both sides of one instrument
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthSnapshot {
    /// Bid levels, best (highest) price first
    #[serde(default)]
    pub bids: Vec<PriceLevel>,
    /// Ask levels, best (lowest) price first
    #[serde(default)]
    pub asks: Vec<PriceLevel>,
}

impl DepthSnapshot {
    pub fn new(bids: Vec<PriceLevel>, asks: Vec<PriceLevel>) -> Self {
        Self { bids, asks }
    }

    /// Empty snapshot, clears every quote on reconciliation
    pub fn empty() -> Self {
        Self::default()
    }

    /// Ranked levels for one side
    pub fn side(&self, side: Side) -> &[PriceLevel] {
        match side {
            Side::BUY => &self.bids,
            Side::SELL => &self.asks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}
