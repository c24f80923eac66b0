//! Rank-by-rank diff between a depth snapshot and the reconciler's quotes
//!
//! The new levels and the previously placed orders are walked in lockstep by
//! rank position: rank N of the snapshot is compared with whatever order sat
//! at rank N last time, whether or not the prices agree.
//!
//! Netting is applied on the way in. A running target absorbs leading ranks
//! whose whole volume it covers (those ranks produce no engine call) and
//! trims the first rank it only partly covers.
//!
//! Planning is pure: it reads the previous quotes and the engine's live
//! volumes and returns one action per rank. Issuing the engine calls is the
//! reconciler's job.

use serde::{Deserialize, Serialize};
use types::depth::PriceLevel;
use types::ids::OrderId;
use types::numeric::{Price, Volume};
use types::order::Side;

/// An order the reconciler placed, as remembered between snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub order_id: OrderId,
    pub price: Price,
    pub volume: Volume,
    pub side: Side,
}

/// What to do with one rank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankAction {
    /// The resting order already shows this level
    Keep(PlacedOrder),
    /// Same price, new volume
    Amend { previous: PlacedOrder, volume: Volume },
    /// The price at this rank moved: cancel the old order, quote the new level
    Replace { previous: PlacedOrder, level: PriceLevel },
    /// Nothing rests at this rank
    Add(PriceLevel),
    /// The rank is no longer in the snapshot
    Remove(PlacedOrder),
    /// Netting absorbed the level. The paired order, if it still rests,
    /// keeps the rank with no engine call.
    Netted(Option<PlacedOrder>),
    /// The rank is gone and so is its order
    Vacant,
}

impl RankAction {
    /// Memory slot this rank carries forward before any engine call is made
    pub fn carried(&self) -> Option<PlacedOrder> {
        match self {
            RankAction::Keep(placed) => Some(*placed),
            RankAction::Amend { previous, .. } => Some(*previous),
            RankAction::Netted(placed) => *placed,
            _ => None,
        }
    }
}

/// Plan one side of a snapshot
///
/// `previous` holds last call's slots, best rank first. `live_volume`
/// reports the engine's remaining volume for an order id, or `None` once the
/// order has left the book (filled or removed); such slots count as empty.
pub fn plan_side(
    previous: &[Option<PlacedOrder>],
    levels: &[PriceLevel],
    target: Volume,
    live_volume: impl Fn(OrderId) -> Option<Volume>,
) -> Vec<RankAction> {
    let ranks = previous.len().max(levels.len());
    let mut remaining = target.max(0);
    let mut plan = Vec::with_capacity(ranks);

    for rank in 0..ranks {
        let resting = previous
            .get(rank)
            .copied()
            .flatten()
            .and_then(|placed| {
                live_volume(placed.order_id).map(|volume| PlacedOrder { volume, ..placed })
            });

        let mut level = levels.get(rank).copied();
        if let Some(level) = level.as_mut() {
            if remaining > 0 {
                if level.volume <= remaining {
                    remaining -= level.volume.max(0);
                    plan.push(RankAction::Netted(resting));
                    continue;
                }
                level.volume -= remaining;
                remaining = 0;
            }
        }

        let action = match (resting, level) {
            (None, Some(level)) => RankAction::Add(level),
            (Some(previous), Some(level)) if previous.price == level.price => {
                if previous.volume == level.volume {
                    RankAction::Keep(previous)
                } else {
                    RankAction::Amend {
                        previous,
                        volume: level.volume,
                    }
                }
            }
            (Some(previous), Some(level)) => RankAction::Replace { previous, level },
            (Some(previous), None) => RankAction::Remove(previous),
            (None, None) => RankAction::Vacant,
        };
        plan.push(action);
    }

    plan
}
