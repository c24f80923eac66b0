//! Depth reconciler
//!
//! Drives a [`MatchingEngine`] from market-depth snapshots so that the
//! engine's book quotes what the feed shows, less the volume that trades have
//! already consumed but the feed has not caught up with yet.
//!
//! Each `on_depth` call plans both sides against the quotes placed last time
//! (see [`crate::diff`]) and then issues the engine calls in three passes:
//! every removal, then every amend, then every add. Stale quotes are gone
//! before new ones arrive, so a snapshot that moves through the previous
//! prices never trades against the reconciler's own orders.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use matching_engine::{EngineListener, MatchEvent, MatchingEngine, SharedListener};
use serde::Serialize;
use tracing::{debug, info, warn};
use types::depth::DepthSnapshot;
use types::ids::InstrumentId;
use types::numeric::Volume;
use types::order::Side;

use crate::config::{ConfigError, ReconcilerConfig};
use crate::diff::{self, PlacedOrder, RankAction};
use crate::netting::NettingTargets;

/// Engine handle shared between the reconciler and the caller.
pub type SharedEngine = Rc<RefCell<MatchingEngine>>;

/// What one `on_depth` call did.
///
/// A rank whose price moved counts once in `removed` and once in `added`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub added: usize,
    pub amended: usize,
    pub removed: usize,
    /// Ranks already quoted exactly as the snapshot shows them.
    pub unchanged: usize,
    /// Ranks absorbed whole by a netting target.
    pub netted: usize,
    /// Amend or remove calls the engine refused.
    pub rejected: usize,
}

impl ReconcileReport {
    /// Number of add, amend and remove calls that took effect.
    pub fn engine_calls(&self) -> usize {
        self.added + self.amended + self.removed
    }
}

/// Quote slots for one instrument, indexed by rank, best first.
///
/// An empty slot is a rank with nothing resting behind it.
#[derive(Debug, Default)]
struct Quotes {
    bids: Vec<Option<PlacedOrder>>,
    asks: Vec<Option<PlacedOrder>>,
}

impl Quotes {
    fn side(&self, side: Side) -> &[Option<PlacedOrder>] {
        match side {
            Side::BUY => &self.bids,
            Side::SELL => &self.asks,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut Vec<Option<PlacedOrder>> {
        match side {
            Side::BUY => &mut self.bids,
            Side::SELL => &mut self.asks,
        }
    }

    fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

/// Sides in the order their calls are issued within each pass.
const SIDES: [Side; 2] = [Side::SELL, Side::BUY];

/// Keeps a synthetic book in the engine in line with a depth feed.
///
/// # Panics
/// Engine calls run while the reconciler holds the engine's `RefCell`
/// mutably. A listener attached to the same engine that borrows the engine
/// from its callback panics on the borrow.
pub struct DepthReconciler {
    engine: SharedEngine,
    netting: Rc<RefCell<NettingTargets>>,
    quotes: HashMap<InstrumentId, Quotes>,
    config: ReconcilerConfig,
}

impl DepthReconciler {
    /// Create a reconciler with the default configuration.
    ///
    /// The netting counters are attached to `engine` as a listener, so
    /// matches the engine produces are netted automatically.
    pub fn new(engine: SharedEngine) -> Self {
        Self::build(engine, ReconcilerConfig::default())
    }

    /// Create a reconciler with an explicit configuration.
    pub fn with_config(
        engine: SharedEngine,
        config: ReconcilerConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(engine, config))
    }

    fn build(engine: SharedEngine, config: ReconcilerConfig) -> Self {
        let netting = Rc::new(RefCell::new(NettingTargets::new()));
        let listener: SharedListener = netting.clone();
        engine.borrow_mut().attach(listener);

        info!(
            netting_enabled = config.netting_enabled,
            max_levels = ?config.max_levels,
            "Depth reconciler attached"
        );

        Self {
            engine,
            netting,
            quotes: HashMap::new(),
            config,
        }
    }

    /// Bring the instrument's quotes in line with `snapshot`.
    ///
    /// The snapshot itself is never modified; netting works on local copies
    /// of the level volumes.
    pub fn on_depth(
        &mut self,
        instrument: InstrumentId,
        snapshot: &DepthSnapshot,
    ) -> ReconcileReport {
        let plans = SIDES.map(|side| (side, self.plan(instrument, side, snapshot)));

        let mut report = ReconcileReport::default();
        let mut slots = plans
            .each_ref()
            .map(|(_, plan)| plan.iter().map(RankAction::carried).collect::<Vec<_>>());

        {
            let mut engine = self.engine.borrow_mut();

            for (side, plan) in &plans {
                for action in plan {
                    let stale = match action {
                        RankAction::Replace { previous, .. } | RankAction::Remove(previous) => {
                            previous
                        }
                        _ => continue,
                    };
                    if engine.remove(stale.order_id) {
                        report.removed += 1;
                    } else {
                        warn!(
                            %instrument,
                            side = ?side,
                            order_id = %stale.order_id,
                            "Quote removal rejected"
                        );
                        report.rejected += 1;
                    }
                }
            }

            for ((side, plan), slots) in plans.iter().zip(slots.iter_mut()) {
                for (action, slot) in plan.iter().zip(slots.iter_mut()) {
                    match action {
                        RankAction::Amend { previous, volume } => {
                            if engine.amend(previous.order_id, *volume) {
                                report.amended += 1;
                                *slot = Some(PlacedOrder {
                                    volume: *volume,
                                    ..*previous
                                });
                            } else {
                                warn!(
                                    %instrument,
                                    side = ?side,
                                    order_id = %previous.order_id,
                                    volume,
                                    "Quote amend rejected"
                                );
                                report.rejected += 1;
                                // Whatever still rests keeps its rank
                                *slot = engine.order(previous.order_id).map(|_| *previous);
                            }
                        }
                        RankAction::Keep(_) => report.unchanged += 1,
                        RankAction::Netted(_) => report.netted += 1,
                        _ => {}
                    }
                }
            }

            for ((side, plan), slots) in plans.iter().zip(slots.iter_mut()) {
                for (action, slot) in plan.iter().zip(slots.iter_mut()) {
                    let level = match action {
                        RankAction::Add(level) | RankAction::Replace { level, .. } => level,
                        _ => continue,
                    };
                    let order_id = engine.add(instrument, level.price, level.volume, *side);
                    report.added += 1;
                    *slot = Some(PlacedOrder {
                        order_id,
                        price: level.price,
                        volume: level.volume,
                        side: *side,
                    });
                }
            }
        }

        let quotes = self.quotes.entry(instrument).or_default();
        for (side, mut slots) in SIDES.into_iter().zip(slots) {
            while slots.last().is_some_and(Option::is_none) {
                slots.pop();
            }
            *quotes.side_mut(side) = slots;
        }
        if quotes.is_empty() {
            self.quotes.remove(&instrument);
        }

        debug!(
            %instrument,
            added = report.added,
            amended = report.amended,
            removed = report.removed,
            unchanged = report.unchanged,
            netted = report.netted,
            rejected = report.rejected,
            "Depth snapshot applied"
        );
        report
    }

    fn plan(
        &self,
        instrument: InstrumentId,
        side: Side,
        snapshot: &DepthSnapshot,
    ) -> Vec<RankAction> {
        let target = if self.config.netting_enabled {
            self.netting.borrow().target(instrument, side)
        } else {
            0
        };
        let previous = self
            .quotes
            .get(&instrument)
            .map(|quotes| quotes.side(side))
            .unwrap_or_default();
        let levels = self.config.levels(snapshot.side(side));

        let engine = self.engine.borrow();
        diff::plan_side(previous, levels, target, |order_id| {
            engine.order(order_id).map(|order| order.volume)
        })
    }

    /// Credit a match to the netting counters.
    ///
    /// Matches from the engine passed to the constructor are credited
    /// automatically; use this for trades that engine did not execute.
    pub fn on_match(&self, event: &MatchEvent) {
        self.netting.borrow_mut().on_match(event);
    }

    /// Zero every netting counter; the next snapshot is applied at face value.
    pub fn on_timer(&self) {
        self.netting.borrow_mut().clear();
        info!("Netting targets cleared");
    }

    /// Volume the next snapshot for this side will be netted by.
    pub fn netting_target(&self, instrument: InstrumentId, side: Side) -> Volume {
        self.netting.borrow().target(instrument, side)
    }

    /// Quotes remembered for one side, best rank first.
    ///
    /// Reflects the last `on_depth` call; orders filled since then are still
    /// listed until the next snapshot notices.
    pub fn placed_orders(&self, instrument: InstrumentId, side: Side) -> Vec<PlacedOrder> {
        self.quotes
            .get(&instrument)
            .map(|quotes| quotes.side(side).iter().flatten().copied().collect())
            .unwrap_or_default()
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::depth::PriceLevel;
    use types::numeric::Price;

    fn level(price: u64, volume: Volume) -> PriceLevel {
        PriceLevel::new(Price::from_u64(price), volume)
    }

    fn setup() -> (SharedEngine, DepthReconciler) {
        let engine = Rc::new(RefCell::new(MatchingEngine::new()));
        let reconciler = DepthReconciler::new(engine.clone());
        (engine, reconciler)
    }

    #[test]
    fn test_first_snapshot_adds_everything() {
        let (engine, mut reconciler) = setup();
        let snapshot = DepthSnapshot::new(vec![level(100, 10)], vec![level(101, 10)]);

        let report = reconciler.on_depth(InstrumentId::new(1), &snapshot);

        assert_eq!(report.added, 2);
        assert_eq!(report.engine_calls(), 2);
        assert_eq!(engine.borrow().order_count(), 2);
        assert_eq!(reconciler.placed_orders(InstrumentId::new(1), Side::BUY).len(), 1);
    }

    #[test]
    fn test_empty_snapshot_forgets_instrument() {
        let (engine, mut reconciler) = setup();
        let instrument = InstrumentId::new(1);
        reconciler.on_depth(instrument, &DepthSnapshot::new(vec![level(100, 10)], vec![]));

        let report = reconciler.on_depth(instrument, &DepthSnapshot::empty());

        assert_eq!(report.removed, 1);
        assert!(reconciler.quotes.is_empty());
        assert_eq!(engine.borrow().order_count(), 0);
    }

    #[test]
    fn test_engine_matches_feed_netting() {
        let (engine, reconciler) = setup();
        let instrument = InstrumentId::new(3);

        engine.borrow_mut().add(instrument, Price::from_u64(100), 4, Side::BUY);
        engine.borrow_mut().add(instrument, Price::from_u64(100), 6, Side::SELL);

        assert_eq!(reconciler.netting_target(instrument, Side::BUY), 4);
        reconciler.on_timer();
        assert_eq!(reconciler.netting_target(instrument, Side::BUY), 0);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let engine = Rc::new(RefCell::new(MatchingEngine::new()));
        let config = ReconcilerConfig {
            max_levels: Some(0),
            ..Default::default()
        };

        assert!(DepthReconciler::with_config(engine, config).is_err());
    }

    #[test]
    fn test_trailing_empty_slots_trimmed() {
        let (_engine, mut reconciler) = setup();
        let instrument = InstrumentId::new(1);
        let two_bids = DepthSnapshot::new(vec![level(100, 10), level(99, 10)], vec![]);
        reconciler.on_depth(instrument, &two_bids);

        reconciler.on_depth(instrument, &DepthSnapshot::new(vec![level(100, 10)], vec![]));

        let quotes = &reconciler.quotes[&instrument];
        assert_eq!(quotes.bids.len(), 1);
        assert!(quotes.asks.is_empty());
    }
}
