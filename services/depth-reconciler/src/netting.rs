//! Netting targets
//!
//! Volume already taken out of the book by trades that the depth feed has
//! not caught up with yet. A buy aggressor consumes resting asks, so it
//! credits the ask side; a sell aggressor credits the bid side. Targets only
//! grow until `clear` is called on the timer boundary.

use std::collections::HashMap;

use matching_engine::{EngineListener, MatchEvent};
use types::ids::InstrumentId;
use types::numeric::Volume;
use types::order::Side;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SideTargets {
    bid: Volume,
    ask: Volume,
}

/// Per-instrument, per-side netting counters
#[derive(Debug, Default)]
pub struct NettingTargets {
    targets: HashMap<InstrumentId, SideTargets>,
}

impl NettingTargets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current target; zero if nothing was ever credited
    pub fn target(&self, instrument: InstrumentId, side: Side) -> Volume {
        self.targets
            .get(&instrument)
            .map(|t| match side {
                Side::BUY => t.bid,
                Side::SELL => t.ask,
            })
            .unwrap_or(0)
    }

    /// Add traded volume to one side's target
    ///
    /// Non-positive volumes leave the counter unchanged.
    pub fn credit(&mut self, instrument: InstrumentId, side: Side, volume: Volume) {
        let targets = self.targets.entry(instrument).or_default();
        let counter = match side {
            Side::BUY => &mut targets.bid,
            Side::SELL => &mut targets.ask,
        };
        *counter = counter.saturating_add(volume.max(0));
    }

    /// Zero every instrument on both sides
    pub fn clear(&mut self) {
        self.targets.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.targets.values().all(|t| t.bid == 0 && t.ask == 0)
    }
}

impl EngineListener for NettingTargets {
    fn on_match(&mut self, event: &MatchEvent) {
        let consumed = if event.aggressor_is_buy() {
            Side::SELL
        } else {
            Side::BUY
        };
        self.credit(event.instrument, consumed, event.volume);
    }
}
