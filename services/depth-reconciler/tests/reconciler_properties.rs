//! Property tests for depth reconciliation
//!
//! Snapshots are generated uncrossed: bids strictly descending from 100 or
//! below, asks strictly ascending from 101 or above.

use std::cell::RefCell;
use std::rc::Rc;

use depth_reconciler::{DepthReconciler, SharedEngine};
use matching_engine::{MatchingEngine, RecordingListener};
use proptest::prelude::*;
use types::depth::{DepthSnapshot, PriceLevel};
use types::ids::InstrumentId;
use types::numeric::{Price, Volume};
use types::order::Side;

fn side_steps() -> impl Strategy<Value = Vec<(u64, Volume)>> {
    prop::collection::vec((1u64..=3, 1i64..=20), 0..6)
}

fn snapshot() -> impl Strategy<Value = DepthSnapshot> {
    (side_steps(), side_steps()).prop_map(|(bid_steps, ask_steps)| {
        let mut price = 101;
        let bids = bid_steps
            .into_iter()
            .map(|(gap, volume)| {
                price -= gap;
                PriceLevel::new(Price::from_u64(price), volume)
            })
            .collect();

        let mut price = 100;
        let asks = ask_steps
            .into_iter()
            .map(|(gap, volume)| {
                price += gap;
                PriceLevel::new(Price::from_u64(price), volume)
            })
            .collect();

        DepthSnapshot::new(bids, asks)
    })
}

fn instrument() -> InstrumentId {
    InstrumentId::new(7)
}

fn setup() -> (SharedEngine, DepthReconciler, Rc<RefCell<RecordingListener>>) {
    let engine = Rc::new(RefCell::new(MatchingEngine::new()));
    let reconciler = DepthReconciler::new(engine.clone());
    let recorder = Rc::new(RefCell::new(RecordingListener::new()));
    engine.borrow_mut().attach(recorder.clone());
    (engine, reconciler, recorder)
}

fn quoted(engine: &SharedEngine, side: Side) -> Vec<(Price, Volume)> {
    engine.borrow().depth(instrument(), side, usize::MAX)
}

fn expected(snapshot: &DepthSnapshot, side: Side) -> Vec<(Price, Volume)> {
    snapshot.side(side).iter().map(|level| (level.price, level.volume)).collect()
}

proptest! {
    #[test]
    fn prop_second_identical_snapshot_is_a_no_op(snapshot in snapshot()) {
        let (_engine, mut reconciler, recorder) = setup();

        reconciler.on_depth(instrument(), &snapshot);
        recorder.borrow_mut().clear_events();
        let report = reconciler.on_depth(instrument(), &snapshot);

        prop_assert_eq!(report.engine_calls(), 0);
        prop_assert!(recorder.borrow().events().is_empty());
    }

    #[test]
    fn prop_book_follows_snapshots(first in snapshot(), second in snapshot()) {
        let (engine, mut reconciler, recorder) = setup();

        reconciler.on_depth(instrument(), &first);
        reconciler.on_depth(instrument(), &second);

        prop_assert_eq!(recorder.borrow().match_count(), 0);
        prop_assert_eq!(quoted(&engine, Side::BUY), expected(&second, Side::BUY));
        prop_assert_eq!(quoted(&engine, Side::SELL), expected(&second, Side::SELL));
        prop_assert_eq!(engine.borrow().order_count(), second.bids.len() + second.asks.len());
    }

    #[test]
    fn prop_buy_aggressor_is_netted_off_asks(snapshot in snapshot(), fraction in 0.0f64..=1.0) {
        let total: Volume = snapshot.asks.iter().map(|level| level.volume).sum();
        prop_assume!(total > 0);
        let traded = ((total as f64 * fraction) as Volume).clamp(1, total);

        let (engine, mut reconciler, _recorder) = setup();
        reconciler.on_depth(instrument(), &snapshot);
        engine.borrow_mut().add(instrument(), Price::from_u64(1_000), traded, Side::BUY);
        prop_assert_eq!(reconciler.netting_target(instrument(), Side::SELL), traded);

        reconciler.on_depth(instrument(), &snapshot);

        let remaining: Volume = quoted(&engine, Side::SELL).iter().map(|(_, volume)| volume).sum();
        prop_assert_eq!(remaining, total - traded);
        prop_assert_eq!(quoted(&engine, Side::BUY), expected(&snapshot, Side::BUY));
    }
}
