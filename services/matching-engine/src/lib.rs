//! Matching Engine Service
//!
//! Price-priority limit order book for a toy trading venue. Accepts orders,
//! matches crossing bids and asks, and notifies subscribers of every add,
//! amend, remove and match.
//!
//! **Key Invariants:**
//! - Best bid is strictly below best ask after every call returns
//! - Trades execute at the resting order's price
//! - An order never stays visible with zero remaining volume
//! - Order ids are unique, increasing and never reused
//! - Events are delivered in mutation order, before the call returns

pub mod book;
pub mod matching;
pub mod engine;
pub mod events;
pub mod recording;

pub use engine::MatchingEngine;
pub use events::{
    EngineEvent, EngineListener, MatchEvent, OrderAdded, OrderAmended, OrderRemoved, SharedListener,
};
pub use recording::RecordingListener;
