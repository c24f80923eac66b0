//! Depth Reconciler
//!
//! Keeps a synthetic order book inside the matching engine in sync with an
//! external market-depth feed.
//!
//! # Modules
//! - `config`: Reconciler settings loaded from JSON
//! - `diff`: Rank-by-rank planning of adds, amends and removes
//! - `netting`: Trade volume not yet reflected by the feed
//! - `reconciler`: Applies snapshots to the engine

pub mod config;
pub mod diff;
pub mod netting;
pub mod reconciler;

pub use config::{ConfigError, ReconcilerConfig};
pub use diff::PlacedOrder;
pub use netting::NettingTargets;
pub use reconciler::{DepthReconciler, ReconcileReport, SharedEngine};
