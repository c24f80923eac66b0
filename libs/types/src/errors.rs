//! Error types shared across the engine and reconciler
//!
//! Business failures on the engine surface as boolean results; these enums
//! carry the reason behind them for callers that want it.

use thiserror::Error;

use crate::ids::OrderId;
use crate::numeric::Volume;

/// Order-specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Order not found: {order_id}")]
    NotFound { order_id: OrderId },

    #[error("Invalid volume {volume} for order {order_id}: must be positive")]
    InvalidVolume { order_id: OrderId, volume: Volume },
}

/// Depth feed decoding errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("Invalid price '{value}': {reason}")]
    InvalidPrice { value: String, reason: String },
}
