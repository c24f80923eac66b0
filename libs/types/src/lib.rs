//! Types library for the order book engine and depth reconciler
//!
//! This library provides the core type definitions shared by the matching
//! engine and the reconciliation layer, so both sides agree on identifiers,
//! numerics and the shape of the depth feed.
//!
//! # Modules
//! - `ids`: Identifiers (OrderId, InstrumentId)
//! - `numeric`: Decimal price and integer volume types
//! - `order`: Side and resting order types
//! - `depth`: Market-depth feed input (PriceLevel, DepthSnapshot)
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod numeric;
pub mod order;
pub mod depth;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::order::*;
    pub use crate::depth::*;
    pub use crate::errors::*;
}
