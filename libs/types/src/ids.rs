//! Identifier types for engine entities
//!
//! Order ids are assigned by the engine from a monotonically increasing
//! counter. They are opaque to callers, unique for the lifetime of an engine
//! and never reused after an order leaves the book.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an order
///
/// Ordering follows assignment order, so sorting by id gives the
/// sequence in which orders entered the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// The first id handed out by a fresh engine
    pub const FIRST: OrderId = OrderId(1);

    /// Create from a raw value
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The id assigned immediately after this one
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Instrument identifier
///
/// Instrument metadata lives outside this system; the engine only needs a
/// key to keep one book per instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentId(u32);

impl InstrumentId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for InstrumentId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}
