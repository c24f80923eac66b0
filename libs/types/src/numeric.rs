//! Numeric types for prices and volumes
//!
//! Prices use rust_decimal for deterministic comparison (no floating-point
//! surprises when two feed prices should be equal). Volumes are whole units.
//!
//! Neither type rejects zero or negative values: the engine accepts whatever
//! the caller submits on `add`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order volume in whole units
pub type Volume = i64;

/// Limit price
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn from_u64(value: u64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    /// Parse a decimal string such as "100.25"
    pub fn from_str(value: &str) -> Result<Self, rust_decimal::Error> {
        Decimal::from_str(value).map(Self)
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}
