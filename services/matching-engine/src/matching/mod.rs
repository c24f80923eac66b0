//! Matching logic module
//!
//! Implements price-priority matching with resting-price execution

pub mod crossing;
pub mod executor;

pub use crossing::can_match;
pub use executor::{execute_next, Fill};
