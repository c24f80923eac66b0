//! Order book infrastructure module
//!
//! Contains the bid and ask key sets. Each side is its own type with its own
//! ordering; order records are held once, in the engine's id index.

pub mod bid_book;
pub mod ask_book;

pub use bid_book::BidBook;
pub use ask_book::AskBook;

/// Both sides of the book for a single instrument
#[derive(Debug, Clone, Default)]
pub struct InstrumentBook {
    pub bids: BidBook,
    pub asks: AskBook,
}
