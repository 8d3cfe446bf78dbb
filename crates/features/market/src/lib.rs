//! Market data slice.
//!
//! Pulls daily closes for a fixed watchlist, turns them into period
//! performance and renders the text block used in report prompts.

mod digest;
mod error;
mod performance;
mod source;
pub mod watchlist;
mod yahoo;

pub use digest::performance_digest;
pub use error::{MarketError, MarketErrorExt};
pub use performance::{MarketSnapshot, Performance, Quote, collect_snapshot};
pub use source::QuoteSource;
pub use yahoo::YahooClient;
