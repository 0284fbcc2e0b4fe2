//! Byte transports for tile payloads.
//!
//! Tile sources never talk to the network directly; they go through a
//! [`TileFetcher`]. [`HttpFetcher`] is the production transport and
//! [`MockFetcher`] serves canned responses from memory.

mod fetcher;
mod fetcher_http;
mod fetcher_mock;

pub use fetcher::*;
pub use fetcher_http::*;
pub use fetcher_mock::*;
