//! The generic caching tile source.
//!
//! A [`TileSource`] keeps the 3×3 neighborhood of tiles around the most recent
//! query position in memory. It is parameterized by a [`TileFormat`] that
//! turns fetched bytes into a cached payload.

mod cached_tile;
mod format;
mod source;

pub use cached_tile::*;
pub use format::*;
pub use source::*;
