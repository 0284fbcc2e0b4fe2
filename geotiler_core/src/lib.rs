//! Core building blocks of geotiler: Spherical Mercator math, tile addressing,
//! elevation rasters, byte transports and the generic caching tile source.

pub mod io;

mod projection;
pub use projection::*;

pub mod tile_source;
pub use tile_source::*;

pub mod types;
pub use types::*;

pub use io::{HttpFetcher, MockFetcher, TileFetcher};
